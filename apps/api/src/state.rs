use std::sync::Arc;

use crate::catalog::ProfileStore;
use crate::drafting::DraftService;
use crate::import::classifier::TitleClassifier;
use crate::import::linkedin::ProfileImporter;
use crate::persistence::Persistence;
use crate::session::registry::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub persistence: Persistence,
    pub sessions: SessionRegistry,
    /// Pluggable drafter. Default: LlmDraftService.
    pub drafter: Arc<dyn DraftService>,
    /// Pluggable title classifier. Default: KeywordClassifier.
    pub classifier: Arc<dyn TitleClassifier>,
    pub catalog: Arc<dyn ProfileStore>,
    pub importer: ProfileImporter,
}
