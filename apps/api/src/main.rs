mod catalog;
mod config;
mod db;
mod drafting;
mod errors;
mod import;
mod llm_client;
mod models;
mod persistence;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::catalog::StaticCatalog;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::drafting::LlmDraftService;
use crate::import::classifier::KeywordClassifier;
use crate::import::linkedin::ProfileImporter;
use crate::llm_client::LlmClient;
use crate::persistence::{
    memory::MemoryStateStore, postgres::PgStateStore, Persistence, StateStore,
};
use crate::routes::build_router;
use crate::session::registry::SessionRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SwipeConnect API v{}", env!("CARGO_PKG_VERSION"));

    // Durable state: PostgreSQL when configured, otherwise process memory
    let store: Arc<dyn StateStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgStateStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; liked drafts will not survive a restart");
            Arc::new(MemoryStateStore::default())
        }
    };

    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let catalog = StaticCatalog::bundled()?;
    info!("Profile catalog loaded ({} profiles)", catalog.len());

    if config.proxycurl_api_key.is_none() {
        warn!("PROXYCURL_API_KEY not set; profile import will ask for manual entry");
    }
    let importer = ProfileImporter::new(config.proxycurl_api_key.clone())?;

    let state = AppState {
        persistence: Persistence::new(store),
        sessions: SessionRegistry::new(),
        drafter: Arc::new(LlmDraftService(llm)),
        classifier: Arc::new(KeywordClassifier),
        catalog: Arc::new(catalog),
        importer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
