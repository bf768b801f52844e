//! Message drafting: turns a target profile plus the sender's context into
//! an outreach message.
//!
//! Default: `LlmDraftService` (Claude via `llm_client`).
//! Callers in the swipe flow go through `draft_or_fallback`, which never fails:
//! any error is logged and replaced by `FALLBACK_MESSAGE`.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::drafting::prompts::{
    fill_template, GOAL_TEMPLATE, MESSAGE_PROMPT_TEMPLATE, RECIPIENT_TEMPLATE, SENDER_TEMPLATE,
};
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::goal::NetworkingGoal;
use crate::models::profile::{Profile, UserProfile};

/// Shown in place of a generated draft whenever generation fails.
pub const FALLBACK_MESSAGE: &str = "Hi! I came across your profile and was really impressed by your work. I'd love to connect and learn more about what you're building. Would you be open to a brief chat sometime?";

/// Drafts are short; this caps the reply well above ~200 words of prose.
const DRAFT_MAX_TOKENS: u32 = 300;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Missing required profile fields")]
    MissingFields,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub profile: Profile,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    #[serde(default)]
    pub networking_goal: Option<NetworkingGoal>,
}

impl DraftRequest {
    /// The recipient needs a name, title and company for a personalised opener.
    pub fn validate(&self) -> Result<(), DraftError> {
        let p = &self.profile;
        if p.name.trim().is_empty() || p.title.trim().is_empty() || p.company.trim().is_empty() {
            return Err(DraftError::MissingFields);
        }
        Ok(())
    }
}

/// Result of a draft attempt that is never allowed to fail.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftOutcome {
    pub message: String,
    /// True when `message` is the fallback text.
    pub failed: bool,
}

#[async_trait]
pub trait DraftService: Send + Sync {
    async fn draft(&self, request: &DraftRequest) -> Result<String, DraftError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmDraftService
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmDraftService(pub LlmClient);

#[async_trait]
impl DraftService for LlmDraftService {
    async fn draft(&self, request: &DraftRequest) -> Result<String, DraftError> {
        request.validate()?;
        let prompt = build_prompt(request);
        let text = self
            .0
            .call_text(&prompt, Some(PLAIN_TEXT_SYSTEM), DRAFT_MAX_TOKENS)
            .await?;
        Ok(text.trim().to_string())
    }
}

/// Runs a draft and substitutes the fallback message on any failure.
pub async fn draft_or_fallback(service: &dyn DraftService, request: &DraftRequest) -> DraftOutcome {
    match service.draft(request).await {
        Ok(message) => DraftOutcome {
            message,
            failed: false,
        },
        Err(e) => {
            warn!(
                "Draft for profile {} failed, using fallback: {e}",
                request.profile.id
            );
            DraftOutcome {
                message: FALLBACK_MESSAGE.to_string(),
                failed: true,
            }
        }
    }
}

pub fn build_prompt(request: &DraftRequest) -> String {
    let p = &request.profile;
    let mutual = p.mutual_connections.to_string();
    let recipient = fill_template(
        RECIPIENT_TEMPLATE,
        &[
            ("name", p.name.as_str()),
            ("title", p.title.as_str()),
            ("company", p.company.as_str()),
            ("headline", p.headline.as_str()),
            ("summary", p.summary.as_str()),
            ("mutual_connections", mutual.as_str()),
        ],
    );

    let sender = request
        .user_profile
        .as_ref()
        .map(|u| {
            fill_template(
                SENDER_TEMPLATE,
                &[
                    ("name", u.name.as_str()),
                    ("title", u.title.as_str()),
                    ("company", u.company.as_str()),
                    ("headline", u.headline.as_str()),
                    ("summary", u.summary.as_str()),
                ],
            )
        })
        .unwrap_or_default();

    let goal = request
        .networking_goal
        .map(|g| {
            fill_template(
                GOAL_TEMPLATE,
                &[("label", g.label()), ("hint", g.prompt_hint())],
            )
        })
        .unwrap_or_default();

    fill_template(
        MESSAGE_PROMPT_TEMPLATE,
        &[("recipient", recipient.as_str()), ("sender", sender.as_str()), ("goal", goal.as_str())],
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies with a fixed message, or fails when `fail` is set.
    pub struct StubDraftService {
        pub reply: String,
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    impl StubDraftService {
        pub fn ok(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: String::new(),
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DraftService for StubDraftService {
        async fn draft(&self, request: &DraftRequest) -> Result<String, DraftError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            request.validate()?;
            if self.fail {
                return Err(DraftError::Llm(LlmError::Api {
                    status: 503,
                    message: "connection reset".to_string(),
                }));
            }
            Ok(format!("{} {}", self.reply, request.profile.name))
        }
    }
}
