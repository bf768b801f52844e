//! Imports the user's own profile from a public LinkedIn URL via the
//! Proxycurl enrichment API.

use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::import::ImportError;
use crate::models::profile::UserProfile;

const PROXYCURL_PROFILE_URL: &str = "https://nubela.co/proxycurl/api/v2/linkedin";
const PUBLIC_PROFILE_SEGMENT: &str = "linkedin.com/in/";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Rejects anything that is not a public-profile URL, before any external call.
pub fn validate_profile_url(url: &str) -> Result<(), ImportError> {
    if url.trim().is_empty() || !url.contains(PUBLIC_PROFILE_SEGMENT) {
        return Err(ImportError::InvalidProfileUrl);
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnrichedProfile {
    first_name: Option<String>,
    last_name: Option<String>,
    occupation: Option<String>,
    headline: Option<String>,
    summary: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country_full_name: Option<String>,
    experiences: Option<Vec<Experience>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Experience {
    company: Option<String>,
}

fn join_present(parts: &[&Option<String>], sep: &str) -> String {
    parts
        .iter()
        .filter_map(|p| p.as_deref())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

impl EnrichedProfile {
    fn into_user_profile(self, linkedin_url: &str) -> UserProfile {
        UserProfile {
            name: join_present(&[&self.first_name, &self.last_name], " "),
            title: self.occupation.unwrap_or_default(),
            company: self
                .experiences
                .as_ref()
                .and_then(|e| e.first())
                .and_then(|e| e.company.clone())
                .unwrap_or_default(),
            location: join_present(&[&self.city, &self.state, &self.country_full_name], ", "),
            headline: self.headline.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            linkedin_url: linkedin_url.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ProfileImporter {
    client: Client,
    api_key: Option<String>,
}

impl ProfileImporter {
    pub fn new(api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, api_key })
    }

    pub async fn fetch(&self, linkedin_url: &str) -> Result<UserProfile, ImportError> {
        validate_profile_url(linkedin_url)?;

        let Some(api_key) = self.api_key.as_deref() else {
            error!("PROXYCURL_API_KEY not configured");
            return Err(ImportError::NotConfigured);
        };

        let response = self
            .client
            .get(PROXYCURL_PROFILE_URL)
            .query(&[("url", linkedin_url)])
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| {
                error!("Profile import request failed: {e}");
                ImportError::Upstream { status: None }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Proxycurl error: {} {}", status, body);
            return Err(ImportError::Upstream {
                status: Some(status.as_u16()),
            });
        }

        let enriched: EnrichedProfile = response.json().await.map_err(|e| {
            error!("Proxycurl returned an unreadable profile: {e}");
            ImportError::Upstream { status: None }
        })?;

        info!("Imported profile for {linkedin_url}");
        Ok(enriched.into_user_profile(linkedin_url))
    }
}
