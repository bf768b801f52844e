use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role grouping used to filter the candidate queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileCategory {
    Founders,
    Product,
    Vc,
    Consulting,
    Banking,
    Alumni,
}

impl ProfileCategory {
    pub const ALL: [ProfileCategory; 6] = [
        ProfileCategory::Founders,
        ProfileCategory::Product,
        ProfileCategory::Vc,
        ProfileCategory::Consulting,
        ProfileCategory::Banking,
        ProfileCategory::Alumni,
    ];

    /// Wire id, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileCategory::Founders => "founders",
            ProfileCategory::Product => "product",
            ProfileCategory::Vc => "vc",
            ProfileCategory::Consulting => "consulting",
            ProfileCategory::Banking => "banking",
            ProfileCategory::Alumni => "alumni",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileCategory::Founders => "Founders & Chiefs of Staff",
            ProfileCategory::Product => "Product Leads",
            ProfileCategory::Vc => "VCs & Investors",
            ProfileCategory::Consulting => "Consultants",
            ProfileCategory::Banking => "Banking & Finance",
            ProfileCategory::Alumni => "MBA Alumni",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProfileCategory::Founders => "CEOs, CTOs, COOs, and Chiefs of Staff at startups",
            ProfileCategory::Product => "VPs, Senior PMs, and Group PMs driving product strategy",
            ProfileCategory::Vc => "Partners and Principals at top venture capital firms",
            ProfileCategory::Consulting => "Partners and Managers at MBB and top strategy firms",
            ProfileCategory::Banking => {
                "MDs, VPs, and Associates at bulge bracket and elite boutiques"
            }
            ProfileCategory::Alumni => "Recent MBA grads at top companies across industries",
        }
    }
}

/// A categorized contact candidate shown for a swipe decision.
///
/// Field names serialize in camelCase so stored drafts stay readable by the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub headline: String,
    pub summary: String,
    pub category: ProfileCategory,
    pub mutual_connections: u32,
    pub connection_degree: u8,
    pub initials: String,
    pub avatar_gradient: String,
    pub linkedin_url: String,
}

/// The user's own profile: self-reported or imported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub headline: String,
    pub summary: String,
    pub linkedin_url: String,
}

impl UserProfile {
    /// Manual entry needs at least a name and a title.
    pub fn validate_manual(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.title.trim().is_empty() {
            return Err("Please fill in at least your name and title.".to_string());
        }
        Ok(())
    }
}

/// A right-swiped profile paired with its drafted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedProfile {
    pub profile: Profile,
    pub message: String,
    pub liked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}
