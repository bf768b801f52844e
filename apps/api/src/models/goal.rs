//! Networking goals: fixed tone/intent presets that shape a drafted message.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkingGoal {
    Informational,
    CoffeeChat,
    JobReferral,
    StartupAdvice,
}

impl NetworkingGoal {
    pub const ALL: [NetworkingGoal; 4] = [
        NetworkingGoal::Informational,
        NetworkingGoal::CoffeeChat,
        NetworkingGoal::JobReferral,
        NetworkingGoal::StartupAdvice,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NetworkingGoal::Informational => "Informational Interview",
            NetworkingGoal::CoffeeChat => "Coffee Chat",
            NetworkingGoal::JobReferral => "Job Referral",
            NetworkingGoal::StartupAdvice => "Startup Advice",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            NetworkingGoal::Informational => "Learn about their role, company, or industry",
            NetworkingGoal::CoffeeChat => "Build a casual professional relationship",
            NetworkingGoal::JobReferral => "Explore opportunities at their company",
            NetworkingGoal::StartupAdvice => "Get guidance on building or joining a startup",
        }
    }

    /// Tone guidance injected into the drafting prompt.
    pub fn prompt_hint(&self) -> &'static str {
        match self {
            NetworkingGoal::Informational => {
                "The sender wants to learn about the recipient's career path, role, and industry \
                 insights. Frame as a genuine learning conversation."
            }
            NetworkingGoal::CoffeeChat => {
                "The sender wants a relaxed, casual conversation to build rapport. Keep it \
                 friendly and low-pressure."
            }
            NetworkingGoal::JobReferral => {
                "The sender is interested in opportunities at the recipient's company. Be \
                 tactful: show genuine interest in the company and the recipient's work first, \
                 then mention exploring roles."
            }
            NetworkingGoal::StartupAdvice => {
                "The sender wants advice on startups: founding, joining early-stage, or \
                 navigating the startup ecosystem. Position as seeking mentorship."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_ids_are_kebab_case() {
        let json = serde_json::to_string(&NetworkingGoal::CoffeeChat).unwrap();
        assert_eq!(json, r#""coffee-chat""#);
        let goal: NetworkingGoal = serde_json::from_str(r#""startup-advice""#).unwrap();
        assert_eq!(goal, NetworkingGoal::StartupAdvice);
    }

    #[test]
    fn test_unknown_goal_is_rejected() {
        assert!(serde_json::from_str::<NetworkingGoal>(r#""world-domination""#).is_err());
    }

    #[test]
    fn test_job_referral_hint_mentions_roles() {
        assert!(NetworkingGoal::JobReferral.prompt_hint().contains("roles"));
        assert_eq!(NetworkingGoal::JobReferral.label(), "Job Referral");
    }
}
