//! User profile, subscription tiers, and recently-viewed tracking.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::catalog::ContentKind;

pub mod store;

pub use store::ProfileStore;

/// How many recently-viewed entries are kept
const RECENT_CAP: usize = 10;

/// Subscription tier for the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SubscriptionTier {
    Free,
    Premium,
    Pro,
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        SubscriptionTier::Free
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionTier::Free => write!(f, "Free"),
            SubscriptionTier::Premium => write!(f, "Premium"),
            SubscriptionTier::Pro => write!(f, "Pro"),
        }
    }
}

impl std::str::FromStr for SubscriptionTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "premium" => Ok(SubscriptionTier::Premium),
            "pro" => Ok(SubscriptionTier::Pro),
            _ => anyhow::bail!("Unknown subscription tier: {}", s),
        }
    }
}

/// A content record the user opened recently
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentView {
    pub id: String,
    pub kind: ContentKind,
    pub title: String,
    pub viewed_at: DateTime<Utc>,
}

/// The local user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Profile identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Current subscription tier
    #[serde(default)]
    pub subscription: SubscriptionTier,

    /// Whether the email address has been verified
    #[serde(default)]
    pub email_verified: bool,

    /// When the profile was created
    pub join_date: DateTime<Utc>,

    /// Most recently viewed content, newest first
    #[serde(default)]
    pub recently_viewed: Vec<RecentView>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "local".to_string(),
            name: "Student".to_string(),
            email: String::new(),
            avatar_url: None,
            subscription: SubscriptionTier::Free,
            email_verified: false,
            join_date: Utc::now(),
            recently_viewed: Vec::new(),
        }
    }
}

impl UserProfile {
    /// Record a viewed content item: newest first, deduplicated by id,
    /// capped at a fixed number of entries.
    pub fn record_view(&mut self, id: impl Into<String>, kind: ContentKind, title: impl Into<String>) {
        let id = id.into();
        self.recently_viewed.retain(|v| v.id != id);
        self.recently_viewed.insert(
            0,
            RecentView {
                id,
                kind,
                title: title.into(),
                viewed_at: Utc::now(),
            },
        );
        self.recently_viewed.truncate(RECENT_CAP);
    }

    /// Switch subscription tier
    pub fn set_tier(&mut self, tier: SubscriptionTier) {
        self.subscription = tier;
    }
}

/// A subscription plan as shown on the plans screen
#[derive(Debug, Clone)]
pub struct Plan {
    pub tier: SubscriptionTier,
    pub price: &'static str,
    pub period: &'static str,
    pub features: &'static [&'static str],
}

impl Plan {
    /// All available plans, cheapest first
    pub fn all() -> &'static [Plan] {
        &[
            Plan {
                tier: SubscriptionTier::Free,
                price: "$0",
                period: "/month",
                features: &[
                    "Access to limited notes",
                    "View selected course videos",
                    "Basic AI Doubt Solver access (3 queries/day)",
                ],
            },
            Plan {
                tier: SubscriptionTier::Premium,
                price: "$1",
                period: "/month",
                features: &[
                    "Unlimited access to all notes",
                    "Access to all course videos",
                    "Unlimited AI Doubt Solver access",
                    "Priority support",
                    "Download notes for offline access",
                ],
            },
            Plan {
                tier: SubscriptionTier::Pro,
                price: "$2",
                period: "/month",
                features: &[
                    "All Premium features",
                    "Exclusive AI tools (e.g., Note Summarization)",
                    "Personalized study tips from AI",
                    "Early access to new features",
                    "One-on-one doubt clearing sessions (2/month)",
                ],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_str() {
        assert_eq!("free".parse::<SubscriptionTier>().unwrap(), SubscriptionTier::Free);
        assert_eq!("Premium".parse::<SubscriptionTier>().unwrap(), SubscriptionTier::Premium);
        assert_eq!("PRO".parse::<SubscriptionTier>().unwrap(), SubscriptionTier::Pro);
        assert!("platinum".parse::<SubscriptionTier>().is_err());
    }

    #[test]
    fn test_record_view_dedupes_and_caps() {
        let mut profile = UserProfile::default();

        for i in 0..15 {
            profile.record_view(format!("note-{}", i), ContentKind::Note, format!("Note {}", i));
        }
        assert_eq!(profile.recently_viewed.len(), RECENT_CAP);
        assert_eq!(profile.recently_viewed[0].id, "note-14");

        // Re-viewing an older entry moves it to the front without duplication.
        profile.record_view("note-10", ContentKind::Note, "Note 10");
        assert_eq!(profile.recently_viewed.len(), RECENT_CAP);
        assert_eq!(profile.recently_viewed[0].id, "note-10");
        let count = profile
            .recently_viewed
            .iter()
            .filter(|v| v.id == "note-10")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_plans_cover_all_tiers() {
        let plans = Plan::all();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].tier, SubscriptionTier::Free);
        assert_eq!(plans[2].tier, SubscriptionTier::Pro);
        assert!(plans.iter().all(|p| !p.features.is_empty()));
    }
}
