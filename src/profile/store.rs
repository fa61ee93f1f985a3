//! JSON-file persistence for the user profile.
//!
//! The profile lives at `<home>/profile.json`. A missing file yields a
//! default profile rather than an error, so first-run commands work without
//! any setup step.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use super::UserProfile;
use crate::config;

/// Profile storage bound to a file path
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Open the store at the configured profile path
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            path: config::profile_path()?,
        })
    }

    /// Open a store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile, or a default one if none has been saved yet
    pub async fn load(&self) -> Result<UserProfile> {
        if !self.path.exists() {
            return Ok(UserProfile::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read profile: {}", self.path.display()))?;

        serde_json::from_str(&content).context("Failed to parse profile JSON")
    }

    /// Save the profile to disk
    pub async fn save(&self, profile: &UserProfile) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write profile: {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentKind;
    use crate::profile::SubscriptionTier;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_returns_default() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::at(temp.path().join("profile.json"));

        let profile = store.load().await.unwrap();
        assert_eq!(profile.name, "Student");
        assert_eq!(profile.subscription, SubscriptionTier::Free);
        assert!(profile.recently_viewed.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::at(temp.path().join("nested").join("profile.json"));

        let mut profile = UserProfile::default();
        profile.name = "Alex Student".to_string();
        profile.email = "alex.student@example.com".to_string();
        profile.set_tier(SubscriptionTier::Premium);
        profile.record_view("note-1", ContentKind::Note, "Introduction to Calculus");

        store.save(&profile).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.name, "Alex Student");
        assert_eq!(loaded.subscription, SubscriptionTier::Premium);
        assert_eq!(loaded.recently_viewed.len(), 1);
        assert_eq!(loaded.recently_viewed[0].id, "note-1");
    }
}
