//! Saved doubt history.
//!
//! Answered doubts can be kept for later review as one JSON file per entry
//! under `<home>/doubts/`. Entry ids are derived from the course and
//! question so re-asking the same doubt overwrites the previous answer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;

use crate::config;

/// A saved question/answer pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubtEntry {
    /// Stable identifier (SHA256(course\nquestion)[0:16])
    pub id: String,

    /// Course the doubt relates to
    pub course: String,

    /// The question as asked
    pub question: String,

    /// The generated explanation
    pub explanation: String,

    /// When the explanation was produced
    pub answered_at: DateTime<Utc>,
}

impl DoubtEntry {
    /// Create an entry for an answered doubt
    pub fn new(
        course: impl Into<String>,
        question: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        let course = course.into();
        let question = question.into();
        let id = entry_id(&course, &question);

        Self {
            id,
            course,
            question,
            explanation: explanation.into(),
            answered_at: Utc::now(),
        }
    }
}

/// Derive a stable entry id from course and question
pub fn entry_id(course: &str, question: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(course.trim().as_bytes());
    hasher.update(b"\n");
    hasher.update(question.trim().as_bytes());
    let result = hasher.finalize();

    // Take first 8 bytes (16 hex chars)
    result[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Doubt history bound to a directory
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    /// Open the store at the configured doubts directory
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            dir: config::doubts_dir()?,
        })
    }

    /// Open a store at an explicit directory
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Save an entry, overwriting any previous answer to the same doubt
    pub async fn save(&self, entry: &DoubtEntry) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create doubts directory: {}", self.dir.display()))?;

        let path = self.entry_path(&entry.id);
        let content = serde_json::to_string_pretty(entry)?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write doubt entry: {}", path.display()))?;

        Ok(())
    }

    /// Load an entry by id prefix match
    pub async fn get(&self, id_prefix: &str) -> Result<Option<DoubtEntry>> {
        for entry in self.list().await? {
            if entry.id.starts_with(id_prefix) {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    /// List all saved entries, most recent first
    pub async fn list(&self) -> Result<Vec<DoubtEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.dir).await?;

        while let Some(file) = dir.next_entry().await? {
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read doubt entry: {}", path.display()))?;
            let entry: DoubtEntry = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse doubt entry: {}", path.display()))?;
            entries.push(entry);
        }

        entries.sort_by(|a, b| b.answered_at.cmp(&a.answered_at));
        Ok(entries)
    }
}
