//! Immutable content catalog: notes and videos, loaded once.
//!
//! The built-in catalog is embedded in the binary and parsed lazily. A
//! catalog file configured via `paths.catalog` (or `STUDYHUB_CATALOG`)
//! replaces the built-in data entirely.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

pub mod content;
pub mod search;

pub use content::{ContentKind, Note, Unit, Video};
pub use search::{search, SearchMatches};

/// Seed catalog shipped with the binary
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Parsed built-in catalog (stores Result to surface parse errors once)
static BUILTIN: OnceLock<std::result::Result<Catalog, String>> = OnceLock::new();

/// The fixed collection of notes and videos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog format version
    pub version: u32,

    /// All notes, in catalog order
    pub notes: Vec<Note>,

    /// All videos, in catalog order
    pub videos: Vec<Video>,
}

impl Catalog {
    /// Get the built-in catalog (parses once, then cached)
    pub fn builtin() -> Result<&'static Catalog> {
        let result = BUILTIN.get_or_init(|| {
            serde_json::from_str(BUILTIN_CATALOG).map_err(|e| e.to_string())
        });

        match result {
            Ok(catalog) => Ok(catalog),
            Err(e) => anyhow::bail!("Built-in catalog is invalid: {}", e),
        }
    }

    /// Load a catalog from a JSON file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        let catalog: Catalog =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject catalogs with duplicate ids within a collection
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for note in &self.notes {
            if !seen.insert(note.id.as_str()) {
                anyhow::bail!("Duplicate note id in catalog: {}", note.id);
            }
        }

        seen.clear();
        for video in &self.videos {
            if !seen.insert(video.id.as_str()) {
                anyhow::bail!("Duplicate video id in catalog: {}", video.id);
            }
        }

        Ok(())
    }

    /// Get a note by id
    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Get a video by id
    pub fn video(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    /// Filter both collections by a free-text query
    pub fn search(&self, query: &str) -> SearchMatches<'_> {
        search(query, &self.notes, &self.videos)
    }

    /// Distinct note categories (courses), in catalog order
    pub fn courses(&self) -> Vec<&str> {
        let mut courses: Vec<&str> = Vec::new();
        for note in &self.notes {
            if !courses.contains(&note.category.as_str()) {
                courses.push(&note.category);
            }
        }
        courses
    }

    /// Distinct semesters available for a course, ascending
    pub fn semesters(&self, course: &str) -> Vec<u8> {
        let mut semesters: Vec<u8> = self
            .notes
            .iter()
            .filter(|n| n.category == course)
            .map(|n| n.semester)
            .collect();
        semesters.sort_unstable();
        semesters.dedup();
        semesters
    }

    /// Notes for a course and semester, optionally narrowed by a search term
    /// over title, summary, and subject.
    pub fn subjects(&self, course: &str, semester: u8, term: &str) -> Vec<&Note> {
        let term = term.trim().to_lowercase();

        self.notes
            .iter()
            .filter(|n| n.category == course && n.semester == semester)
            .filter(|n| {
                term.is_empty()
                    || n.title.to_lowercase().contains(&term)
                    || n.summary.to_lowercase().contains(&term)
                    || n.subject.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Number of notes plus videos
    pub fn len(&self) -> usize {
        self.notes.len() + self.videos.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.videos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.version, 1);
        assert_eq!(catalog.notes.len(), 15);
        assert_eq!(catalog.videos.len(), 3);
        catalog.validate().unwrap();
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::builtin().unwrap();

        let note = catalog.note("note-1").unwrap();
        assert_eq!(note.title, "Introduction to Calculus");

        let video = catalog.video("video-2").unwrap();
        assert_eq!(video.title, "Mastering Python Data Structures");

        assert!(catalog.note("missing").is_none());
        assert!(catalog.video("missing").is_none());
    }

    #[test]
    fn test_courses_in_catalog_order() {
        let catalog = Catalog::builtin().unwrap();
        let courses = catalog.courses();

        // First four notes establish the leading categories.
        assert_eq!(&courses[..4], &["Mathematics", "Physics", "Biology", "History"]);
        assert!(courses.contains(&"BBA"));
        assert!(courses.contains(&"BCA"));
        assert!(courses.contains(&"B.Pharm"));
    }

    #[test]
    fn test_semesters_sorted_distinct() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.semesters("BBA"), vec![1, 2, 3]);
        assert_eq!(catalog.semesters("BCA"), vec![1, 2, 3]);
        assert!(catalog.semesters("Astrology").is_empty());
    }

    #[test]
    fn test_subjects_filtering() {
        let catalog = Catalog::builtin().unwrap();

        let all = catalog.subjects("BBA", 1, "");
        assert_eq!(all.len(), 2);

        let narrowed = catalog.subjects("BBA", 1, "accounting");
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].id, "bba-note-2");

        assert!(catalog.subjects("BBA", 1, "quantum").is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let catalog = Catalog::builtin().unwrap();
        let mut bad = catalog.clone();
        bad.notes.push(bad.notes[0].clone());
        assert!(bad.validate().is_err());
    }
}
