//! Content record types for the study catalog.
//!
//! Field names on the wire are camelCase to match the catalog JSON format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of content record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Study notes, optionally decomposed into units
    Note,

    /// Educational video hosted externally
    Video,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Note => write!(f, "note"),
            ContentKind::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "note" | "notes" => Ok(ContentKind::Note),
            "video" | "videos" => Ok(ContentKind::Video),
            _ => anyhow::bail!("Unknown content kind: {}", s),
        }
    }
}

/// A sub-section of a note with its own searchable text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unique identifier within the parent note
    pub id: String,

    /// Unit title
    pub title: String,

    /// Short summary of the unit
    pub summary: String,

    /// Full unit content (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Download counter carried from the source catalog
    #[serde(default)]
    pub total_downloads: u64,

    /// Star rating (0-5)
    #[serde(default)]
    pub rating: u8,
}

/// Study material record, optionally decomposed into units
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier within the note collection
    pub id: String,

    /// Note title
    pub title: String,

    /// Course category (e.g. BBA, BCA, Mathematics)
    pub category: String,

    /// Subject within the course
    pub subject: String,

    /// Semester number
    pub semester: u8,

    /// Short summary shown in listings
    pub summary: String,

    /// Full note content (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// When the note was added to the catalog
    pub created_at: DateTime<Utc>,

    /// Ordered units within this note
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Note {
    /// Kind tag for this record
    pub fn kind(&self) -> ContentKind {
        ContentKind::Note
    }

    /// Look up a unit by id
    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == unit_id)
    }
}

/// Educational video record with an externally hosted player link
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Unique identifier within the video collection
    pub id: String,

    /// Video title
    pub title: String,

    /// Description shown in listings
    pub description: String,

    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail_url: String,

    /// YouTube embed ID or direct URL
    pub video_url: String,

    /// Duration as displayed (e.g. "12:35")
    pub duration: String,

    /// Course category
    pub category: String,

    /// Subject within the course
    pub subject: String,

    /// Channel or person that uploaded the video
    pub uploader: String,

    /// When the video was uploaded
    pub upload_date: DateTime<Utc>,
}

impl Video {
    /// Kind tag for this record
    pub fn kind(&self) -> ContentKind {
        ContentKind::Video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_from_str() {
        assert_eq!("note".parse::<ContentKind>().unwrap(), ContentKind::Note);
        assert_eq!("Notes".parse::<ContentKind>().unwrap(), ContentKind::Note);
        assert_eq!("video".parse::<ContentKind>().unwrap(), ContentKind::Video);
        assert!("podcast".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_note_json_round_trip() {
        let json = r#"{
            "id": "note-1",
            "title": "Introduction to Calculus",
            "category": "Mathematics",
            "subject": "Calculus I",
            "semester": 1,
            "summary": "Fundamental concepts of limits, derivatives, and integrals.",
            "createdAt": "2023-01-15T10:00:00Z"
        }"#;

        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, "note-1");
        assert_eq!(note.semester, 1);
        assert!(note.content.is_none());
        assert!(note.units.is_empty());

        let back = serde_json::to_string(&note).unwrap();
        assert!(back.contains("createdAt"));
        assert!(!back.contains("\"content\""));
    }

    #[test]
    fn test_unit_lookup() {
        let json = r#"{
            "id": "pom-main",
            "title": "Principles of Management",
            "category": "BBA",
            "subject": "Principles of Management",
            "semester": 1,
            "summary": "Course overview.",
            "createdAt": "2023-09-01T10:00:00Z",
            "units": [
                {"id": "pom-unit-1", "title": "Unit 1", "summary": "Intro", "totalDownloads": 10, "rating": 4}
            ]
        }"#;

        let note: Note = serde_json::from_str(json).unwrap();
        assert!(note.unit("pom-unit-1").is_some());
        assert!(note.unit("pom-unit-9").is_none());
        assert_eq!(note.unit("pom-unit-1").unwrap().total_downloads, 10);
    }
}
