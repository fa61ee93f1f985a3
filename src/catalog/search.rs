//! Catalog search: case-insensitive substring filtering over notes and videos.
//!
//! The filter is a pure, synchronous pass over the in-memory catalog. It is
//! substring matching only — no tokenization, no fuzzy matching, no ranking.
//! Results keep catalog insertion order.

use super::content::{Note, Video};

/// References into the catalog that matched a query
#[derive(Debug, Clone, Default)]
pub struct SearchMatches<'a> {
    /// Matching notes, in catalog order
    pub notes: Vec<&'a Note>,

    /// Matching videos, in catalog order
    pub videos: Vec<&'a Video>,
}

impl SearchMatches<'_> {
    /// True if neither collection produced a match
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.videos.is_empty()
    }

    /// Total number of matches across both collections
    pub fn len(&self) -> usize {
        self.notes.len() + self.videos.len()
    }
}

/// Filter both collections by a free-text query.
///
/// The query is trimmed before comparison; an empty or whitespace-only query
/// returns empty matches, mirroring the "no search performed" convention of
/// the callers.
pub fn search<'a>(query: &str, notes: &'a [Note], videos: &'a [Video]) -> SearchMatches<'a> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return SearchMatches::default();
    }

    SearchMatches {
        notes: notes.iter().filter(|n| note_matches(n, &query)).collect(),
        videos: videos.iter().filter(|v| video_matches(v, &query)).collect(),
    }
}

/// Note predicate: query in the note's own fields or in any unit's fields.
///
/// `query` must already be lowercased.
fn note_matches(note: &Note, query: &str) -> bool {
    let in_note = contains(&note.title, query)
        || contains(&note.summary, query)
        || note.content.as_deref().is_some_and(|c| contains(c, query))
        || contains(&note.subject, query)
        || contains(&note.category, query);

    let in_units = note.units.iter().any(|unit| {
        contains(&unit.title, query)
            || contains(&unit.summary, query)
            || unit.content.as_deref().is_some_and(|c| contains(c, query))
    });

    in_note || in_units
}

/// Video predicate over title, description, subject, category, and uploader.
fn video_matches(video: &Video, query: &str) -> bool {
    contains(&video.title, query)
        || contains(&video.description, query)
        || contains(&video.subject, query)
        || contains(&video.category, query)
        || contains(&video.uploader, query)
}

fn contains(field: &str, lowercased_query: &str) -> bool {
    field.to_lowercase().contains(lowercased_query)
}
