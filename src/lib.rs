//! studyhub - Student content portal for course notes and videos
//!
//! A catalog of downloadable course notes (with per-unit breakdowns) and
//! recorded video lectures, searchable from the command line, with a local
//! user profile and an AI doubt solver.
//!
//! # Modules
//!
//! - `catalog`: Content types, the catalog itself, and the search engine
//! - `profile`: User profile, subscription tiers, and recently-viewed history
//! - `tutor`: AI doubt solver (prompt rendering, limits, saved answers)
//! - `adapters`: Generative-AI backends (local model CLI, hosted endpoint)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Search notes and videos
//! studyhub search calculus
//!
//! # Browse by course
//! studyhub subjects BBA 1 --search accounting
//!
//! # Ask the AI tutor
//! studyhub ask "Calculus I" "What is a derivative?" --save
//! ```

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod profile;
pub mod tutor;

// Re-export main types at crate root for convenience
pub use catalog::{Catalog, ContentKind, Note, SearchMatches, Unit, Video};
pub use profile::{Plan, ProfileStore, SubscriptionTier, UserProfile};
pub use tutor::{DoubtEntry, DoubtRequest, Explanation, HistoryStore, Tutor};
