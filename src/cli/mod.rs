//! Command-line interface for studyhub.
//!
//! Provides commands for browsing the catalog by course/semester/subject,
//! searching notes and videos, viewing content, managing the profile and
//! subscription, and asking the AI doubt solver.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::catalog::{Catalog, ContentKind};
use crate::config;
use crate::profile::{Plan, ProfileStore, SubscriptionTier};
use crate::tutor::{DoubtEntry, DoubtRequest, HistoryStore, Tutor};

pub mod profile;

/// studyhub - course notes, videos, catalog search, and an AI doubt solver
#[derive(Parser, Debug)]
#[command(name = "studyhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available courses
    Courses,

    /// List semesters available for a course
    Semesters {
        /// Course category (e.g. BBA, BCA, B.Pharm)
        course: String,
    },

    /// List subjects for a course and semester
    Subjects {
        /// Course category
        course: String,

        /// Semester number
        semester: u8,

        /// Narrow by a search term over title, summary, and subject
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List notes in the catalog
    Notes {
        /// Filter by course category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by semester
        #[arg(short, long)]
        semester: Option<u8>,

        /// Maximum number of notes to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// List videos in the catalog
    Videos {
        /// Maximum number of videos to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Search notes and videos
    Search {
        /// Search query
        query: String,
    },

    /// Show details of a note or video
    Show {
        /// Content ID (e.g. note-1, video-2)
        id: String,

        /// Show full note/unit content
        #[arg(short, long)]
        full: bool,
    },

    /// Ask the AI doubt solver a question
    Ask {
        /// Course the doubt relates to
        course: String,

        /// The question (reads from stdin if not provided)
        question: Vec<String>,

        /// Save the answer to the doubt history
        #[arg(short, long)]
        save: bool,
    },

    /// List saved doubts
    Doubts {
        /// Show the full saved answer for this entry id
        #[arg(short, long)]
        show: Option<String>,
    },

    /// Manage the user profile
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommands,
    },

    /// Show subscription plans
    Plans {
        /// Switch to this tier
        #[arg(short, long, value_enum)]
        upgrade: Option<SubscriptionTier>,
    },

    /// Show resolved configuration (debug)
    Config {
        /// Probe the tutor backend for availability
        #[arg(long)]
        check: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Courses => list_courses().await,
            Commands::Semesters { course } => list_semesters(&course).await,
            Commands::Subjects {
                course,
                semester,
                search,
            } => list_subjects(&course, semester, search.as_deref().unwrap_or("")).await,
            Commands::Notes {
                category,
                semester,
                limit,
            } => list_notes(category.as_deref(), semester, limit).await,
            Commands::Videos { limit } => list_videos(limit).await,
            Commands::Search { query } => search_catalog(&query).await,
            Commands::Show { id, full } => show_content(&id, full).await,
            Commands::Ask {
                course,
                question,
                save,
            } => ask_tutor(&course, question, save).await,
            Commands::Doubts { show } => list_doubts(show.as_deref()).await,
            Commands::Profile { command } => execute_profile(command).await,
            Commands::Plans { upgrade } => show_plans(upgrade).await,
            Commands::Config { check } => show_config(check).await,
        }
    }
}

/// Execute profile subcommands
async fn execute_profile(command: profile::ProfileCommands) -> Result<()> {
    match command {
        profile::ProfileCommands::Show => profile::execute_show().await,
        profile::ProfileCommands::Edit {
            name,
            email,
            avatar_url,
        } => profile::execute_edit(name, email, avatar_url).await,
        profile::ProfileCommands::Recent => profile::execute_recent().await,
        profile::ProfileCommands::VerifyEmail => profile::execute_verify_email().await,
    }
}

/// Load the active catalog: configured file override or the built-in data
async fn load_catalog() -> Result<Catalog> {
    match config::catalog_path()? {
        Some(path) => Catalog::load(&path).await,
        None => Ok(Catalog::builtin()?.clone()),
    }
}

/// Truncate a title for table display
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// List available courses
async fn list_courses() -> Result<()> {
    let catalog = load_catalog().await?;
    let courses = catalog.courses();

    if courses.is_empty() {
        println!("Catalog has no notes");
        return Ok(());
    }

    println!("{:<16} {:<10} {:<10}", "COURSE", "NOTES", "SEMESTERS");
    println!("{}", "-".repeat(38));

    for course in courses {
        let notes = catalog.notes.iter().filter(|n| n.category == course).count();
        let semesters = catalog.semesters(course).len();
        println!("{:<16} {:<10} {:<10}", course, notes, semesters);
    }

    Ok(())
}

/// List semesters for a course
async fn list_semesters(course: &str) -> Result<()> {
    let catalog = load_catalog().await?;
    let semesters = catalog.semesters(course);

    if semesters.is_empty() {
        println!("No semesters found for {}", course);
        return Ok(());
    }

    for semester in semesters {
        let subjects = catalog.subjects(course, semester, "").len();
        println!("Semester {} ({} subjects)", semester, subjects);
    }

    Ok(())
}

/// List subjects for a course and semester
async fn list_subjects(course: &str, semester: u8, term: &str) -> Result<()> {
    let catalog = load_catalog().await?;
    let notes = catalog.subjects(course, semester, term);

    if notes.is_empty() {
        println!(
            "No subjects match your criteria for {} - Semester {}{}",
            course,
            semester,
            if term.is_empty() { "" } else { ". Try a different search term" }
        );
        return Ok(());
    }

    println!("{:<22} {:<30} {:<6}", "ID", "SUBJECT", "UNITS");
    println!("{}", "-".repeat(60));

    for note in notes {
        println!(
            "{:<22} {:<30} {:<6}",
            note.id,
            truncate(&note.subject, 27),
            note.units.len()
        );
    }

    Ok(())
}

/// List notes, optionally filtered
async fn list_notes(category: Option<&str>, semester: Option<u8>, limit: usize) -> Result<()> {
    let catalog = load_catalog().await?;

    let notes: Vec<_> = catalog
        .notes
        .iter()
        .filter(|n| category.map_or(true, |c| n.category == c))
        .filter(|n| semester.map_or(true, |s| n.semester == s))
        .take(limit)
        .collect();

    if notes.is_empty() {
        println!("No notes found");
        return Ok(());
    }

    println!("{:<22} {:<12} {:<4} {:<40}", "ID", "CATEGORY", "SEM", "TITLE");
    println!("{}", "-".repeat(80));

    for note in &notes {
        println!(
            "{:<22} {:<12} {:<4} {:<40}",
            note.id,
            truncate(&note.category, 10),
            note.semester,
            truncate(&note.title, 37)
        );
    }

    println!("\nTotal: {} notes", notes.len());

    Ok(())
}

/// List videos
async fn list_videos(limit: usize) -> Result<()> {
    let catalog = load_catalog().await?;

    if catalog.videos.is_empty() {
        println!("No videos found");
        return Ok(());
    }

    println!("{:<10} {:<8} {:<20} {:<38}", "ID", "LENGTH", "UPLOADER", "TITLE");
    println!("{}", "-".repeat(78));

    for video in catalog.videos.iter().take(limit) {
        println!(
            "{:<10} {:<8} {:<20} {:<38}",
            video.id,
            video.duration,
            truncate(&video.uploader, 17),
            truncate(&video.title, 35)
        );
    }

    Ok(())
}

/// Search the catalog
async fn search_catalog(query: &str) -> Result<()> {
    let catalog = load_catalog().await?;
    let matches = catalog.search(query);

    if matches.is_empty() {
        println!("No results found for: {}", query.trim());
        return Ok(());
    }

    println!(
        "Found {} result(s) for \"{}\":\n",
        matches.len(),
        query.trim()
    );

    if !matches.notes.is_empty() {
        println!("Matching Notes ({})", matches.notes.len());
        println!("{:<22} {:<12} {:<44}", "ID", "CATEGORY", "TITLE");
        println!("{}", "-".repeat(78));
        for note in &matches.notes {
            println!(
                "{:<22} {:<12} {:<44}",
                note.id,
                truncate(&note.category, 10),
                truncate(&note.title, 41)
            );
        }
    }

    if !matches.videos.is_empty() {
        if !matches.notes.is_empty() {
            println!();
        }
        println!("Matching Videos ({})", matches.videos.len());
        println!("{:<22} {:<12} {:<44}", "ID", "CATEGORY", "TITLE");
        println!("{}", "-".repeat(78));
        for video in &matches.videos {
            println!(
                "{:<22} {:<12} {:<44}",
                video.id,
                truncate(&video.category, 10),
                truncate(&video.title, 41)
            );
        }
    }

    Ok(())
}

/// Show details of a note or video, recording a recently-viewed entry
async fn show_content(id: &str, full: bool) -> Result<()> {
    let catalog = load_catalog().await?;

    if let Some(note) = catalog.note(id) {
        println!("Title:    {}", note.title);
        println!("Category: {}", note.category);
        println!("Subject:  {}", note.subject);
        println!("Semester: {}", note.semester);
        println!("Added:    {}", note.created_at.format("%Y-%m-%d"));
        println!("\n{}", note.summary);

        if let Some(ref content) = note.content {
            if full {
                println!("\n{}", content);
            }
        }

        if !note.units.is_empty() {
            println!("\nUnits:");
            for unit in &note.units {
                println!(
                    "  {:<14} {} ({} downloads, {}/5)",
                    unit.id,
                    unit.title,
                    unit.total_downloads,
                    unit.rating
                );
                if full {
                    println!("    {}", unit.summary);
                    if let Some(ref content) = unit.content {
                        println!("    {}", content);
                    }
                }
            }
            if !full {
                println!("\nUse --full to show unit contents");
            }
        }

        record_view(id, ContentKind::Note, &note.title).await?;
        return Ok(());
    }

    if let Some(video) = catalog.video(id) {
        println!("Title:    {}", video.title);
        println!("Category: {}", video.category);
        println!("Subject:  {}", video.subject);
        println!("Uploader: {}", video.uploader);
        println!("Length:   {}", video.duration);
        println!("Uploaded: {}", video.upload_date.format("%Y-%m-%d"));
        println!("Watch:    https://www.youtube.com/watch?v={}", video.video_url);
        println!("\n{}", video.description);

        record_view(id, ContentKind::Video, &video.title).await?;
        return Ok(());
    }

    anyhow::bail!("Content not found: {}", id)
}

/// Push a recently-viewed entry onto the profile
async fn record_view(id: &str, kind: ContentKind, title: &str) -> Result<()> {
    let store = ProfileStore::open_default()?;
    let mut profile = store.load().await?;
    profile.record_view(id, kind, title);
    store.save(&profile).await
}

/// Ask the AI doubt solver
async fn ask_tutor(course: &str, question: Vec<String>, save: bool) -> Result<()> {
    let question = if question.is_empty() {
        // Read from stdin
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read question from stdin")?;
        buffer
    } else {
        question.join(" ")
    };

    if question.trim().is_empty() {
        anyhow::bail!("No question provided. Pass it as arguments or pipe to stdin");
    }

    let settings = config::config()?.tutor.clone();
    let tutor = Tutor::from_settings(settings)?;

    eprintln!("Asking the {} tutor about {}...", tutor.backend(), course);

    let request = DoubtRequest {
        course: course.to_string(),
        question: question.clone(),
    };
    let explanation = tutor.solve(&request).await?;

    println!("{}", explanation.content);

    if let Some(tokens) = explanation.tokens_used {
        eprintln!("\n[{} tokens used]", tokens);
    }

    if save {
        let store = HistoryStore::open_default()?;
        let entry = DoubtEntry::new(course, question, explanation.content);
        store.save(&entry).await?;
        eprintln!("Saved to doubt history: {}", entry.id);
    }

    Ok(())
}

/// List or show saved doubts
async fn list_doubts(show: Option<&str>) -> Result<()> {
    let store = HistoryStore::open_default()?;

    if let Some(id_prefix) = show {
        let entry = store
            .get(id_prefix)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Doubt entry not found: {}", id_prefix))?;

        println!("Course:   {}", entry.course);
        println!("Asked:    {}", entry.answered_at.format("%Y-%m-%d %H:%M"));
        println!("Question: {}", entry.question);
        println!("\n{}", entry.explanation);
        return Ok(());
    }

    let entries = store.list().await?;
    if entries.is_empty() {
        println!("No saved doubts. Use 'studyhub ask <course> <question> --save' to keep answers.");
        return Ok(());
    }

    println!("{:<18} {:<16} {:<44}", "ID", "COURSE", "QUESTION");
    println!("{}", "-".repeat(78));

    for entry in &entries {
        println!(
            "{:<18} {:<16} {:<44}",
            entry.id,
            truncate(&entry.course, 13),
            truncate(&entry.question, 41)
        );
    }

    Ok(())
}

/// Show subscription plans, optionally switching tier
async fn show_plans(upgrade: Option<SubscriptionTier>) -> Result<()> {
    let store = ProfileStore::open_default()?;
    let mut profile = store.load().await?;

    if let Some(tier) = upgrade {
        if tier == profile.subscription {
            println!("Already on the {} plan", tier);
        } else {
            profile.set_tier(tier);
            store.save(&profile).await?;
            println!("Switched to the {} plan", tier);
        }
        return Ok(());
    }

    for plan in Plan::all() {
        let marker = if plan.tier == profile.subscription {
            " (current plan)"
        } else {
            ""
        };
        println!("{} - {}{}{}", plan.tier, plan.price, plan.period, marker);
        for feature in plan.features {
            println!("  - {}", feature);
        }
        println!();
    }

    println!("Your current plan is: {}", profile.subscription);
    println!("Use 'studyhub plans --upgrade <tier>' to switch");

    Ok(())
}

/// Show the resolved configuration (for debugging)
async fn show_config(check: bool) -> Result<()> {
    let cfg = config::config()?;

    println!("Studyhub Configuration");
    println!("{}", "-".repeat(40));
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Profile: {}", cfg.home.join("profile.json").display());
    println!("  Doubts:  {}", cfg.home.join("doubts").display());
    println!(
        "  Catalog: {}",
        cfg.catalog
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in)".to_string())
    );
    println!();
    println!("Tutor:");
    println!(
        "  Backend:           {}",
        cfg.tutor
            .endpoint
            .as_deref()
            .unwrap_or("local model CLI")
    );
    if let Some(ref binary) = cfg.tutor.binary {
        println!("  Binary:            {}", binary);
    }
    println!("  Timeout:           {}s", cfg.tutor.timeout_seconds);
    println!("  Max question size: {} bytes", cfg.tutor.max_question_bytes);

    if check {
        let tutor = Tutor::from_settings(cfg.tutor.clone())?;
        println!();
        match tutor.health_check().await {
            Ok(()) => println!("Tutor backend '{}': available", tutor.backend()),
            Err(e) => println!("Tutor backend '{}': unavailable ({})", tutor.backend(), e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title here", 8), "a longer...");
    }
}
