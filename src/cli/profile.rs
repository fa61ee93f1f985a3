//! Profile CLI subcommands.
//!
//! Provides commands to:
//! - `show`: Display the stored profile
//! - `edit`: Update name, email, or avatar
//! - `recent`: List recently viewed content
//! - `verify-email`: Mark the email address as verified

use anyhow::Result;
use clap::Subcommand;

use crate::profile::ProfileStore;

/// Profile-related subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the stored profile
    Show,

    /// Update profile fields
    Edit {
        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New email address (resets verification)
        #[arg(long)]
        email: Option<String>,

        /// New avatar image URL
        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// List recently viewed content
    Recent,

    /// Mark the email address as verified
    VerifyEmail,
}

/// Execute the `profile show` command
pub async fn execute_show() -> Result<()> {
    let store = ProfileStore::open_default()?;
    let profile = store.load().await?;

    println!("Name:         {}", profile.name);
    println!(
        "Email:        {}{}",
        if profile.email.is_empty() { "(not set)" } else { &profile.email },
        if profile.email_verified { " (verified)" } else { "" }
    );
    if let Some(ref avatar) = profile.avatar_url {
        println!("Avatar:       {}", avatar);
    }
    println!("Subscription: {}", profile.subscription);
    println!("Joined:       {}", profile.join_date.format("%Y-%m-%d"));
    println!("Recent views: {}", profile.recently_viewed.len());

    Ok(())
}

/// Execute the `profile edit` command
pub async fn execute_edit(
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
) -> Result<()> {
    if name.is_none() && email.is_none() && avatar_url.is_none() {
        anyhow::bail!("Nothing to update. Use --name, --email, or --avatar-url");
    }

    let store = ProfileStore::open_default()?;
    let mut profile = store.load().await?;

    if let Some(name) = name {
        profile.name = name;
    }
    if let Some(email) = email {
        // A changed address needs verifying again
        if email != profile.email {
            profile.email_verified = false;
        }
        profile.email = email;
    }
    if let Some(avatar_url) = avatar_url {
        profile.avatar_url = Some(avatar_url);
    }

    store.save(&profile).await?;
    eprintln!("Profile updated");

    Ok(())
}

/// Execute the `profile recent` command
pub async fn execute_recent() -> Result<()> {
    let store = ProfileStore::open_default()?;
    let profile = store.load().await?;

    if profile.recently_viewed.is_empty() {
        println!("No recently viewed content. Use 'studyhub show <id>' to open something.");
        return Ok(());
    }

    println!("{:<20} {:<7} {:<50}", "ID", "KIND", "TITLE");
    println!("{}", "-".repeat(78));

    for view in &profile.recently_viewed {
        println!(
            "{:<20} {:<7} {:<50}",
            view.id,
            view.kind.to_string(),
            view.title
        );
    }

    Ok(())
}

/// Execute the `profile verify-email` command
pub async fn execute_verify_email() -> Result<()> {
    let store = ProfileStore::open_default()?;
    let mut profile = store.load().await?;

    if profile.email.is_empty() {
        anyhow::bail!("No email address set. Use 'studyhub profile edit --email <address>' first");
    }

    if profile.email_verified {
        println!("Email {} is already verified", profile.email);
        return Ok(());
    }

    profile.email_verified = true;
    store.save(&profile).await?;
    println!("Email {} marked as verified", profile.email);

    Ok(())
}
