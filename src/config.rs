//! Configuration for studyhub paths and tutor settings.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (STUDYHUB_HOME, STUDYHUB_CATALOG)
//! 2. Config file (.studyhub/config.yaml)
//! 3. Defaults (~/.studyhub, built-in catalog)
//!
//! Config file discovery:
//! - Searches current directory and parents for .studyhub/config.yaml
//! - Paths in the config file are relative to the config file's location

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub tutor: Option<TutorConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Application state directory (relative to config file)
    pub home: Option<String>,
    /// Catalog JSON file replacing the built-in catalog
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TutorConfig {
    pub binary: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_question_bytes: Option<usize>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the studyhub home (profile, doubt history)
    pub home: PathBuf,
    /// Catalog file override (None = use the built-in catalog)
    pub catalog: Option<PathBuf>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Tutor settings
    pub tutor: TutorSettings,
}

#[derive(Debug, Clone)]
pub struct TutorSettings {
    /// Explicit LLM CLI binary (None = autodetect)
    pub binary: Option<String>,
    /// Hosted explanation endpoint (None = use the local CLI backend)
    pub endpoint: Option<String>,
    pub timeout_seconds: u64,
    pub max_question_bytes: usize,
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            binary: None,
            endpoint: None,
            timeout_seconds: 120,
            max_question_bytes: 16 * 1024, // 16KB
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".studyhub").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(&path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".studyhub");

    let config_file = find_config_file();

    let (home, catalog, tutor) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Paths are relative to the .studyhub/ directory
        let base_dir = config_path.parent().unwrap_or(Path::new("."));

        let home = if let Ok(env_home) = std::env::var("STUDYHUB_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            resolve_path(base_dir, home_path)
        } else {
            default_home.clone()
        };

        let catalog = if let Ok(env_catalog) = std::env::var("STUDYHUB_CATALOG") {
            Some(PathBuf::from(env_catalog))
        } else {
            config
                .paths
                .catalog
                .as_ref()
                .map(|p| resolve_path(base_dir, p))
        };

        let defaults = TutorSettings::default();
        let tutor = TutorSettings {
            binary: config.tutor.as_ref().and_then(|t| t.binary.clone()),
            endpoint: config.tutor.as_ref().and_then(|t| t.endpoint.clone()),
            timeout_seconds: config
                .tutor
                .as_ref()
                .and_then(|t| t.timeout_seconds)
                .unwrap_or(defaults.timeout_seconds),
            max_question_bytes: config
                .tutor
                .as_ref()
                .and_then(|t| t.max_question_bytes)
                .unwrap_or(defaults.max_question_bytes),
        };

        (home, catalog, tutor)
    } else {
        // No config file - use env vars or defaults
        let home = std::env::var("STUDYHUB_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let catalog = std::env::var("STUDYHUB_CATALOG").map(PathBuf::from).ok();

        (home, catalog, TutorSettings::default())
    };

    Ok(ResolvedConfig {
        home,
        catalog,
        config_file,
        tutor,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Get the studyhub home directory.
pub fn home_dir() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the profile path ($STUDYHUB_HOME/profile.json)
pub fn profile_path() -> Result<PathBuf> {
    Ok(config()?.home.join("profile.json"))
}

/// Get the saved-doubts directory ($STUDYHUB_HOME/doubts)
pub fn doubts_dir() -> Result<PathBuf> {
    Ok(config()?.home.join("doubts"))
}

/// Get the catalog file override, if any
pub fn catalog_path() -> Result<Option<PathBuf>> {
    Ok(config()?.catalog.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_tutor_settings() {
        let settings = TutorSettings::default();
        assert_eq!(settings.timeout_seconds, 120);
        assert_eq!(settings.max_question_bytes, 16 * 1024);
        assert!(settings.binary.is_none());
        assert!(settings.endpoint.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let studyhub_dir = temp.path().join(".studyhub");
        std::fs::create_dir_all(&studyhub_dir).unwrap();

        let config_path = studyhub_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  home: ./
  catalog: ../catalog.json
tutor:
  binary: fabric
  timeout_seconds: 60
  max_question_bytes: 4096
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(config.paths.catalog, Some("../catalog.json".to_string()));

        let tutor = config.tutor.unwrap();
        assert_eq!(tutor.binary, Some("fabric".to_string()));
        assert_eq!(tutor.timeout_seconds, Some(60));
        assert_eq!(tutor.max_question_bytes, Some(4096));
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
