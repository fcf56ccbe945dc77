//! Configuration for archive paths and presentation order.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (ARCHIVE_HOME, ARCHIVE_STORAGE_DIR, ARCHIVE_SEED)
//! 2. Config file (.archive/config.yaml)
//! 3. Defaults (~/.evidence-archive, seed 9001)
//!
//! Config file discovery:
//! - Searches current directory and parents for .archive/config.yaml
//! - Paths in config file are relative to the project root (the parent of
//!   the .archive/ directory)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::content::DEFAULT_SEED;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub shuffle: Option<ShuffleConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Reader state directory (relative to project root)
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShuffleConfig {
    pub seed: Option<u64>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to archive home
    pub home: PathBuf,
    /// Directory holding persisted reader state
    pub storage_dir: PathBuf,
    /// Seed for the presentation order
    pub seed: u64,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".archive").join("config.yaml");
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

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge environment, config file and defaults
fn resolve_config(
    default_home: PathBuf,
    config: Option<(PathBuf, ConfigFile)>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let home = env("ARCHIVE_HOME")
        .map(PathBuf::from)
        .unwrap_or(default_home);

    let file_storage_dir = config.as_ref().and_then(|(config_path, file)| {
        let base_dir = config_path
            .parent() // .archive/
            .and_then(|p| p.parent()) // project root
            .unwrap_or(Path::new("."));
        file.storage
            .dir
            .as_deref()
            .map(|dir| resolve_path(base_dir, dir))
    });

    let storage_dir = env("ARCHIVE_STORAGE_DIR")
        .map(PathBuf::from)
        .or(file_storage_dir)
        .unwrap_or_else(|| home.join("storage"));

    let seed = match env("ARCHIVE_SEED") {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Invalid ARCHIVE_SEED: {}", raw))?,
        None => config
            .as_ref()
            .and_then(|(_, file)| file.shuffle.as_ref())
            .and_then(|s| s.seed)
            .unwrap_or(DEFAULT_SEED),
    };

    Ok(ResolvedConfig {
        home,
        storage_dir,
        seed,
        config_file: config.map(|(path, _)| path),
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".evidence-archive");

    let config = match find_config_file() {
        Some(path) => {
            let file = load_config_file(&path)?;
            Some((path, file))
        }
        None => None,
    };

    resolve_config(default_home, config, |key| std::env::var(key).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the directory holding persisted reader state
pub fn storage_dir() -> Result<PathBuf> {
    Ok(config()?.storage_dir.clone())
}

/// Get the presentation order seed
pub fn seed() -> Result<u64> {
    Ok(config()?.seed)
}
