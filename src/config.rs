//! Configuration primitives for the movedesk workspace.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/MoveDesk/config/config.toml on Windows
//!   $XDG_DATA_HOME/MoveDesk/config/config.toml on Linux
//!   ~/Library/Application Support/MoveDesk/config/config.toml on macOS
//!
//! Environment variables override file values so deployments and tests can
//! reconfigure the pipeline without touching disk state.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Runtime settings for the intake pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Completion-provider API key. `"mock"` means no live credential.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Completion-provider model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Hard cap on substantive turns per session.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// How many of the core profile fields must be known before planning.
    #[serde(default = "default_profile_min_fields")]
    pub profile_min_fields: u32,
    /// When true, every completion call returns canned fixtures.
    #[serde(default)]
    pub mock_mode: bool,
    /// Enables the completion-backed interview refinement (off by default;
    /// the deterministic planner covers the required fields without a call).
    #[serde(default)]
    pub interview_followup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            model: default_model(),
            max_turns: default_max_turns(),
            profile_min_fields: default_profile_min_fields(),
            mock_mode: false,
            interview_followup: false,
        }
    }
}

fn default_api_key() -> String {
    "mock".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_max_turns() -> u32 {
    20
}

const fn default_profile_min_fields() -> u32 {
    3
}

/// Returns the root directory where movedesk stores data.
///
/// Order of precedence:
/// 1. `MOVEDESK_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("MOVEDESK_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("MoveDesk"))
}

/// Returns the config directory under the workspace root.
pub fn config_dir() -> Result<PathBuf> {
    Ok(workspace_root()?.join("config"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk (or defaults), then applies
/// environment-variable overrides.
pub fn load_or_default() -> Result<Settings> {
    let path = config_file_path()?;
    let mut settings = if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&data).with_context(|| format!("Failed to parse config file {:?}", path))?
    } else {
        Settings::default()
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Persists the configuration to disk.
pub fn save(settings: &Settings) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(settings)?;
    fs::write(&path, data)?;
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(key) = env::var("MOVEDESK_API_KEY") {
        settings.api_key = key;
    }
    if let Ok(model) = env::var("MOVEDESK_MODEL") {
        settings.model = model;
    }
    if let Ok(value) = env::var("MOVEDESK_MAX_TURNS") {
        if let Ok(parsed) = value.parse() {
            settings.max_turns = parsed;
        }
    }
    if let Ok(value) = env::var("MOVEDESK_PROFILE_MIN_FIELDS") {
        if let Ok(parsed) = value.parse() {
            settings.profile_min_fields = parsed;
        }
    }
    if let Ok(value) = env::var("MOVEDESK_MOCK_MODE") {
        settings.mock_mode = matches!(value.as_str(), "1" | "true" | "yes");
    }
    if let Ok(value) = env::var("MOVEDESK_INTERVIEW_FOLLOWUP") {
        settings.interview_followup = matches!(value.as_str(), "1" | "true" | "yes");
    }
}

/// Ensures the workspace structure exists (sessions/ and drafts/ stores).
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let root = workspace_root()?;
    let sessions_dir = root.join("sessions");
    let drafts_dir = root.join("drafts");
    fs::create_dir_all(&sessions_dir)?;
    fs::create_dir_all(&drafts_dir)?;
    Ok(WorkspacePaths {
        root,
        sessions_dir,
        drafts_dir,
    })
}

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub sessions_dir: PathBuf,
    pub drafts_dir: PathBuf,
}
