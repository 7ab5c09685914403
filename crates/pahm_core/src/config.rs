//! PAHM configuration.
//!
//! Configuration lives in a single TOML file (default `pahm.toml` in the
//! data directory). Every section and field is optional. Scoring weights and
//! tiers are fixed in code and deliberately absent here.

use crate::error::Result;
use chrono::Offset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "pahm.toml";

/// Engine settings that affect calendar math and windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Offset from UTC used to bucket sessions into calendar days
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Window for "recent" session counts (days, valid: 1-365)
    #[serde(default = "default_recent_window_days")]
    pub recent_window_days: u32,

    /// Most recent notes blended into the mood score (valid: 1-50)
    #[serde(default = "default_recent_note_count")]
    pub recent_note_count: usize,
}

fn default_recent_window_days() -> u32 {
    30
}

fn default_recent_note_count() -> usize {
    5
}

impl EngineSettings {
    /// Clamp utc_offset_minutes to a real-world range (+/-14h)
    pub fn effective_utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes.clamp(-840, 840)
    }

    pub fn effective_recent_window_days(&self) -> u32 {
        self.recent_window_days.clamp(1, 365)
    }

    pub fn effective_recent_note_count(&self) -> usize {
        self.recent_note_count.clamp(1, 50)
    }

    /// Fixed offset for day bucketing
    pub fn offset(&self) -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(self.effective_utc_offset_minutes() * 60)
            .unwrap_or_else(|| chrono::Utc.fix())
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            recent_window_days: default_recent_window_days(),
            recent_note_count: default_recent_note_count(),
        }
    }
}

/// Where the file-backed record store lives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StoreSettings {
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// tracing filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PahmConfig {
    #[serde(default)]
    pub engine: EngineSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub log: LogSettings,
}

impl PahmConfig {
    /// Load and parse a config file. Missing or invalid files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load a config file, using defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config as pretty TOML
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)
    }
}

/// Default data directory (~/.local/share/pahm)
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pahm")
}

/// Default config path inside a data directory
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}
