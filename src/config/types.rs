use crate::service::RitualFormat;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Where lineage, glyph and dream-log exports are written
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub ritual: RitualConfig,

    #[serde(default)]
    pub dream: DreamConfig,
}

fn default_export_dir() -> PathBuf {
    glyphcodex_dir().join("exports")
}

fn default_log_level() -> String {
    "info".into()
}

pub(super) fn glyphcodex_dir() -> PathBuf {
    UserDirs::new()
        .map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf())
        .join(".glyphcodex")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Parameters sent with generate/evolve/mutate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RitualConfig {
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default = "default_grammar")]
    pub grammar: String,
    #[serde(default)]
    pub format: RitualFormat,
}

fn default_steps() -> u32 {
    5
}

fn default_grammar() -> String {
    "default".into()
}

impl Default for RitualConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            grammar: default_grammar(),
            format: RitualFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreamConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_insight_ttl_ms")]
    pub insight_ttl_ms: u64,
}

fn default_interval_secs() -> u64 {
    5
}

fn default_insight_ttl_ms() -> u64 {
    3500
}

impl DreamConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn insight_ttl(&self) -> Duration {
        Duration::from_millis(self.insight_ttl_ms)
    }
}

impl Default for DreamConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            insight_ttl_ms: default_insight_ttl_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: glyphcodex_dir().join("config.toml"),
            service: ServiceConfig::default(),
            ritual: RitualConfig::default(),
            dream: DreamConfig::default(),
            export_dir: default_export_dir(),
            log_level: default_log_level(),
        }
    }
}
