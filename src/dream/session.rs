use crate::error::ExportError;
use crate::service::{RitualKind, RitualResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use strum::Display;

pub const DREAM_LOG_FILE_NAME: &str = "dream_log.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DreamState {
    Idle,
    Running,
    Paused,
}

/// One completed sub-step of a dream tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamLogEntry {
    #[serde(rename = "type")]
    pub kind: RitualKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl DreamLogEntry {
    /// Reflect entries carry only the insight; the others carry the glyph.
    pub fn from_result(kind: RitualKind, result: &RitualResult) -> Self {
        let carries_glyph = kind != RitualKind::Reflect;
        Self {
            kind,
            svg: carries_glyph.then(|| result.svg.clone()),
            glyph: carries_glyph.then(|| result.glyph.clone()),
            insight: result.insight.clone(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DreamLoopSession {
    pub running: bool,
    pub paused: bool,
    pub step_count: u64,
    pub log: Vec<DreamLogEntry>,
}

impl DreamLoopSession {
    pub fn state(&self) -> DreamState {
        match (self.running, self.paused) {
            (false, _) => DreamState::Idle,
            (true, false) => DreamState::Running,
            (true, true) => DreamState::Paused,
        }
    }

    /// Back to idle. The log is kept.
    pub(crate) fn reset(&mut self) {
        self.running = false;
        self.paused = false;
        self.step_count = 0;
    }
}

/// Snapshot returned by `DreamLoop::status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DreamStatus {
    pub state: DreamState,
    pub step_count: u64,
    pub log_len: usize,
    pub session_id: Option<String>,
}

pub fn log_json(log: &[DreamLogEntry]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(log)?)
}

pub fn export_log(log: &[DreamLogEntry], dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(DREAM_LOG_FILE_NAME);
    fs::write(&path, log_json(log)?)?;
    Ok(path)
}
