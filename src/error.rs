use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `glyphcodex`.
///
/// Ritual failures surface as [`NetworkError`]; lineage lookups fail with
/// [`IndexError`]. The binary wraps these in `anyhow` for context chains.
#[derive(Debug, Error)]
pub enum GlyphError {
    // ── Remote glyph service ────────────────────────────────────────────
    #[error("network: {0}")]
    Network(#[from] NetworkError),

    // ── Lineage access ──────────────────────────────────────────────────
    #[error("lineage: {0}")]
    Index(#[from] IndexError),

    // ── Config ──────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Export ──────────────────────────────────────────────────────────
    #[error("export: {0}")]
    Export(#[from] ExportError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Network errors ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("{ritual} request failed: {message}")]
    Transport { ritual: String, message: String },

    #[error("{ritual} returned HTTP {status}: {body}")]
    Status {
        ritual: String,
        status: u16,
        body: String,
    },

    #[error("{ritual} response could not be decoded: {message}")]
    Decode { ritual: String, message: String },
}

impl NetworkError {
    pub fn transport(ritual: impl ToString, err: &reqwest::Error) -> Self {
        Self::Transport {
            ritual: ritual.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(ritual: impl ToString, message: impl Into<String>) -> Self {
        Self::Decode {
            ritual: ritual.to_string(),
            message: message.into(),
        }
    }
}

// ─── Lineage errors ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("index {index} out of bounds for lineage of length {len}")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Export errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, GlyphError>;
