use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// A ritual the glyph service can perform on the current glyph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RitualKind {
    Evolve,
    Mutate,
    Reflect,
    Compress,
}

impl RitualKind {
    pub const ALL: [Self; 4] = [Self::Evolve, Self::Mutate, Self::Reflect, Self::Compress];

    /// One-line explanation shown next to the ritual in front ends.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Evolve => {
                "Evolve will iterate this glyph using the current grammar and create a new variant."
            }
            Self::Mutate => {
                "Mutate will introduce random changes to the glyph, exploring new forms."
            }
            Self::Reflect => "Reflect asks the oracle for an insight about the current glyph.",
            Self::Compress => {
                "Compress will deduplicate and shrink the glyph for efficient storage."
            }
        }
    }
}

/// Wire format requested from the glyph service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RitualFormat {
    Svg,
    #[default]
    Json,
}

/// The glyph in both of its forms: renderable svg text and opaque structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub svg: String,
    pub glyph: Value,
}

impl Artifact {
    pub fn new(svg: impl Into<String>, glyph: Value) -> Self {
        Self {
            svg: svg.into(),
            glyph,
        }
    }
}

/// Typed request payload, one variant per remote operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RitualRequest {
    Generate {
        steps: u32,
        grammar: String,
    },
    Evolve {
        steps: u32,
        grammar: String,
        format: RitualFormat,
    },
    Mutate {
        glyph: Value,
        format: RitualFormat,
    },
    Compress {
        artifact: Artifact,
    },
    Reflect {
        artifact: Artifact,
    },
}

impl RitualRequest {
    /// The ritual this request performs; `None` for the seeding generate call.
    pub fn kind(&self) -> Option<RitualKind> {
        match self {
            Self::Generate { .. } => None,
            Self::Evolve { .. } => Some(RitualKind::Evolve),
            Self::Mutate { .. } => Some(RitualKind::Mutate),
            Self::Compress { .. } => Some(RitualKind::Compress),
            Self::Reflect { .. } => Some(RitualKind::Reflect),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::Evolve { .. } => "evolve",
            Self::Mutate { .. } => "mutate",
            Self::Compress { .. } => "compress",
            Self::Reflect { .. } => "reflect",
        }
    }
}

/// Ritual-agnostic result returned by every service call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RitualResult {
    pub svg: String,
    pub glyph: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed: Option<Value>,
}

impl RitualResult {
    pub fn artifact(&self) -> Artifact {
        Artifact::new(self.svg.clone(), self.glyph.clone())
    }

    pub fn from_artifact(artifact: Artifact) -> Self {
        Self {
            svg: artifact.svg,
            glyph: artifact.glyph,
            insight: None,
            compressed: None,
        }
    }
}
