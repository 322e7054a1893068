use super::{Mode, Studio};
use crate::config::RitualConfig;
use crate::error::{IndexError, NetworkError};
use crate::lineage::RitualTag;
use crate::service::{Artifact, RitualKind, RitualRequest, RitualService};
use crate::suggest::Suggestion;
use serde_json::Value;
use std::sync::Arc;

/// What a successful `run_ritual` did with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RitualOutcome {
    /// Live mode: appended at this lineage index.
    Committed { index: usize },
    /// Test mode: held as the ghost preview.
    Previewed,
}

/// Build the typed request for `kind` against the current artifact.
pub(crate) fn request_for(
    kind: RitualKind,
    current: Option<Artifact>,
    params: &RitualConfig,
) -> RitualRequest {
    match kind {
        RitualKind::Evolve => RitualRequest::Evolve {
            steps: params.steps,
            grammar: params.grammar.clone(),
            format: params.format,
        },
        RitualKind::Mutate => RitualRequest::Mutate {
            glyph: current.map_or(Value::Null, |a| a.glyph),
            format: params.format,
        },
        RitualKind::Compress => RitualRequest::Compress {
            artifact: current.unwrap_or_default(),
        },
        RitualKind::Reflect => RitualRequest::Reflect {
            artifact: current.unwrap_or_default(),
        },
    }
}

/// Runs manual rituals against the shared [`Studio`].
pub struct RitualOrchestrator {
    service: Arc<dyn RitualService>,
    studio: Arc<Studio>,
    params: RitualConfig,
}

impl RitualOrchestrator {
    pub fn new(service: Arc<dyn RitualService>, studio: Arc<Studio>, params: RitualConfig) -> Self {
        Self {
            service,
            studio,
            params,
        }
    }

    pub fn studio(&self) -> &Arc<Studio> {
        &self.studio
    }

    pub fn mode(&self) -> Mode {
        self.studio.mode()
    }

    pub fn set_mode(&self, mode: Mode) {
        tracing::info!(%mode, "interaction mode changed");
        self.studio.set_mode(mode);
    }

    /// Seed the studio with a generated glyph as entry 0 (`init`).
    ///
    /// Does nothing once a current glyph exists. On failure the studio stays
    /// unseeded and the error is reported.
    pub async fn seed(&self) -> Result<(), NetworkError> {
        if self.studio.current().is_some() {
            tracing::debug!("studio already seeded");
            return Ok(());
        }

        let request = RitualRequest::Generate {
            steps: self.params.steps,
            grammar: self.params.grammar.clone(),
        };
        match self.service.invoke(request).await {
            Ok(result) => {
                self.studio.clear_error();
                self.studio.commit(result, RitualTag::Init);
                Ok(())
            }
            Err(err) => {
                self.studio.record_failure("init", &err);
                Err(err)
            }
        }
    }

    /// Run `kind` once. Live mode commits, Test mode previews.
    pub async fn run_ritual(&self, kind: RitualKind) -> Result<RitualOutcome, NetworkError> {
        let mode = self.studio.mode();
        let request = request_for(kind, self.studio.current(), &self.params);

        let result = match self.service.invoke(request).await {
            Ok(result) => result,
            Err(err) => {
                self.studio.record_failure(&kind.to_string(), &err);
                return Err(err);
            }
        };

        self.studio.clear_error();
        match mode {
            Mode::Live => Ok(RitualOutcome::Committed {
                index: self.studio.commit(result, kind.into()),
            }),
            Mode::Test => {
                self.studio.preview(result, kind);
                Ok(RitualOutcome::Previewed)
            }
        }
    }

    /// Run the ritual a suggestion recommends.
    pub async fn run_suggestion(
        &self,
        suggestion: &Suggestion,
    ) -> Result<RitualOutcome, NetworkError> {
        self.run_ritual(suggestion.ritual).await
    }

    /// Commit the ghost preview. `None` if there was nothing to commit.
    pub fn commit(&self) -> Option<usize> {
        self.studio.commit_ghost()
    }

    /// Discard the ghost preview. No-op without one.
    pub fn cancel(&self) -> bool {
        self.studio.cancel_ghost()
    }

    pub fn restore(&self, index: usize) -> Result<usize, IndexError> {
        self.studio.restore(index)
    }
}
