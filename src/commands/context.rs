use crate::config::Config;
use crate::dream::DreamLoop;
use crate::service::{HttpRitualClient, RitualService};
use crate::studio::{RitualOrchestrator, Studio};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a front end drives: one studio shared by the manual
/// orchestrator and the dream loop.
pub struct StudioContext {
    pub orchestrator: RitualOrchestrator,
    pub dream: DreamLoop,
    pub export_dir: PathBuf,
}

impl StudioContext {
    pub fn new(service: Arc<dyn RitualService>, config: &Config) -> Self {
        let studio = Arc::new(Studio::new(config.dream.insight_ttl()));
        let orchestrator = RitualOrchestrator::new(
            Arc::clone(&service),
            Arc::clone(&studio),
            config.ritual.clone(),
        );
        let dream = DreamLoop::new(
            service,
            studio,
            config.ritual.clone(),
            config.dream.interval(),
        );
        Self {
            orchestrator,
            dream,
            export_dir: config.export_dir.clone(),
        }
    }

    /// Wire the context to the HTTP glyph service named in `config`.
    pub fn from_config(config: &Config) -> Self {
        let client = HttpRitualClient::from_config(&config.service);
        tracing::debug!(service = client.name(), base_url = client.base_url(), "using glyph service");
        Self::new(Arc::new(client), config)
    }

    pub fn studio(&self) -> &Arc<Studio> {
        self.orchestrator.studio()
    }
}
