#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use glyphcodex::config::RitualConfig;
use glyphcodex::dream::DreamLoop;
use glyphcodex::error::NetworkError;
use glyphcodex::service::{RitualFuture, RitualRequest, RitualResult, RitualService};
use glyphcodex::studio::{RitualOrchestrator, Studio};

pub const DREAM_INTERVAL: Duration = Duration::from_secs(5);

/// In-memory glyph service. Every call yields a glyph numbered by call order;
/// rituals named in `fail` answer with HTTP 500 instead.
#[derive(Default)]
pub struct ScriptedService {
    counter: AtomicUsize,
    requests: Mutex<Vec<RitualRequest>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl ScriptedService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, label: &'static str) {
        self.failing.lock().unwrap().insert(label);
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn requests(&self) -> Vec<RitualRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

impl RitualService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    fn invoke<'a>(&'a self, request: RitualRequest) -> RitualFuture<'a> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let label = request.label();
        self.requests.lock().unwrap().push(request.clone());

        let response = if self.failing.lock().unwrap().contains(label) {
            Err(NetworkError::Status {
                ritual: label.to_string(),
                status: 500,
                body: "scripted failure".into(),
            })
        } else {
            Ok(match request {
                RitualRequest::Reflect { artifact } => {
                    let mut result = RitualResult::from_artifact(artifact);
                    result.insight = Some(format!("insight {n}"));
                    result
                }
                RitualRequest::Compress { artifact } => {
                    let mut result = RitualResult::from_artifact(artifact);
                    result.compressed = Some(json!({ "size": n }));
                    result
                }
                _ => RitualResult {
                    svg: format!("<svg id=\"{label}-{n}\"/>"),
                    glyph: json!({ "ritual": label, "n": n }),
                    ..RitualResult::default()
                },
            })
        };
        Box::pin(async move { response })
    }
}

pub struct Rig {
    pub service: Arc<ScriptedService>,
    pub studio: Arc<Studio>,
    pub orchestrator: RitualOrchestrator,
    pub dream: DreamLoop,
}

pub fn rig() -> Rig {
    let service = ScriptedService::new();
    let studio = Arc::new(Studio::default());
    let orchestrator = RitualOrchestrator::new(
        Arc::clone(&service) as Arc<dyn RitualService>,
        Arc::clone(&studio),
        RitualConfig::default(),
    );
    let dream = DreamLoop::new(
        Arc::clone(&service) as Arc<dyn RitualService>,
        Arc::clone(&studio),
        RitualConfig::default(),
        DREAM_INTERVAL,
    );
    Rig {
        service,
        studio,
        orchestrator,
        dream,
    }
}

/// A rig whose studio already holds the seeded `init` entry.
pub async fn seeded_rig() -> Rig {
    let rig = rig();
    rig.orchestrator.seed().await.unwrap();
    rig
}
