//! Shared glyph state: current artifact, ghost preview, lineage, suggestions.
//!
//! The orchestrator and the dream loop hold the same `Arc<Studio>` and mutate
//! it only through the methods here, each of which runs under one lock and
//! never across an `.await`.

pub mod orchestrator;
pub mod state;

pub use orchestrator::{RitualOrchestrator, RitualOutcome};
pub use state::{ArtifactState, GhostPreview, Insight, Mode, StudioState};

use crate::error::{IndexError, NetworkError};
use crate::events::{EventReceiver, EventSender, StudioEvent, event_bus};
use crate::lineage::{LineageEntry, RitualTag};
use crate::service::{Artifact, RitualKind, RitualResult};
use crate::suggest::{Suggestion, suggest};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

const EVENT_CAPACITY: usize = 256;
pub const DEFAULT_INSIGHT_TTL: Duration = Duration::from_millis(3500);

pub struct Studio {
    state: Arc<Mutex<StudioState>>,
    events: EventSender,
    insight_ttl: Duration,
}

impl Studio {
    pub fn new(insight_ttl: Duration) -> Self {
        let (events, _rx) = event_bus(EVENT_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(StudioState::default())),
            events,
            insight_ttl,
        }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, StudioState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub(crate) fn emit(&self, event: StudioEvent) {
        let _ = self.events.send(event);
    }

    /// Read the state under the lock.
    pub fn with_state<R>(&self, read: impl FnOnce(&StudioState) -> R) -> R {
        read(&*self.lock())
    }

    pub fn current(&self) -> Option<Artifact> {
        self.lock().artifact.current.clone()
    }

    pub fn ghost(&self) -> Option<GhostPreview> {
        self.lock().artifact.ghost.clone()
    }

    pub fn lineage(&self) -> Vec<LineageEntry> {
        self.lock().lineage.all().to_vec()
    }

    pub fn lineage_len(&self) -> usize {
        self.lock().lineage.len()
    }

    pub fn entry(&self, index: usize) -> Result<LineageEntry, IndexError> {
        self.lock().lineage.at(index).cloned()
    }

    pub fn mode(&self) -> Mode {
        self.lock().mode
    }

    pub fn set_mode(&self, mode: Mode) {
        self.lock().mode = mode;
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.lock().suggestions.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.lock().last_error = None;
    }

    pub fn insight(&self) -> Option<Insight> {
        self.lock().insight.clone()
    }

    /// Make `result` current and append it tagged `ritual`. Returns the new
    /// entry's index.
    pub fn commit(&self, result: RitualResult, ritual: RitualTag) -> usize {
        self.append(LineageEntry::from_result(result, ritual))
    }

    /// Append `entry`, make it current, and re-derive suggestions.
    fn append(&self, entry: LineageEntry) -> usize {
        let insight = entry.insight.clone();
        let ritual = entry.ritual;
        let (index, suggestion_count) = {
            let mut state = self.lock();
            state.artifact.current = Some(entry.artifact());
            let index = state.lineage.append(entry) - 1;
            let suggestions = suggest(state.lineage.all());
            let changed = suggestions != state.suggestions;
            state.suggestions = suggestions;
            (index, changed.then_some(state.suggestions.len()))
        };

        tracing::info!(index, %ritual, "lineage entry appended");
        self.emit(StudioEvent::LineageAppended { index, ritual });
        if let Some(count) = suggestion_count {
            self.emit(StudioEvent::SuggestionsChanged { count });
        }
        if let Some(text) = insight {
            self.raise_insight(text);
        }
        index
    }

    /// Hold `result` as the ghost preview, replacing any earlier one.
    pub fn preview(&self, result: RitualResult, kind: RitualKind) {
        let entry = LineageEntry::from_result(result, kind.into());
        self.lock().artifact.ghost = Some(GhostPreview { kind, entry });
        self.emit(StudioEvent::GhostPreviewed { ritual: kind });
    }

    /// Commit the ghost with a fresh timestamp. `None` when there is no ghost.
    pub fn commit_ghost(&self) -> Option<usize> {
        let ghost = self.lock().artifact.ghost.take()?;
        let mut entry = ghost.entry;
        entry.timestamp = Utc::now();
        Some(self.append(entry))
    }

    /// Drop the ghost. Returns whether one existed.
    pub fn cancel_ghost(&self) -> bool {
        let discarded = self.lock().artifact.ghost.take().is_some();
        if discarded {
            self.emit(StudioEvent::GhostDiscarded);
        }
        discarded
    }

    /// Make entry `index` current again, recorded as a new `manual` entry.
    pub fn restore(&self, index: usize) -> Result<usize, IndexError> {
        let artifact = self.lock().lineage.at(index)?.artifact();
        Ok(self.append(LineageEntry::restored(artifact)))
    }

    /// Report a failed ritual on the shared error channel.
    pub fn record_failure(&self, ritual: &str, err: &NetworkError) {
        tracing::warn!(ritual, "ritual failed: {err}");
        self.lock().last_error = Some(err.to_string());
        self.emit(StudioEvent::RitualFailed {
            ritual: ritual.to_string(),
            message: err.to_string(),
        });
    }

    /// Surface an insight and clear it after the TTL unless a newer one
    /// replaced it first.
    fn raise_insight(&self, text: String) {
        let seq = {
            let mut state = self.lock();
            state.insight_seq += 1;
            let seq = state.insight_seq;
            state.insight = Some(Insight {
                text: text.clone(),
                raised_at: Utc::now(),
                seq,
            });
            seq
        };
        self.emit(StudioEvent::InsightRaised { text });

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let ttl = self.insight_ttl;
        runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            let cleared = {
                let mut state = state
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                let current = state.insight.as_ref().is_some_and(|i| i.seq == seq);
                if current {
                    state.insight = None;
                }
                current
            };
            if cleared {
                let _ = events.send(StudioEvent::InsightCleared);
            }
        });
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(DEFAULT_INSIGHT_TTL)
    }
}
