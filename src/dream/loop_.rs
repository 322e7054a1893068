use super::session::{
    DreamLogEntry, DreamLoopSession, DreamStatus, export_log, log_json,
};
use crate::config::RitualConfig;
use crate::error::{ExportError, NetworkError};
use crate::events::StudioEvent;
use crate::service::{RitualKind, RitualService};
use crate::studio::Studio;
use crate::studio::orchestrator::request_for;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

/// Shortest accepted tick interval; shorter ones are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Sub-steps of every dream tick, in order.
pub const DREAM_SEQUENCE: [RitualKind; 3] =
    [RitualKind::Evolve, RitualKind::Mutate, RitualKind::Reflect];

/// How a single tick ended.
#[derive(Debug)]
enum TickOutcome {
    Completed,
    /// Paused; nothing was called.
    Skipped,
    /// The loop stopped or restarted while this tick was in flight.
    Discarded,
    Failed(NetworkError),
}

struct LoopShared {
    session: DreamLoopSession,
    /// Bumped on every start so results from an earlier session are ignored.
    generation: u64,
    session_id: Option<String>,
    timer: Option<JoinHandle<()>>,
}

impl LoopShared {
    fn is_live(&self, generation: u64) -> bool {
        self.session.running && self.generation == generation
    }

    fn teardown(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.session.reset();
    }
}

struct LoopCore {
    service: Arc<dyn RitualService>,
    studio: Arc<Studio>,
    params: RitualConfig,
    shared: Mutex<LoopShared>,
}

impl LoopCore {
    fn lock(&self) -> MutexGuard<'_, LoopShared> {
        self.shared
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Run evolve, mutate, reflect once for session `generation`.
    ///
    /// Each result is committed as it arrives. A result that lands after the
    /// session ended is dropped without touching any state.
    async fn tick(&self, generation: u64) -> TickOutcome {
        {
            let shared = self.lock();
            if !shared.is_live(generation) {
                return TickOutcome::Discarded;
            }
            if shared.session.paused {
                return TickOutcome::Skipped;
            }
        }

        for kind in DREAM_SEQUENCE {
            let request = request_for(kind, self.studio.current(), &self.params);
            let response = self.service.invoke(request).await;

            let mut shared = self.lock();
            if !shared.is_live(generation) {
                tracing::debug!(ritual = %kind, "discarding result from stopped dream session");
                return TickOutcome::Discarded;
            }

            match response {
                Ok(result) => {
                    let entry = DreamLogEntry::from_result(kind, &result);
                    self.studio.commit(result, kind.into());
                    shared.session.log.push(entry);
                }
                Err(err) => {
                    let session_id = shared.session_id.clone().unwrap_or_default();
                    shared.teardown();
                    drop(shared);
                    tracing::warn!(ritual = %kind, "dream loop stopped after failure");
                    self.studio.record_failure(&kind.to_string(), &err);
                    self.studio.emit(StudioEvent::DreamFailed {
                        ritual: kind,
                        message: err.to_string(),
                    });
                    self.studio.emit(StudioEvent::DreamStopped { session_id });
                    return TickOutcome::Failed(err);
                }
            }
        }

        let mut shared = self.lock();
        if !shared.is_live(generation) {
            return TickOutcome::Discarded;
        }
        shared.session.step_count += 1;
        let step = shared.session.step_count;
        drop(shared);

        tracing::info!(step, "dream step completed");
        self.studio.emit(StudioEvent::DreamStepCompleted { step });
        TickOutcome::Completed
    }
}

/// Autonomous evolve → mutate → reflect sequence on a fixed interval.
///
/// The repeating timer is a task owned here; `start` and `stop` are the only
/// operations that arm or cancel it. Ticks are spawned independently so a
/// slow tick can overlap the next one.
pub struct DreamLoop {
    core: Arc<LoopCore>,
    interval: Duration,
}

impl DreamLoop {
    pub fn new(
        service: Arc<dyn RitualService>,
        studio: Arc<Studio>,
        params: RitualConfig,
        interval: Duration,
    ) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        Self {
            core: Arc::new(LoopCore {
                service,
                studio,
                params,
                shared: Mutex::new(LoopShared {
                    session: DreamLoopSession::default(),
                    generation: 0,
                    session_id: None,
                    timer: None,
                }),
            }),
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a fresh session: arm the timer, then run one tick now.
    ///
    /// Later ticks fire every interval from the call, whether or not the
    /// first tick has resolved. Starting a running loop restarts it. Returns
    /// the first tick's failure, in which case the loop is already idle again.
    pub async fn start(&self) -> Result<(), NetworkError> {
        let (generation, session_id) = {
            let mut shared = self.core.lock();
            shared.teardown();
            shared.generation += 1;
            shared.session.running = true;
            let session_id = Uuid::new_v4().to_string();
            shared.session_id = Some(session_id.clone());
            (shared.generation, session_id)
        };

        tracing::info!(%session_id, interval_secs = self.interval.as_secs(), "dream loop started");
        self.core
            .studio
            .emit(StudioEvent::DreamStarted { session_id });

        self.arm_timer(generation);

        // The timer keeps its own schedule while the first tick is awaited.
        match self.core.tick(generation).await {
            TickOutcome::Failed(err) => Err(err),
            TickOutcome::Completed | TickOutcome::Skipped | TickOutcome::Discarded => Ok(()),
        }
    }

    fn arm_timer(&self, generation: u64) {
        let mut shared = self.core.lock();
        if !shared.is_live(generation) {
            return;
        }
        let core = Arc::clone(&self.core);
        let period = self.interval;
        let first = Instant::now() + period;
        shared.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let core = Arc::clone(&core);
                tokio::spawn(async move {
                    core.tick(generation).await;
                });
            }
        }));
    }

    /// Back to idle from any state. In-flight results will be discarded.
    pub fn stop(&self) {
        let session_id = {
            let mut shared = self.core.lock();
            let was_running = shared.session.running;
            shared.teardown();
            if !was_running {
                return;
            }
            shared.session_id.clone().unwrap_or_default()
        };
        tracing::info!(%session_id, "dream loop stopped");
        self.core
            .studio
            .emit(StudioEvent::DreamStopped { session_id });
    }

    /// Make ticks no-ops until `resume`. Idempotent; ignored when idle.
    pub fn pause(&self) {
        {
            let mut shared = self.core.lock();
            if !shared.session.running || shared.session.paused {
                return;
            }
            shared.session.paused = true;
        }
        tracing::info!("dream loop paused");
        self.core.studio.emit(StudioEvent::DreamPaused);
    }

    pub fn resume(&self) {
        {
            let mut shared = self.core.lock();
            if !shared.session.running || !shared.session.paused {
                return;
            }
            shared.session.paused = false;
        }
        tracing::info!("dream loop resumed");
        self.core.studio.emit(StudioEvent::DreamResumed);
    }

    pub fn status(&self) -> DreamStatus {
        let shared = self.core.lock();
        DreamStatus {
            state: shared.session.state(),
            step_count: shared.session.step_count,
            log_len: shared.session.log.len(),
            session_id: shared
                .session
                .running
                .then(|| shared.session_id.clone())
                .flatten(),
        }
    }

    pub fn log(&self) -> Vec<DreamLogEntry> {
        self.core.lock().session.log.clone()
    }

    pub fn clear_log(&self) {
        self.core.lock().session.log.clear();
    }

    pub fn log_json(&self) -> Result<String, ExportError> {
        log_json(&self.log())
    }

    pub fn export_log(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        export_log(&self.log(), dir)
    }
}

impl Drop for DreamLoop {
    fn drop(&mut self) {
        self.core.lock().teardown();
    }
}
