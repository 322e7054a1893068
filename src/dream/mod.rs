//! Dream loop: evolve, mutate and reflect on a timer without user input.

mod loop_;
mod session;

pub use loop_::{DREAM_SEQUENCE, DreamLoop, MIN_INTERVAL};
pub use session::{
    DREAM_LOG_FILE_NAME, DreamLogEntry, DreamLoopSession, DreamState, DreamStatus, export_log,
    log_json,
};
