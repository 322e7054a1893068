pub mod entry;
pub mod export;
pub mod store;

pub use entry::{LineageEntry, RitualTag};
pub use export::{HISTORY_FILE_NAME, export_entry, export_history, history_json};
pub use store::LineageStore;
