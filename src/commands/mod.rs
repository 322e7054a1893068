pub mod context;
pub mod handlers;
pub mod parser;
pub mod types;

pub use context::StudioContext;
pub use handlers::{handle_command, render_dream_status, render_entry, render_lineage};
pub use parser::parse_command;
pub use types::{Command, CommandResult, DreamAction};
