#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod commands;
pub mod config;
pub mod dream;
pub mod error;
pub mod events;
pub mod lineage;
pub mod service;
pub mod studio;
pub mod suggest;
pub mod ui;

pub use commands::StudioContext;
pub use config::Config;
pub use dream::DreamLoop;
pub use error::{GlyphError, NetworkError};
pub use studio::{RitualOrchestrator, Studio};
