pub mod dispatch;
pub mod shell;
pub mod status;
