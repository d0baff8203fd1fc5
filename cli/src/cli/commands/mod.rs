//! Command implementations.

pub mod auth;
pub mod setup;
pub mod shell;

pub use auth::{handle_logout, handle_status};
pub use setup::handle_setup;
pub use shell::handle_completions;
