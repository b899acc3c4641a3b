//! Declared command metadata and the method registrar contract.
//!
//! The command subsystem itself (dispatch trees, permission evaluation,
//! usage text) lives outside the core. What lives here is the handoff: a
//! registry of declared command handlers, and a registrar that walks every
//! discovered method and delivers the (method, owning handler, command)
//! triple to whatever registration callback the host installs.

mod registrar;
mod spec;

pub use registrar::{CommandHandler, CommandRegistry, Registrar};
pub use spec::{CommandSpec, SubcommandSpec};

/// Result type alias using the crate's error type.
pub type CommandResult<T> = std::result::Result<T, CommandError>;

/// Errors that can occur during command registration.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A command name was declared by more than one handler.
    #[error("command {0:?} is already registered")]
    Duplicate(String),
}
