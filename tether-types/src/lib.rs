//! Core type definitions for Tether.
//!
//! This crate defines the fundamental, binding-agnostic types used throughout
//! the runtime:
//! - Dotted key paths for addressing values in a configuration tree
//! - The binding context that resolves host-environment handles
//!
//! Everything binding-specific (descriptors, stores, schemas) belongs in the
//! crate that owns that binding kind, not here.

mod context;
mod path;

pub use context::BindingContext;
pub use path::KeyPath;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid key path: {0}")]
    InvalidPath(String),

    #[error("no host runtime available: {0}")]
    NoRuntime(String),
}
