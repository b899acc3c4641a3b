//! File-backed configuration bindings.
//!
//! A configuration binding keeps a typed facade, an in-memory key tree, and a
//! persisted document mutually consistent:
//! - [`PathStore`] holds the tree and answers dotted-path reads and writes
//! - [`DocumentCodec`] moves the tree to and from disk (JSON or TOML)
//! - [`ReloadScheduler`] / [`SaveScheduler`] are the two independent
//!   background tasks keeping each direction eventually consistent
//! - [`ConfigExecutor`] wires all of it behind a [`tether_proxy::Dispatcher`]
//!
//! The executor fails fast on misconfiguration (missing capability, bad
//! descriptor); transient I/O trouble inside a scheduled tick is contained,
//! logged, and retried on the next tick.

mod codec;
mod descriptor;
mod executor;
mod facade;
mod scheduler;
mod store;

pub use codec::{DocumentCodec, JsonCodec, TomlCodec};
pub use descriptor::{ConfigDescriptor, ConfigDescriptorBuilder, ValueBinding};
pub use executor::ConfigExecutor;
pub use facade::ConfigLifecycle;
pub use scheduler::{ReloadScheduler, SaveScheduler};
pub use store::PathStore;

use tether_proxy::ProxyError;
use tether_types::KeyPath;

/// Result type alias using the crate's error type.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur in configuration bindings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The path is absent from the tree and no default is declared.
    #[error("missing key: {0}")]
    MissingKey(KeyPath),

    /// The stored value cannot be coerced to the requested type.
    #[error("type mismatch at {path}: stored value is not {requested}")]
    TypeMismatch {
        path: KeyPath,
        requested: &'static str,
    },

    /// The backing document exists but cannot be decoded.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The binding descriptor is invalid.
    #[error("invalid descriptor: {0}")]
    Descriptor(String),

    /// An invalid key path reached the binding.
    #[error(transparent)]
    Path(#[from] tether_types::Error),

    /// A proxy-level failure that is not a configuration error.
    #[error(transparent)]
    Proxy(ProxyError),
}

impl From<ConfigError> for ProxyError {
    fn from(e: ConfigError) -> Self {
        ProxyError::dispatch(e)
    }
}

// Restores configuration error identity across the proxy boundary: a
// `Dispatch` whose source is a `ConfigError` unwraps back to it.
impl From<ProxyError> for ConfigError {
    fn from(e: ProxyError) -> Self {
        match e {
            ProxyError::Dispatch(inner) => match inner.downcast::<ConfigError>() {
                Ok(config) => *config,
                Err(other) => ConfigError::Proxy(ProxyError::Dispatch(other)),
            },
            other => ConfigError::Proxy(other),
        }
    }
}
