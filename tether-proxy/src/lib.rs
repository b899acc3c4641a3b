//! Call-descriptor dispatch for Tether bindings.
//!
//! A binding turns a declared capability (a trait) into a live instance whose
//! every method forwards to one shared routing function. This crate owns that
//! mechanism and nothing else: the dispatcher performs no caching and no
//! validation — all semantics live in the route a binding installs.
//!
//! The live instance is a hand-written facade: a struct implementing the
//! capability trait whose method bodies each build a [`MethodCall`] and hand
//! it to the shared [`Dispatcher`]. Concrete data types have no facade form
//! and cannot be proxied.

mod call;
mod dispatch;
mod registry;

pub use call::MethodCall;
pub use dispatch::{create_proxy, Dispatcher, Facade};
pub use registry::FacadeRegistry;

/// Result type alias using the crate's error type.
pub type ProxyResult<T> = std::result::Result<T, ProxyError>;

/// Errors raised by proxy construction and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The binding target is not a registered capability. Configuration
    /// error, fatal at binding-construction time.
    #[error("target {0:?} is not a proxyable capability")]
    UnsupportedTarget(String),

    /// A facade method was invoked that the binding never declared.
    /// Programmer error, surfaced immediately.
    #[error("method {name:?} is not registered on this binding")]
    UnregisteredMethod { name: String },

    /// A declared method was invoked with the wrong number of arguments.
    /// Programmer error, surfaced immediately.
    #[error("method {name:?} expects {expected} argument(s), got {actual}")]
    InvalidArity {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// The route function failed while servicing a call. The boxed source
    /// keeps the underlying error downcastable on the caller's side.
    #[error("dispatch failed: {0}")]
    Dispatch(Box<dyn std::error::Error + Send + Sync>),
}

impl ProxyError {
    /// Wraps a route-level failure, preserving it for downcast.
    pub fn dispatch(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Dispatch(Box::new(source))
    }
}
