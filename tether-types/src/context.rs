//! Binding context — the host-environment handle consumed at binding startup.

use crate::Error;
use tokio::runtime::Handle;

/// Execution context resolved once when a binding is executed.
///
/// Carries the handle of the host runtime that background schedulers register
/// their periodic tasks on. The core never creates threads of its own;
/// everything long-running is spawned through this handle.
#[derive(Debug, Clone)]
pub struct BindingContext {
    runtime: Handle,
}

impl BindingContext {
    /// Creates a context around an explicit runtime handle.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Resolves the context from the currently running runtime.
    ///
    /// Fails with [`Error::NoRuntime`] when called outside a runtime instead
    /// of panicking, so binding construction can surface the misconfiguration.
    pub fn current() -> crate::Result<Self> {
        Handle::try_current()
            .map(|runtime| Self { runtime })
            .map_err(|e| Error::NoRuntime(e.to_string()))
    }

    /// Returns the runtime handle schedulers spawn onto.
    #[must_use]
    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }
}
