//! The dispatcher and the facade contract it feeds.

use crate::{MethodCall, ProxyResult};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The shared routing function a binding installs. Every facade method call
/// lands here, synchronously.
pub type RouteFn = dyn Fn(&MethodCall) -> ProxyResult<Value> + Send + Sync;

/// Forwards facade calls to one shared route.
///
/// The dispatcher owns no state beyond the route handle; cloning it clones
/// the handle, not the route. All caching, validation, and lookup semantics
/// belong to the route itself.
#[derive(Clone)]
pub struct Dispatcher {
    route: Arc<RouteFn>,
}

impl Dispatcher {
    /// Wraps a routing function.
    pub fn new<F>(route: F) -> Self
    where
        F: Fn(&MethodCall) -> ProxyResult<Value> + Send + Sync + 'static,
    {
        Self {
            route: Arc::new(route),
        }
    }

    /// Forwards one call to the route.
    pub fn dispatch(&self, call: &MethodCall) -> ProxyResult<Value> {
        (self.route)(call)
    }

    /// Convenience for building and dispatching a call in one step.
    pub fn call(&self, name: &str, args: Vec<Value>) -> ProxyResult<Value> {
        self.dispatch(&MethodCall::with_args(name, args))
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

/// The capability contract a binding target must implement to be proxied.
///
/// Implementations are hand-written facades: each method body forwards to the
/// dispatcher. A type that cannot construct itself from a dispatcher has no
/// proxyable form.
pub trait Facade: Sized {
    /// Builds the live instance around the binding's dispatcher.
    fn from_dispatcher(dispatcher: Dispatcher) -> Self;
}

/// Synthesizes a live facade instance whose every method is routed through
/// `route`.
pub fn create_proxy<T, F>(route: F) -> T
where
    T: Facade,
    F: Fn(&MethodCall) -> ProxyResult<Value> + Send + Sync + 'static,
{
    T::from_dispatcher(Dispatcher::new(route))
}
