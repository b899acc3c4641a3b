//! Dynamic facade construction for bindings resolved by target name.
//!
//! The annotation scanner hands the runtime target *names*, not types. This
//! registry is the bridge: capabilities register a factory once, and a
//! binding executed against an unregistered name fails fast with
//! `UnsupportedTarget`.

use crate::{Dispatcher, Facade, ProxyError, ProxyResult};
use std::any::Any;
use std::collections::BTreeMap;

type FactoryFn = Box<dyn Fn(Dispatcher) -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// Maps declared capability names to facade factories.
#[derive(Default)]
pub struct FacadeRegistry {
    factories: BTreeMap<String, FactoryFn>,
}

impl FacadeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a capability under a target name. Re-registering a name
    /// replaces the previous factory.
    pub fn register<T>(&mut self, target: impl Into<String>)
    where
        T: Facade + Send + Sync + 'static,
    {
        self.factories.insert(
            target.into(),
            Box::new(|dispatcher| Box::new(T::from_dispatcher(dispatcher))),
        );
    }

    /// Returns whether a target name has a registered facade form.
    #[must_use]
    pub fn contains(&self, target: &str) -> bool {
        self.factories.contains_key(target)
    }

    /// Instantiates the facade registered under `target`.
    ///
    /// Fails with [`ProxyError::UnsupportedTarget`] when the name was never
    /// registered as a capability.
    pub fn instantiate(
        &self,
        target: &str,
        dispatcher: Dispatcher,
    ) -> ProxyResult<Box<dyn Any + Send + Sync>> {
        let factory = self
            .factories
            .get(target)
            .ok_or_else(|| ProxyError::UnsupportedTarget(target.to_string()))?;
        Ok(factory(dispatcher))
    }
}

impl std::fmt::Debug for FacadeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacadeRegistry")
            .field("targets", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
