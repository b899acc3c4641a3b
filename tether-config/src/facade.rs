//! The lifecycle surface every configuration facade carries.
//!
//! Typed facades add their own declared accessors on top; the methods here
//! are the fixed set the executor's route special-cases by name and arity.

use crate::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tether_proxy::Dispatcher;
use tether_types::KeyPath;

/// Lifecycle operations available on any configuration facade.
///
/// Implementors only provide [`dispatcher`](Self::dispatcher); everything
/// else forwards through it, exactly like the declared accessors do.
pub trait ConfigLifecycle {
    /// The binding's dispatcher.
    fn dispatcher(&self) -> &Dispatcher;

    /// Flushes the in-memory tree to the backing document now.
    fn save(&self) -> ConfigResult<bool> {
        let value = self.dispatcher().call("save", Vec::new())?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Replaces the in-memory tree from the backing document now.
    fn reload(&self) -> ConfigResult<bool> {
        let value = self.dispatcher().call("reload", Vec::new())?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Reads the raw value at a dotted path.
    fn get(&self, path: &str) -> ConfigResult<Value> {
        Ok(self.dispatcher().call("get", vec![json!(path)])?)
    }

    /// Reads and coerces the value at a dotted path.
    fn get_as<T: DeserializeOwned>(&self, path: &str) -> ConfigResult<T> {
        let key = KeyPath::parse(path)?;
        let value = self
            .dispatcher()
            .call("get", vec![json!(path), json!(std::any::type_name::<T>())])?;
        serde_json::from_value(value).map_err(|_| ConfigError::TypeMismatch {
            path: key.clone(),
            requested: std::any::type_name::<T>(),
        })
    }

    /// Writes a value at a dotted path, in memory only.
    fn set(&self, path: &str, value: impl Into<Value>) -> ConfigResult<()> {
        self.dispatcher()
            .call("set", vec![json!(path), value.into()])?;
        Ok(())
    }

    /// Writes a value and forces an immediate write-through to disk.
    fn set_and_save(&self, path: &str, value: impl Into<Value>) -> ConfigResult<bool> {
        let result = self
            .dispatcher()
            .call("set", vec![json!(path), value.into(), json!(true)])?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// A human-readable identity for the binding behind this facade.
    fn describe(&self) -> ConfigResult<String> {
        let value = self.dispatcher().call("describe", Vec::new())?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }
}
