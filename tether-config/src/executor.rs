//! The configuration binding executor — the public surface that turns a
//! descriptor into a live, scheduler-backed binding.

use crate::descriptor::ConfigDescriptor;
use crate::scheduler::{ReloadScheduler, SaveScheduler};
use crate::store::PathStore;
use crate::{ConfigError, ConfigResult};
use serde_json::{json, Map, Value};
use std::fs;
use std::sync::Arc;
use tether_proxy::{Dispatcher, Facade, MethodCall, ProxyError, ProxyResult};
use tether_types::{BindingContext, KeyPath};
use tracing::info;

/// Owns one configuration binding: the store, both schedulers, and the
/// dispatch route facades are built on.
///
/// Construction fails fast on anything structural — a missing document that
/// cannot be materialized, a malformed document, a bad descriptor. After
/// that, runtime I/O trouble stays inside the schedulers.
#[derive(Debug)]
pub struct ConfigExecutor {
    descriptor: ConfigDescriptor,
    store: Arc<PathStore>,
    reload: ReloadScheduler,
    save: SaveScheduler,
}

impl ConfigExecutor {
    /// Executes the binding: ensures the backing document exists
    /// (materializing the bundled default when absent), builds the store,
    /// and starts both schedulers on the context's runtime.
    pub fn execute(descriptor: ConfigDescriptor, ctx: &BindingContext) -> ConfigResult<Self> {
        ensure_document(&descriptor)?;
        let store = Arc::new(PathStore::open(&descriptor)?);

        let reload = ReloadScheduler::new(Arc::clone(&store), descriptor.reload_interval_secs());
        let save = SaveScheduler::new(Arc::clone(&store), descriptor.save_interval_secs());
        reload.start(ctx);
        save.start(ctx);

        info!(
            "configuration binding started for {}",
            descriptor.path().display()
        );
        Ok(Self {
            descriptor,
            store,
            reload,
            save,
        })
    }

    /// The store backing this binding.
    #[must_use]
    pub fn store(&self) -> &Arc<PathStore> {
        &self.store
    }

    /// A human-readable identity for this binding.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("ConfigBinding({})", self.descriptor.path().display())
    }

    /// Builds the dispatcher routing facade calls into this binding.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher {
        let store = Arc::clone(&self.store);
        let descriptor = self.descriptor.clone();
        let identity = self.describe();
        Dispatcher::new(move |call| route(&store, &descriptor, &identity, call))
    }

    /// Synthesizes a typed facade over this binding.
    #[must_use]
    pub fn proxy<T: Facade>(&self) -> T {
        T::from_dispatcher(self.dispatcher())
    }

    /// Stops both schedulers. In-flight ticks complete; nothing further
    /// fires. Idempotent.
    pub fn shutdown(&self) {
        self.reload.stop();
        self.save.stop();
    }
}

impl Drop for ConfigExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Creates the backing document when absent: bundled default text verbatim,
/// or an empty tree through the codec. Parent directories are created as
/// needed.
fn ensure_document(descriptor: &ConfigDescriptor) -> ConfigResult<()> {
    let path = descriptor.path();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    match descriptor.default_document() {
        Some(text) => fs::write(path, text)?,
        None => descriptor.codec().store(path, &Value::Object(Map::new()))?,
    }
    info!("created configuration document {}", path.display());
    Ok(())
}

/// The binding's route: lifecycle names are special-cased by name and arity
/// and delegate straight to the store; everything else must be a declared
/// value accessor with arity zero.
fn route(
    store: &PathStore,
    descriptor: &ConfigDescriptor,
    identity: &str,
    call: &MethodCall,
) -> ProxyResult<Value> {
    match (call.name(), call.arity()) {
        // Identity is answered without touching the store.
        ("describe", 0) => Ok(json!(identity)),
        ("save", 0) => Ok(json!(store.save())),
        ("reload", 0) => Ok(json!(store.reload())),
        ("get", 1) => {
            let path = path_arg(call, 0)?;
            Ok(store.get(&path)?)
        }
        // Typed get: the route hands back the raw value; coercion happens at
        // the typed facade edge, where the concrete type is known.
        ("get", 2) => {
            let path = path_arg(call, 0)?;
            Ok(store.get(&path)?)
        }
        ("set", 2) => {
            let path = path_arg(call, 0)?;
            store.set(&path, call.args()[1].clone());
            Ok(Value::Null)
        }
        ("set", 3) => {
            let path = path_arg(call, 0)?;
            let persist = call.args()[2].as_bool().ok_or_else(|| {
                ProxyError::dispatch(ConfigError::Descriptor(
                    "set persist flag must be a boolean".to_string(),
                ))
            })?;
            if persist {
                Ok(json!(store.set_and_save(&path, call.args()[1].clone())))
            } else {
                store.set(&path, call.args()[1].clone());
                Ok(Value::Null)
            }
        }
        (name, arity) => {
            let binding = descriptor
                .binding(name)
                .ok_or_else(|| ProxyError::UnregisteredMethod {
                    name: name.to_string(),
                })?;
            if arity != 0 {
                return Err(ProxyError::InvalidArity {
                    name: name.to_string(),
                    expected: 0,
                    actual: arity,
                });
            }
            Ok(store.get(&binding.path)?)
        }
    }
}

fn path_arg(call: &MethodCall, index: usize) -> ProxyResult<KeyPath> {
    let raw = call.args()[index].as_str().ok_or_else(|| {
        ProxyError::dispatch(ConfigError::Descriptor(
            "path argument must be a string".to_string(),
        ))
    })?;
    KeyPath::parse(raw).map_err(|e| ProxyError::dispatch(ConfigError::Path(e)))
}
