//! The in-memory key tree backing one configuration binding.
//!
//! One store owns one tree and one backing document. All structural mutation
//! is serialized through the store's own locks; no cross-store coordination
//! exists because each binding owns an independent store.
//!
//! Locking discipline: `io_lock` is held for the whole of `save` and
//! `reload` so the two background directions never interleave mid-operation;
//! the tree lock is only ever taken while `io_lock` is already held (or
//! alone, for plain `get`/`set`). Readers never observe a half-replaced
//! tree, and `save` always writes a consistent snapshot.

use crate::codec::DocumentCodec;
use crate::descriptor::ConfigDescriptor;
use crate::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use tether_types::KeyPath;
use tracing::{debug, warn};

/// Mutable tree of dotted-path entries, loaded from and flushed to a
/// persisted document.
pub struct PathStore {
    path: PathBuf,
    codec: Arc<dyn DocumentCodec>,
    defaults: BTreeMap<KeyPath, Value>,
    tree: RwLock<Value>,
    io_lock: Mutex<()>,
}

impl PathStore {
    /// Opens the store over an existing document, loading it eagerly.
    ///
    /// Fails fast when the document is absent or malformed — a misconfigured
    /// binding should die at construction, not at first read.
    pub fn open(descriptor: &ConfigDescriptor) -> ConfigResult<Self> {
        let codec = Arc::clone(descriptor.codec());
        let tree = codec.load(descriptor.path())?;
        Ok(Self {
            path: descriptor.path().to_path_buf(),
            codec,
            defaults: descriptor.defaults(),
            tree: RwLock::new(tree),
            io_lock: Mutex::new(()),
        })
    }

    /// Creates the store with an empty tree, without touching the document.
    ///
    /// The first successful [`reload`](Self::reload) establishes baseline
    /// state; schedulers may be started against the store before that.
    #[must_use]
    pub fn empty(descriptor: &ConfigDescriptor) -> Self {
        Self {
            path: descriptor.path().to_path_buf(),
            codec: Arc::clone(descriptor.codec()),
            defaults: descriptor.defaults(),
            tree: RwLock::new(Value::Object(Map::new())),
            io_lock: Mutex::new(()),
        }
    }

    /// Resolves a dotted path against the in-memory tree.
    ///
    /// A missing path yields the declared default when one exists (returned
    /// as-is, never written back) and [`ConfigError::MissingKey`] otherwise.
    pub fn get(&self, path: &KeyPath) -> ConfigResult<Value> {
        let tree = self.tree.read().unwrap();
        if let Some(value) = resolve(&tree, path) {
            return Ok(value.clone());
        }
        drop(tree);
        match self.defaults.get(path) {
            Some(default) => Ok(default.clone()),
            None => Err(ConfigError::MissingKey(path.clone())),
        }
    }

    /// As [`get`](Self::get), additionally coercing the value to `T`.
    ///
    /// An impossible coercion (stored sequence read as a scalar, and so on)
    /// fails with [`ConfigError::TypeMismatch`].
    pub fn get_as<T: DeserializeOwned>(&self, path: &KeyPath) -> ConfigResult<T> {
        let value = self.get(path)?;
        serde_json::from_value(value).map_err(|_| ConfigError::TypeMismatch {
            path: path.clone(),
            requested: std::any::type_name::<T>(),
        })
    }

    /// Writes into the in-memory tree, creating intermediate maps for absent
    /// segments. Never persists by itself.
    ///
    /// An intermediate segment holding a scalar is replaced by a map — last
    /// write wins on shape as well as on value.
    pub fn set(&self, path: &KeyPath, value: Value) {
        let mut tree = self.tree.write().unwrap();
        insert(&mut tree, path, value);
    }

    /// [`set`](Self::set) plus an immediate synchronous write-through,
    /// bypassing the save scheduler's timing.
    pub fn set_and_save(&self, path: &KeyPath, value: Value) -> bool {
        self.set(path, value);
        self.save()
    }

    /// Serializes a consistent snapshot of the tree to the backing document.
    ///
    /// Returns whether the write succeeded; failures are logged and the
    /// in-memory state is left untouched for a later retry.
    pub fn save(&self) -> bool {
        let _io = self.io_lock.lock().unwrap();
        let snapshot = self.tree.read().unwrap().clone();
        match self.codec.store(&self.path, &snapshot) {
            Ok(()) => {
                debug!("saved configuration to {}", self.path.display());
                true
            }
            Err(e) => {
                warn!("failed to save configuration to {}: {e}", self.path.display());
                false
            }
        }
    }

    /// Re-reads the backing document and atomically replaces the tree.
    ///
    /// In-memory writes that were never flushed are deliberately discarded —
    /// reload means "the document is authoritative". On failure the previous
    /// tree stays in place and `false` is returned.
    pub fn reload(&self) -> bool {
        let _io = self.io_lock.lock().unwrap();
        match self.codec.load(&self.path) {
            Ok(fresh) => {
                *self.tree.write().unwrap() = fresh;
                debug!("reloaded configuration from {}", self.path.display());
                true
            }
            Err(e) => {
                warn!(
                    "failed to reload configuration from {}: {e}; keeping previous state",
                    self.path.display()
                );
                false
            }
        }
    }

    /// Returns a clone of the current tree.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        self.tree.read().unwrap().clone()
    }

    /// The backing document location.
    #[must_use]
    pub fn document_path(&self) -> &std::path::Path {
        &self.path
    }
}

impl fmt::Debug for PathStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathStore")
            .field("path", &self.path)
            .field("defaults", &self.defaults.len())
            .finish_non_exhaustive()
    }
}

fn resolve<'a>(tree: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path.segments() {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn insert(tree: &mut Value, path: &KeyPath, value: Value) {
    if !tree.is_object() {
        *tree = Value::Object(Map::new());
    }
    let segments: Vec<&str> = path.segments().collect();
    let mut current = tree;
    for segment in &segments[..segments.len() - 1] {
        let map = current.as_object_mut().expect("intermediate is a map");
        let slot = map
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = slot;
    }
    current
        .as_object_mut()
        .expect("intermediate is a map")
        .insert(segments[segments.len() - 1].to_string(), value);
}
