//! Binding descriptors — the immutable metadata a configuration binding is
//! built from.
//!
//! A descriptor is read once per binding and cached for the lifetime of the
//! proxy: the document location, the bundled default, the scheduler periods,
//! and the accessor table mapping facade method names to key paths. Defaults
//! are declared here and threaded through construction; nothing is looked up
//! globally at call time.

use crate::codec::{DocumentCodec, JsonCodec};
use crate::{ConfigError, ConfigResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tether_types::KeyPath;

/// One declared value accessor: the key path a facade method reads, plus an
/// optional default returned when the path is unset.
#[derive(Debug, Clone)]
pub struct ValueBinding {
    pub path: KeyPath,
    pub default: Option<Value>,
}

/// Immutable metadata describing one configuration binding.
#[derive(Clone)]
pub struct ConfigDescriptor {
    path: PathBuf,
    default_document: Option<String>,
    reload_interval_secs: u64,
    save_interval_secs: u64,
    values: BTreeMap<String, ValueBinding>,
    codec: Arc<dyn DocumentCodec>,
}

impl ConfigDescriptor {
    /// Starts building a descriptor for the document at `path`.
    pub fn builder(path: impl Into<PathBuf>) -> ConfigDescriptorBuilder {
        ConfigDescriptorBuilder {
            path: path.into(),
            default_document: None,
            reload_interval_secs: 0,
            save_interval_secs: 0,
            codec: None,
            values: Vec::new(),
        }
    }

    /// The backing document location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The bundled default document text, if any.
    #[must_use]
    pub fn default_document(&self) -> Option<&str> {
        self.default_document.as_deref()
    }

    /// Reload scheduler period in seconds; `0` disables the scheduler.
    #[must_use]
    pub fn reload_interval_secs(&self) -> u64 {
        self.reload_interval_secs
    }

    /// Save scheduler period in seconds; `0` disables the scheduler.
    #[must_use]
    pub fn save_interval_secs(&self) -> u64 {
        self.save_interval_secs
    }

    /// The codec used to move the tree to and from disk.
    #[must_use]
    pub fn codec(&self) -> &Arc<dyn DocumentCodec> {
        &self.codec
    }

    /// Looks up the value binding declared for a facade method name.
    #[must_use]
    pub fn binding(&self, method: &str) -> Option<&ValueBinding> {
        self.values.get(method)
    }

    /// Iterates all declared (method, binding) pairs.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &ValueBinding)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The explicit default table: every bound path with a declared default.
    #[must_use]
    pub fn defaults(&self) -> BTreeMap<KeyPath, Value> {
        self.values
            .values()
            .filter_map(|b| b.default.clone().map(|d| (b.path.clone(), d)))
            .collect()
    }
}

impl fmt::Debug for ConfigDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDescriptor")
            .field("path", &self.path)
            .field("reload_interval_secs", &self.reload_interval_secs)
            .field("save_interval_secs", &self.save_interval_secs)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ConfigDescriptor`]. Key paths are validated at `build`.
pub struct ConfigDescriptorBuilder {
    path: PathBuf,
    default_document: Option<String>,
    reload_interval_secs: u64,
    save_interval_secs: u64,
    codec: Option<Arc<dyn DocumentCodec>>,
    values: Vec<(String, String, Option<Value>)>,
}

impl ConfigDescriptorBuilder {
    /// Enables the reload scheduler with the given period in seconds.
    #[must_use]
    pub fn reload_every(mut self, secs: u64) -> Self {
        self.reload_interval_secs = secs;
        self
    }

    /// Enables the save scheduler with the given period in seconds.
    #[must_use]
    pub fn save_every(mut self, secs: u64) -> Self {
        self.save_interval_secs = secs;
        self
    }

    /// Sets the bundled default document, materialized at startup when the
    /// backing file is absent.
    #[must_use]
    pub fn default_document(mut self, text: impl Into<String>) -> Self {
        self.default_document = Some(text.into());
        self
    }

    /// Overrides the document codec. JSON is the default.
    #[must_use]
    pub fn codec(mut self, codec: impl DocumentCodec + 'static) -> Self {
        self.codec = Some(Arc::new(codec));
        self
    }

    /// Declares a value accessor: facade method `method` reads `path`.
    #[must_use]
    pub fn value(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.values.push((method.into(), path.into(), None));
        self
    }

    /// Declares a value accessor with a default for when the path is unset.
    #[must_use]
    pub fn value_or(
        mut self,
        method: impl Into<String>,
        path: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.values
            .push((method.into(), path.into(), Some(default.into())));
        self
    }

    /// Validates the accumulated declarations and produces the descriptor.
    pub fn build(self) -> ConfigResult<ConfigDescriptor> {
        let mut values = BTreeMap::new();
        for (method, raw_path, default) in self.values {
            if method.is_empty() {
                return Err(ConfigError::Descriptor("empty method name".to_string()));
            }
            let path = KeyPath::parse(&raw_path)?;
            if values
                .insert(method.clone(), ValueBinding { path, default })
                .is_some()
            {
                return Err(ConfigError::Descriptor(format!(
                    "method {method:?} declared twice"
                )));
            }
        }
        Ok(ConfigDescriptor {
            path: self.path,
            default_document: self.default_document,
            reload_interval_secs: self.reload_interval_secs,
            save_interval_secs: self.save_interval_secs,
            values,
            codec: self.codec.unwrap_or_else(|| Arc::new(JsonCodec)),
        })
    }
}
