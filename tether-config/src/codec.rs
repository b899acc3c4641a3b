//! Document codecs — moving the configuration tree to and from disk.
//!
//! The store is agnostic to on-disk format; anything that can represent
//! nested maps, sequences, and scalars qualifies. Writes are atomic:
//! serialize to a sibling temp file, then rename over the target, so a
//! half-written document is never visible.

use crate::{ConfigError, ConfigResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Loads and stores a nested key-value tree at a filesystem path.
pub trait DocumentCodec: Send + Sync {
    /// The file extension this codec conventionally uses.
    fn extension(&self) -> &'static str;

    /// Reads and decodes the document. The root must be a map.
    fn load(&self, path: &Path) -> ConfigResult<Value>;

    /// Encodes and atomically replaces the document.
    fn store(&self, path: &Path, tree: &Value) -> ConfigResult<()>;
}

fn require_object(value: Value, path: &Path) -> ConfigResult<Value> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(ConfigError::Malformed(format!(
            "root of {} is not a map",
            path.display()
        )))
    }
}

fn write_atomic(path: &Path, contents: &str) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| ConfigError::Malformed(format!("{} has no file name", path.display())))?;
    let tmp = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// JSON documents via `serde_json`, pretty-printed on write.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn load(&self, path: &Path) -> ConfigResult<Value> {
        let text = fs::read_to_string(path)?;
        let value: Value =
            serde_json::from_str(&text).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        require_object(value, path)
    }

    fn store(&self, path: &Path, tree: &Value) -> ConfigResult<()> {
        let text = serde_json::to_string_pretty(tree)
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;
        write_atomic(path, &text)
    }
}

/// TOML documents via the `toml` crate.
///
/// TOML cannot represent null values; a tree containing them fails to store
/// with `Malformed` rather than silently dropping entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl DocumentCodec for TomlCodec {
    fn extension(&self) -> &'static str {
        "toml"
    }

    fn load(&self, path: &Path) -> ConfigResult<Value> {
        let text = fs::read_to_string(path)?;
        let value: toml::Value =
            toml::from_str(&text).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        let json = serde_json::to_value(value).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        require_object(json, path)
    }

    fn store(&self, path: &Path, tree: &Value) -> ConfigResult<()> {
        let value = toml::Value::try_from(tree.clone())
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;
        let text =
            toml::to_string_pretty(&value).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        write_atomic(path, &text)
    }
}
