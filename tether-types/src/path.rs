//! Dotted key paths used to address values in a configuration tree.
//!
//! A path like `server.limits.max-players` names one entry in a nested
//! key-value tree. Paths are validated at construction so the tree walks
//! downstream never have to re-check segment shape.

use crate::Error;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated dotted path into a configuration tree.
///
/// Invariant: never empty and never contains an empty segment. Both
/// constructors (`parse`, `FromStr`, deserialization) enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct KeyPath(String);

impl KeyPath {
    /// Parses a key path from a dotted string.
    ///
    /// Rejects empty input and empty segments (`"a..b"`, `".a"`, `"a."`).
    pub fn parse(s: &str) -> Result<Self, Error> {
        if s.is_empty() {
            return Err(Error::InvalidPath("path is empty".to_string()));
        }
        if s.split('.').any(str::is_empty) {
            return Err(Error::InvalidPath(format!("empty segment in {s:?}")));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the path as the original dotted string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates the path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.split('.').count()
    }

    /// Returns the final segment.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().expect("path is never empty")
    }

    /// Returns the path with the final segment removed, or `None` for a
    /// single-segment path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.rfind('.').map(|idx| Self(self.0[..idx].to_string()))
    }

    /// Appends further segments, validating the combined path.
    pub fn join(&self, rest: &str) -> Result<Self, Error> {
        Self::parse(&format!("{}.{rest}", self.0))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for KeyPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for KeyPath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

// Deserialization goes through `parse` so a stored document can never
// smuggle in an invalid path.
impl<'de> Deserialize<'de> for KeyPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
