//! Source and destination identifiers and the remote key namespace

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a record in the source system.
///
/// Sources report identifiers as numbers in some places and strings in
/// others (`"12"` as an id, `12` as a parent reference); both normalize
/// to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SourceKey(String);

impl SourceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SourceKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SourceKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for SourceKey {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl From<u64> for SourceKey {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for SourceKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self::from(n),
            Raw::Text(s) => Self(s),
        })
    }
}

/// Identifier assigned by the destination platform.
///
/// Create responses carry numbers, list responses carry strings; the
/// value is sent back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DestinationId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for DestinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for DestinationId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for DestinationId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Separator between the migration label and the source identifier.
pub const REMOTE_KEY_SEPARATOR: char = '|';

/// Composes the remote keys sent to the destination.
///
/// `<label>|<source key>`. The composition is only ever built, never
/// split apart again: the label exists for destination-side filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteKeyNamespace {
    label: String,
}

impl RemoteKeyNamespace {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn compose(&self, key: &SourceKey) -> String {
        format!("{}{}{}", self.label, REMOTE_KEY_SEPARATOR, key)
    }
}
