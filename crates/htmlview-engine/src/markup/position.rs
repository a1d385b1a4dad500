use std::fmt;

use serde::Serialize;

/// Position fingerprint of a node: the dash-joined child indexes from the
/// document root down to the node (`0-2-1`).
///
/// Unique per node within a single transformation pass, which makes it usable
/// as a stable identity key for the visual node built from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    /// Key of the `index`th child, or of a top-level node when `parent` is `None`.
    pub fn new(parent: Option<&NodeKey>, index: usize) -> Self {
        match parent {
            Some(parent) => NodeKey(format!("{}-{}", parent.0, index)),
            None => NodeKey(index.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        NodeKey(value.to_string())
    }
}

/// Chain of tag names from the root to a node (`ul>li>text`).
///
/// Only used for diagnostics; never consulted for rendering decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage(String);

impl Lineage {
    pub fn new(parent: Option<&Lineage>, name: &str) -> Self {
        match parent {
            Some(parent) => Lineage(format!("{}>{}", parent.0, name)),
            None => Lineage(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Lineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
