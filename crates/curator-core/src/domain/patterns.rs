//! Pattern sets used by `rename` / `exclude` / `include` style node filters.
//!
//! On disk these are a single string of `|`-separated sub-patterns. In memory we
//! keep them as an ordered set so merging never produces empty or repeated
//! segments.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used by the persisted `|`-joined form.
pub const SEPARATOR: char = '|';

/// Ordered, duplicate-free set of non-empty pattern strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    items: Vec<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `|`-joined form. Empty segments are dropped.
    pub fn parse(joined: &str) -> Self {
        let mut set = Self::new();
        for segment in joined.split(SEPARATOR) {
            set.insert(segment);
        }
        set
    }

    /// Insert a single pattern. Returns `false` if it was empty or already present.
    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        let pattern = pattern.into();
        if pattern.is_empty() || self.items.contains(&pattern) {
            return false;
        }
        self.items.push(pattern);
        true
    }

    /// Union with `other`, keeping our order first.
    pub fn extend(&mut self, other: &PatternSet) {
        for pattern in &other.items {
            self.insert(pattern.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// The persisted `|`-joined form.
    pub fn joined(&self) -> String {
        self.items.join(&SEPARATOR.to_string())
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<&str> for PatternSet {
    fn from(joined: &str) -> Self {
        Self::parse(joined)
    }
}

impl Serialize for PatternSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.joined())
    }
}

impl<'de> Deserialize<'de> for PatternSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // hand-edited catalogs carry `null` or a list of fragments; neither drops the record
        let mut set = Self::new();
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => set = Self::parse(&raw),
            serde_json::Value::Array(parts) => {
                for raw in parts.iter().filter_map(serde_json::Value::as_str) {
                    set.extend(&Self::parse(raw));
                }
            }
            _ => {}
        }
        Ok(set)
    }
}
