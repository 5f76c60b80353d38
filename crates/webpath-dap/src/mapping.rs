//! Ordered URL-prefix to local-directory rules.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One `pathMapping` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMappingEntry {
    /// URL prefix, either a path (`/app/`) or a full URL
    /// (`http://localhost:8080/app/`).
    pub url_prefix: String,
    /// Local directory the prefix maps onto.
    pub local_dir: String,
}

/// Ordered set of [`PathMappingEntry`] rules.
///
/// Serialized as a JSON/TOML map; declaration order is kept because it
/// breaks ties between equally long prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathMapping {
    entries: Vec<PathMappingEntry>,
}

impl PathMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. A prefix declared twice keeps its first position and
    /// takes the newer directory.
    pub fn insert(&mut self, url_prefix: impl Into<String>, local_dir: impl Into<String>) {
        let url_prefix = url_prefix.into();
        let local_dir = local_dir.into();
        match self.entries.iter_mut().find(|e| e.url_prefix == url_prefix) {
            Some(existing) => existing.local_dir = local_dir,
            None => self.entries.push(PathMappingEntry {
                url_prefix,
                local_dir,
            }),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, url_prefix: impl Into<String>, local_dir: impl Into<String>) -> Self {
        self.insert(url_prefix, local_dir);
        self
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rules in declaration order.
    pub fn entries(&self) -> &[PathMappingEntry] {
        &self.entries
    }

    /// `(prefix, dir)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.url_prefix.as_str(), e.local_dir.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = PathMapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl Serialize for PathMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.url_prefix, &entry.local_dir)?;
        }
        map.end()
    }
}

struct PathMappingVisitor;

impl<'de> Visitor<'de> for PathMappingVisitor {
    type Value = PathMapping;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of URL prefixes to local directories")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut mapping = PathMapping::new();
        while let Some((prefix, dir)) = access.next_entry::<String, String>()? {
            mapping.insert(prefix, dir);
        }
        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for PathMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PathMappingVisitor)
    }
}
