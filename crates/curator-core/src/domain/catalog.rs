//! The persisted catalog: push configuration plus the list of sources.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::error;

use super::record::ConfigRecord;

/// Subscription URL -> reachable in the latest probe.
pub type AlivenessMap = HashMap<String, bool>;

/// Push configuration under the catalog's `update` key.
///
/// Only `enable` is interpreted here; channel-specific keys stay in `extra`
/// and are read by the [`PushChannel`](crate::ports::PushChannel) implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateConfig {
    #[serde(default)]
    pub enable: bool,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UpdateConfig {
    pub fn enabled() -> Self {
        Self {
            enable: true,
            extra: serde_json::Map::new(),
        }
    }

    /// Channel-specific string key, if present.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Aggregate persisted state of the curator.
///
/// Lifecycle: loaded from the previous cycle's file, mutated in place by one
/// refresh cycle (merge, then expiry), then persisted and pushed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub update: UpdateConfig,

    #[serde(default, deserialize_with = "lenient_records")]
    pub domains: Vec<ConfigRecord>,

    /// Other top-level sections (crawl settings, groups, ...) passed through as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Catalog {
    pub fn new(update: UpdateConfig, domains: Vec<ConfigRecord>) -> Self {
        Self {
            update,
            domains,
            extra: serde_json::Map::new(),
        }
    }

    /// Nothing worth pushing: no sources, no push settings, no other sections.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
            && self.extra.is_empty()
            && self.update == UpdateConfig::default()
    }
}

/// Entries that are not JSON objects are logged and skipped instead of
/// failing the whole catalog. Objects always read (see [`ConfigRecord`]).
fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<ConfigRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    let records = raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| {
            if !value.is_object() {
                error!(position, "[MergeError] need a record object but got {value}");
                return None;
            }
            match serde_json::from_value::<ConfigRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    error!(position, error = %e, "[MergeError] skip malformed domain record");
                    None
                }
            }
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_keeps_unknown_sections() {
        let raw = json!({
            "update": {"enable": true, "fileid": "out.json"},
            "domains": [{"domain": "a.com", "sub": ""}],
            "crawl": {"enable": false},
        });
        let catalog: Catalog = serde_json::from_value(raw).unwrap();
        assert!(catalog.update.enable);
        assert_eq!(catalog.update.get_str("fileid"), Some("out.json"));
        assert_eq!(catalog.domains.len(), 1);

        let back = serde_json::to_value(&catalog).unwrap();
        assert_eq!(back["crawl"], json!({"enable": false}));
        assert_eq!(back["update"]["fileid"], "out.json");
    }

    #[test]
    fn only_non_object_domain_entries_are_skipped() {
        let raw = json!({
            "domains": [
                {"domain": "a.com"},
                "not-a-record",
                {"domain": "b.com", "errors": "many", "rename": null},
                null,
                {"domain": "c.com", "sub": null},
            ],
        });
        let catalog: Catalog = serde_json::from_value(raw).unwrap();
        let domains: Vec<_> = catalog.domains.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, vec!["a.com", "b.com", "c.com"]);
        assert_eq!(catalog.domains[1].errors, None);
    }

    #[test]
    fn default_catalog_is_empty() {
        assert!(Catalog::default().is_empty());
        assert!(serde_json::from_str::<Catalog>("{}").unwrap().is_empty());

        let with_domain =
            Catalog::new(UpdateConfig::default(), vec![ConfigRecord::with_domain("a.com")]);
        assert!(!with_domain.is_empty());
    }
}
