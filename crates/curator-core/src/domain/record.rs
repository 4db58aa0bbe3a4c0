//! Catalog records: one entry of the persisted `domains` list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::origin::Origin;
use super::patterns::PatternSet;

/// Subscription reference of a record: one URL, or a hand-curated list of URLs.
///
/// Reading never fails: `null` is empty and other scalars keep their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubRef {
    Single(String),
    Many(Vec<String>),
}

impl Default for SubRef {
    fn default() -> Self {
        SubRef::Single(String::new())
    }
}

impl SubRef {
    /// Turn a list of length <= 1 into a single value (empty if the list is empty).
    pub fn collapse(self) -> Self {
        match self {
            SubRef::Many(mut urls) if urls.len() <= 1 => {
                SubRef::Single(urls.pop().unwrap_or_default())
            }
            other => other,
        }
    }

    /// `""` and `[]` are both empty.
    pub fn is_empty(&self) -> bool {
        match self {
            SubRef::Single(url) => url.is_empty(),
            SubRef::Many(urls) => urls.is_empty(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, SubRef::Many(_))
    }

    /// The scalar URL, if this is not a list.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            SubRef::Single(url) => Some(url),
            SubRef::Many(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for SubRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(urls) => {
                SubRef::Many(urls.into_iter().filter_map(lenient::text).collect())
            }
            other => SubRef::Single(lenient::text(other).unwrap_or_default()),
        })
    }
}

impl From<&str> for SubRef {
    fn from(url: &str) -> Self {
        SubRef::Single(url.to_string())
    }
}

/// A persisted or freshly fetched subscription source.
///
/// Field defaults are explicit rather than "missing key" semantics:
/// - `errors`: `None` counts as 0 when merging and as 1 when judging expiry.
/// - `debut`: `None` counts as `false`.
///
/// Keys this crate does not interpret are kept in `extra` and written back unchanged.
/// Any JSON object reads as a record: a field of the wrong type falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub domain: String,

    #[serde(default)]
    pub sub: SubRef,

    /// Raw origin tag; see [`ConfigRecord::origin_class`].
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub origin: String,

    /// Consecutive failed cycles.
    #[serde(
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub errors: Option<u32>,

    /// Newly introduced and not yet proven.
    #[serde(
        default,
        deserialize_with = "lenient::flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub debut: Option<bool>,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub rename: String,

    #[serde(default, skip_serializing_if = "PatternSet::is_empty")]
    pub exclude: PatternSet,

    #[serde(default, skip_serializing_if = "PatternSet::is_empty")]
    pub include: PatternSet,

    /// Traffic renewal parameters. A non-empty object marks the record as manually maintained.
    #[serde(
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub renew: Option<serde_json::Map<String, Value>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ConfigRecord {
    pub fn with_sub(sub: impl Into<SubRef>) -> Self {
        Self {
            sub: sub.into(),
            ..Self::default()
        }
    }

    pub fn with_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    pub fn origin_class(&self) -> Origin {
        Origin::from_tag(&self.origin)
    }

    /// Collapse a short `sub` list in place.
    pub fn collapse_sub(&mut self) {
        let sub = std::mem::take(&mut self.sub);
        self.sub = sub.collapse();
    }

    /// Multi-source or renewal-configured records are curated by hand; they absorb, never fold.
    ///
    /// A list of one URL does not count, so the answer is the same before and after
    /// [`ConfigRecord::collapse_sub`].
    pub fn is_manual(&self) -> bool {
        matches!(&self.sub, SubRef::Many(urls) if urls.len() > 1)
            || self.renew.as_ref().is_some_and(|renew| !renew.is_empty())
    }
}

/// Field readers for hand-edited catalogs.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::{Map, Value};

    /// String value; `null` is absent, other scalars keep their JSON text.
    pub(super) fn text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub(super) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(text(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    /// Non-numbers are missing. The cast saturates negatives to 0 and drops fractions.
    pub(super) fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?.as_f64().map(|n| n as u32))
    }

    pub(super) fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?.as_bool())
    }

    pub(super) fn object<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => Some(map),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::empty_list(SubRef::Many(vec![]), SubRef::Single(String::new()))]
    #[case::one_item(SubRef::Many(vec!["http://a".into()]), SubRef::Single("http://a".into()))]
    #[case::two_items(
        SubRef::Many(vec!["http://a".into(), "http://b".into()]),
        SubRef::Many(vec!["http://a".into(), "http://b".into()])
    )]
    #[case::scalar(SubRef::Single("http://a".into()), SubRef::Single("http://a".into()))]
    fn collapse_short_lists(#[case] input: SubRef, #[case] expected: SubRef) {
        assert_eq!(input.collapse(), expected);
    }

    #[test]
    fn record_reads_string_or_list_sub() {
        let scalar: ConfigRecord = serde_json::from_value(json!({"sub": "http://x"})).unwrap();
        assert_eq!(scalar.sub, SubRef::from("http://x"));

        let list: ConfigRecord =
            serde_json::from_value(json!({"sub": ["http://x", "http://y"]})).unwrap();
        assert!(list.sub.is_list());
    }

    #[test]
    fn unknown_keys_survive_roundtrip() {
        let raw = json!({
            "domain": "a.com",
            "origin": "TELEGRAM",
            "exclude": "p1|p2",
            "coupon": "FREE",
        });
        let record: ConfigRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.extra.get("coupon"), Some(&json!("FREE")));
        assert_eq!(record.origin_class(), Origin::Telegram);

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["coupon"], "FREE");
        assert_eq!(back["exclude"], "p1|p2");
        assert!(back.get("errors").is_none());
    }

    #[test]
    fn wrong_typed_fields_fall_back_to_defaults() {
        let record: ConfigRecord = serde_json::from_value(json!({
            "domain": null,
            "sub": null,
            "rename": null,
            "origin": 7,
            "errors": -2,
            "debut": "yes",
            "renew": [],
            "exclude": null,
            "coupon": null,
        }))
        .unwrap();
        assert_eq!(record.domain, "");
        assert_eq!(record.sub, SubRef::default());
        assert_eq!(record.rename, "");
        assert_eq!(record.origin, "7");
        assert_eq!(record.errors, Some(0));
        assert_eq!(record.debut, None);
        assert_eq!(record.renew, None);
        assert!(record.exclude.is_empty());
        assert_eq!(record.extra.get("coupon"), Some(&Value::Null));

        let fractional: ConfigRecord =
            serde_json::from_value(json!({"errors": 2.7, "sub": ["http://a", null, 3]})).unwrap();
        assert_eq!(fractional.errors, Some(2));
        assert_eq!(fractional.sub, SubRef::Many(vec!["http://a".into(), "3".into()]));
    }

    #[test]
    fn manual_when_multi_sub_or_renew() {
        let multi = ConfigRecord::with_sub(SubRef::Many(vec!["a".into(), "b".into()]));
        assert!(multi.is_manual());

        let mut single = ConfigRecord::with_sub(SubRef::Many(vec!["a".into()]));
        assert!(!single.is_manual());
        single.collapse_sub();
        assert!(!single.is_manual());

        let mut renewing = ConfigRecord::with_sub("a");
        renewing.renew = Some(serde_json::Map::new());
        assert!(!renewing.is_manual(), "empty renew object does not count");

        renewing
            .renew
            .as_mut()
            .unwrap()
            .insert("account".into(), json!([{"email": "x@y"}]));
        assert!(renewing.is_manual());
    }
}
