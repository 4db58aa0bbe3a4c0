use serde::{Deserialize, Serialize};

use super::patterns::PatternSet;

/// A declared intent to fetch one subscription source.
///
/// Identity is `sub` when set, otherwise `domain` + `index`. Everything from
/// `name` down is carried through for the fetch stage and ignored by dedup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    #[serde(default)]
    pub domain: String,

    /// Disambiguates several tasks against the same domain.
    #[serde(default = "default_index")]
    pub index: u32,

    /// Direct subscription URL.
    #[serde(default)]
    pub sub: String,

    #[serde(default)]
    pub rename: String,

    #[serde(default)]
    pub exclude: PatternSet,

    #[serde(default)]
    pub include: PatternSet,

    #[serde(default)]
    pub name: String,

    #[serde(default = "default_retry")]
    pub retry: u32,

    /// Highest node rate multiplier accepted.
    #[serde(default = "default_rate")]
    pub rate: f64,

    #[serde(default)]
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renew: Option<serde_json::Map<String, serde_json::Value>>,

    /// Probe fetched nodes for reachability before conversion.
    #[serde(default = "default_liveness")]
    pub liveness: bool,

    #[serde(default)]
    pub allow_insecure: bool,

    /// Override the converter's built-in exclude rules.
    #[serde(default)]
    pub ignore_exclude: bool,
}

fn default_index() -> u32 {
    1
}

fn default_retry() -> u32 {
    3
}

fn default_rate() -> f64 {
    3.0
}

fn default_liveness() -> bool {
    true
}

impl Default for TaskDescriptor {
    fn default() -> Self {
        Self {
            domain: String::new(),
            index: default_index(),
            sub: String::new(),
            rename: String::new(),
            exclude: PatternSet::new(),
            include: PatternSet::new(),
            name: String::new(),
            retry: default_retry(),
            rate: default_rate(),
            tag: String::new(),
            renew: None,
            liveness: default_liveness(),
            allow_insecure: false,
            ignore_exclude: false,
        }
    }
}

impl TaskDescriptor {
    pub fn for_domain(domain: impl Into<String>, index: u32) -> Self {
        Self {
            domain: domain.into(),
            index,
            ..Self::default()
        }
    }

    pub fn for_sub(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            ..Self::default()
        }
    }

    /// Same logical source: equal non-empty `sub`, or both `sub` empty with equal `domain` + `index`.
    pub fn same_source(&self, other: &TaskDescriptor) -> bool {
        match (self.sub.is_empty(), other.sub.is_empty()) {
            (false, false) => self.sub == other.sub,
            (true, true) => self.domain == other.domain && self.index == other.index,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_apply_when_keys_are_missing() {
        let task: TaskDescriptor = serde_json::from_str(r#"{"domain": "a.com"}"#).unwrap();
        assert_eq!(task.index, 1);
        assert_eq!(task.retry, 3);
        assert!(task.liveness);
        assert!(task.exclude.is_empty());
    }

    #[rstest]
    #[case::same_sub(TaskDescriptor::for_sub("http://x"), TaskDescriptor::for_sub("http://x"), true)]
    #[case::different_sub(TaskDescriptor::for_sub("http://x"), TaskDescriptor::for_sub("http://y"), false)]
    #[case::same_domain_index(
        TaskDescriptor::for_domain("a.com", 1),
        TaskDescriptor::for_domain("a.com", 1),
        true
    )]
    #[case::different_index(
        TaskDescriptor::for_domain("a.com", 1),
        TaskDescriptor::for_domain("a.com", 2),
        false
    )]
    #[case::sub_vs_domain(
        TaskDescriptor::for_sub("http://x"),
        TaskDescriptor::for_domain("a.com", 1),
        false
    )]
    fn same_source_rule(
        #[case] a: TaskDescriptor,
        #[case] b: TaskDescriptor,
        #[case] expected: bool,
    ) {
        assert_eq!(a.same_source(&b), expected);
        assert_eq!(b.same_source(&a), expected);
    }
}
