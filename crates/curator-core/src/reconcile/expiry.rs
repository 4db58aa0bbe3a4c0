//! Expiry policy: which records survive an update cycle.
//!
//! This is a pure judgment step. [`ExpiryPolicy::judge`] only looks at a record and
//! the aliveness probe; [`ExpiryPolicy::retain`] applies the verdicts.

use crate::domain::{AlivenessMap, ConfigRecord};

/// `errors` assumed for a record that has never been counted.
pub const MISSING_ERRORS: u32 = 1;

/// Outcome of judging one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Exempt origin, hand-curated URL list, or probed alive. `errors` and `debut` are cleared.
    Renewed,

    /// Not confirmed alive but still within its origin's tolerance. `debut` is cleared.
    Retained,

    /// Dropped from the catalog.
    Expired,
}

/// Origin-dependent survival rule.
///
/// - Renewed: origin is TEMPORARY / OWNED, or `sub` is still a list after
///   collapse, or `alive[sub]` is true.
/// - Retained: `errors` (missing = 1) is below `Origin::expire` and the record
///   is not debuting.
/// - Expired: everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiryPolicy;

impl ExpiryPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Judge a record whose `sub` has already been collapsed.
    pub fn judge(&self, record: &ConfigRecord, alive: &AlivenessMap) -> Verdict {
        let origin = record.origin_class();
        let probed_alive = record
            .sub
            .as_single()
            .is_some_and(|sub| alive.get(sub).copied().unwrap_or(false));

        if origin.is_exempt() || record.sub.is_list() || probed_alive {
            return Verdict::Renewed;
        }

        let errors = record.errors.unwrap_or(MISSING_ERRORS);
        let debut = record.debut.unwrap_or(false);
        if errors < origin.expire() && !debut {
            Verdict::Retained
        } else {
            Verdict::Expired
        }
    }

    /// Apply verdicts, returning survivors in their original order.
    pub fn retain(
        &self,
        records: Vec<ConfigRecord>,
        alive: &AlivenessMap,
    ) -> (Vec<ConfigRecord>, ExpiryStats) {
        let mut stats = ExpiryStats::default();
        let mut survivors = Vec::with_capacity(records.len());

        for mut record in records {
            record.collapse_sub();
            match self.judge(&record, alive) {
                Verdict::Renewed => {
                    record.errors = None;
                    record.debut = None;
                    stats.renewed += 1;
                    survivors.push(record);
                }
                Verdict::Retained => {
                    record.debut = None;
                    stats.retained += 1;
                    survivors.push(record);
                }
                Verdict::Expired => stats.expired += 1,
            }
        }

        (survivors, stats)
    }
}

/// Per-cycle verdict counts, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiryStats {
    pub renewed: usize,
    pub retained: usize,
    pub expired: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubRef;
    use rstest::rstest;

    fn record(origin: &str, sub: &str, errors: Option<u32>, debut: Option<bool>) -> ConfigRecord {
        ConfigRecord {
            origin: origin.to_string(),
            errors,
            debut,
            ..ConfigRecord::with_sub(sub)
        }
    }

    fn alive(entries: &[(&str, bool)]) -> AlivenessMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[rstest]
    #[case::temporary_without_probe("TEMPORARY", "http://t", Some(9), Some(true), Verdict::Renewed)]
    #[case::owned_without_probe("OWNED", "http://o", None, None, Verdict::Renewed)]
    #[case::probed_alive("TELEGRAM", "http://alive", Some(9), Some(true), Verdict::Renewed)]
    #[case::probed_dead_within_tolerance("TELEGRAM", "http://dead", Some(2), Some(false), Verdict::Retained)]
    #[case::at_threshold("TELEGRAM", "http://missing", Some(3), Some(false), Verdict::Expired)]
    #[case::missing_errors_count_as_one("TELEGRAM", "http://missing", None, None, Verdict::Retained)]
    #[case::debut_is_stricter("TELEGRAM", "http://missing", Some(0), Some(true), Verdict::Expired)]
    #[case::google_tolerates_less("GOOGLE", "http://missing", Some(2), None, Verdict::Expired)]
    #[case::github_tolerates_more("GITHUB", "http://missing", Some(4), None, Verdict::Retained)]
    #[case::unknown_origin("", "http://missing", Some(2), None, Verdict::Retained)]
    fn judge_rules(
        #[case] origin: &str,
        #[case] sub: &str,
        #[case] errors: Option<u32>,
        #[case] debut: Option<bool>,
        #[case] expected: Verdict,
    ) {
        let probe = alive(&[("http://alive", true), ("http://dead", false)]);
        let policy = ExpiryPolicy::new();
        assert_eq!(policy.judge(&record(origin, sub, errors, debut), &probe), expected);
    }

    #[test]
    fn multi_url_records_are_always_renewed() {
        let mut curated = record("PAGE", "", Some(99), Some(true));
        curated.sub = SubRef::Many(vec!["http://a".into(), "http://b".into()]);

        let (survivors, stats) = ExpiryPolicy::new().retain(vec![curated], &AlivenessMap::new());
        assert_eq!(stats.renewed, 1);
        assert_eq!(survivors[0].errors, None);
        assert_eq!(survivors[0].debut, None);
    }

    #[test]
    fn single_item_list_is_collapsed_and_probed() {
        let mut listed = record("PAGE", "", Some(99), None);
        listed.sub = SubRef::Many(vec!["http://alive".into()]);

        let probe = alive(&[("http://alive", true)]);
        let (survivors, _) = ExpiryPolicy::new().retain(vec![listed], &probe);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].sub, SubRef::from("http://alive"));
    }

    #[test]
    fn retain_clears_fields_per_verdict_and_keeps_order() {
        let records = vec![
            record("TEMPORARY", "http://t", Some(5), Some(true)),
            record("TELEGRAM", "http://gone", Some(3), Some(false)),
            record("TELEGRAM", "http://weak", Some(2), Some(false)),
        ];

        let (survivors, stats) = ExpiryPolicy::new().retain(records, &alive(&[]));
        assert_eq!(
            stats,
            ExpiryStats {
                renewed: 1,
                retained: 1,
                expired: 1
            }
        );
        assert_eq!(survivors.len(), 2);
        assert_eq!(survivors[0].errors, None);
        assert_eq!(survivors[0].debut, None);
        assert_eq!(survivors[1].sub, SubRef::from("http://weak"));
        assert_eq!(survivors[1].errors, Some(2), "errors are kept on retained records");
        assert_eq!(survivors[1].debut, None);
    }
}
