//! Identity rule for catalog records.

use crate::domain::{ConfigRecord, SubRef};

/// Does `candidate` describe the same subscription source as `target`?
///
/// Rules, in order:
/// 1. `target.sub` empty: candidate sub must be empty too and domains equal.
/// 2. `target.sub` scalar: subs equal.
/// 3. `target.sub` list: candidate sub equals any element.
///
/// All comparisons are on trimmed strings. A list-valued candidate never matches.
pub fn matches(candidate: &ConfigRecord, target: &ConfigRecord) -> bool {
    let Some(sub) = candidate.sub.as_single() else {
        return false;
    };
    let sub = sub.trim();

    match &target.sub {
        target_sub if target_sub.is_empty() => {
            sub.is_empty() && candidate.domain.trim() == target.domain.trim()
        }
        SubRef::Single(target_sub) => sub == target_sub.trim(),
        SubRef::Many(target_subs) => target_subs.iter().any(|t| sub == t.trim()),
    }
}
