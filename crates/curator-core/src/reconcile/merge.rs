//! Catalog record merge.

use tracing::debug;

use super::matcher::matches;
use crate::domain::ConfigRecord;

/// Collapse records that describe the same source into one.
///
/// Manually maintained records (multi-URL `sub` or a `renew` block) are appended
/// as they are and never folded into another record, though later records may
/// fold into them. Everything else has its `sub` collapsed and is matched against
/// the records accumulated so far; the first match absorbs it:
///
/// | field | rule |
/// |---|---|
/// | `errors` | take incoming if greater (missing counts as 0) |
/// | `debut` | take incoming only if accumulated is already `true` |
/// | `rename` | take incoming only if accumulated is empty |
/// | `exclude` / `include` | union |
///
/// Output keeps first-seen order.
pub fn merge(records: Vec<ConfigRecord>) -> Vec<ConfigRecord> {
    let mut items: Vec<ConfigRecord> = Vec::with_capacity(records.len());

    for mut record in records {
        if record.is_manual() {
            items.push(record);
            continue;
        }

        record.collapse_sub();
        let target = items.iter_mut().find(|item| matches(&record, item));

        match target {
            Some(item) => absorb(item, record),
            None => items.push(record),
        }
    }

    items
}

fn absorb(item: &mut ConfigRecord, incoming: ConfigRecord) {
    if incoming.errors.unwrap_or(0) > item.errors.unwrap_or(0) {
        item.errors = incoming.errors;
    }
    // Only a still-debuting record takes the incoming flag (false when missing).
    if item.debut.unwrap_or(false) {
        item.debut = Some(incoming.debut.unwrap_or(false));
    }
    if item.rename.is_empty() {
        item.rename = incoming.rename;
    }
    item.exclude.extend(&incoming.exclude);
    item.include.extend(&incoming.include);

    debug!(domain = %item.domain, sub = ?item.sub, "merged duplicate record");
}
