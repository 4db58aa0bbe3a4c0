//! Task declaration dedup.

use tracing::{debug, error};

use crate::domain::TaskDescriptor;

/// Collapse task declarations that point at the same source.
///
/// The first declaration of each source keeps its position. Later duplicates
/// fill in its `rename` (only if empty) and extend its `exclude` / `include`.
pub fn dedup(tasks: Vec<TaskDescriptor>) -> Vec<TaskDescriptor> {
    let mut items: Vec<TaskDescriptor> = Vec::with_capacity(tasks.len());

    for task in tasks {
        match items.iter_mut().find(|item| item.same_source(&task)) {
            Some(item) => {
                if item.rename.is_empty() {
                    item.rename = task.rename;
                }
                item.exclude.extend(&task.exclude);
                item.include.extend(&task.include);
                debug!(
                    domain = %item.domain,
                    sub = %item.sub,
                    index = item.index,
                    "merged duplicate task"
                );
            }
            None => items.push(task),
        }
    }

    items
}

/// Like [`dedup`], for untyped input. Entries that are not task declarations
/// are logged and skipped; the rest of the batch continues.
pub fn dedup_values(values: Vec<serde_json::Value>) -> Vec<TaskDescriptor> {
    let tasks = values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| {
            if !value.is_object() {
                error!(position, "[DedupError] need a task object but got {value}");
                return None;
            }
            serde_json::from_value::<TaskDescriptor>(value)
                .inspect_err(|e| error!(position, error = %e, "[DedupError] skip malformed task"))
                .ok()
        })
        .collect();

    dedup(tasks)
}
