//! Reconciliation rules: identity, dedup, merge, liveness split and expiry.
//!
//! Everything here is synchronous and free of I/O. Callers own their inputs
//! and get new sequences back.

pub mod dedup;
pub mod expiry;
pub mod liveness;
pub mod matcher;
pub mod merge;

pub use self::dedup::{dedup, dedup_values};
pub use self::expiry::{ExpiryPolicy, ExpiryStats, Verdict};
pub use self::liveness::{ProxyRecord, partition};
pub use self::matcher::matches;
pub use self::merge::merge;
