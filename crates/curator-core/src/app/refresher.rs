//! CatalogRefresher - 1 サイクル分のカタログ更新
//!
//! merge → expiry → serialize → persist → push の順に実行する。
//! 検証はすべて書き込みの前に行うため、途中で止まった場合に
//! 中途半端なカタログがファイルや配信先に出ることはない。

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::domain::{AlivenessMap, Catalog, CuratorError};
use crate::impls::store;
use crate::ports::PushChannel;
use crate::reconcile::{ExpiryPolicy, merge};

/// Push group used for catalog updates.
pub const UPDATE_GROUP: &str = "update";

/// Why a cycle stopped before writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No catalog, an empty catalog, or no push channel.
    EmptyContent,

    /// `update.enable` is false.
    Disabled,

    /// The push channel rejected the update config.
    InvalidUpdateConfig,

    /// Nothing left after merge and expiry.
    EmptyDomains,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::EmptyContent => "empty content",
            SkipReason::Disabled => "update disabled",
            SkipReason::InvalidUpdateConfig => "invalid update config",
            SkipReason::EmptyDomains => "domains empty",
        };
        f.write_str(reason)
    }
}

/// Result of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Aborted cleanly: no file written, nothing pushed.
    Skipped(SkipReason),

    Delivered {
        /// Records in the written catalog.
        domains: usize,
        /// Whether the catalog was written to the persist path.
        persisted: bool,
        /// What the push channel reported.
        delivered: bool,
    },
}

/// CatalogRefresher は refresh サイクルのドライバ
///
/// # 使用例
/// ```ignore
/// let push = LocalPushChannel::new("data/push");
/// let outcome = CatalogRefresher::new()
///     .with_push(&push)
///     .persist_to("data/catalog.json")
///     .refresh(Some(&mut catalog), Some(&alive))?;
/// ```
///
/// # 所有権
/// - `refresh` は `&mut Catalog` を受け取る。サイクル中はカタログを排他的に借用する
/// - `domains` はこのサイクルで置き換えられる（唯一のインプレース更新）
#[derive(Default)]
pub struct CatalogRefresher<'a> {
    push: Option<&'a dyn PushChannel>,
    persist_path: Option<PathBuf>,
    policy: ExpiryPolicy,
}

impl<'a> CatalogRefresher<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push channel the refreshed catalog is delivered to.
    pub fn with_push(mut self, push: &'a dyn PushChannel) -> Self {
        self.push = Some(push);
        self
    }

    /// Also write the refreshed catalog to `path`.
    pub fn persist_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_path = Some(path.into());
        self
    }

    /// Run one cycle.
    ///
    /// Validation failures come back as [`RefreshOutcome::Skipped`]; only I/O
    /// and serialization problems are errors.
    pub fn refresh(
        &self,
        catalog: Option<&mut Catalog>,
        alive: Option<&AlivenessMap>,
    ) -> Result<RefreshOutcome, CuratorError> {
        let (catalog, push) = match (catalog, self.push) {
            (Some(catalog), Some(push)) if !catalog.is_empty() => (catalog, push),
            _ => {
                error!("[UpdateError] cannot update remote config because content is empty");
                return Ok(RefreshOutcome::Skipped(SkipReason::EmptyContent));
            }
        };

        if !catalog.update.enable {
            debug!("[UpdateError] skip update remote config because enable=[false]");
            return Ok(RefreshOutcome::Skipped(SkipReason::Disabled));
        }

        if !push.validate(&catalog.update) {
            error!("[UpdateError] update config is invalid");
            return Ok(RefreshOutcome::Skipped(SkipReason::InvalidUpdateConfig));
        }

        let before = catalog.domains.len();
        let mut domains = merge(std::mem::take(&mut catalog.domains));
        debug!(before, after = domains.len(), "merged catalog records");

        // An empty probe result means nothing was probed, not that everything is dead.
        if let Some(alive) = alive.filter(|alive| !alive.is_empty()) {
            let (survivors, stats) = self.policy.retain(domains, alive);
            info!(
                renewed = stats.renewed,
                retained = stats.retained,
                expired = stats.expired,
                "applied expiry policy"
            );
            domains = survivors;
        }

        catalog.domains = domains;
        if catalog.domains.is_empty() {
            error!("[UpdateError] skip update remote config because domains is empty");
            return Ok(RefreshOutcome::Skipped(SkipReason::EmptyDomains));
        }

        let content = serde_json::to_string(&*catalog)?;

        let persisted = match &self.persist_path {
            Some(path) => {
                store::persist(path, &content)?;
                debug!(path = %path.display(), bytes = content.len(), "persisted catalog");
                true
            }
            None => false,
        };

        let delivered = push.deliver(&content, &catalog.update, UPDATE_GROUP);
        if !delivered {
            warn!(group = UPDATE_GROUP, "push channel did not accept the refreshed catalog");
        }

        info!(domains = catalog.domains.len(), persisted, delivered, "refreshed catalog");
        Ok(RefreshOutcome::Delivered {
            domains: catalog.domains.len(),
            persisted,
            delivered,
        })
    }
}
