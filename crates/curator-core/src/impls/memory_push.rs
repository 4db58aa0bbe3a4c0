//! MemoryPushChannel - 開発・テスト用の配信チャネル
//!
//! 配信内容をメモリに記録するだけ。refresh が何を・何回 push したかを
//! 後から検証できる。

use std::sync::{Mutex, PoisonError};

use crate::domain::UpdateConfig;
use crate::ports::PushChannel;

/// One recorded `deliver` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub group: String,
    pub content: String,
}

/// MemoryPushChannel は deliver を記録する
///
/// # 使用例
/// ```ignore
/// let push = MemoryPushChannel::new();
/// refresher.with_push(&push).refresh(Some(&mut catalog), None)?;
/// assert_eq!(push.deliveries().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryPushChannel {
    deliveries: Mutex<Vec<Delivery>>,
    reject: bool,
}

impl MemoryPushChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel whose `validate` always fails.
    pub fn rejecting() -> Self {
        Self {
            deliveries: Mutex::default(),
            reject: true,
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Delivery> {
        self.deliveries().pop()
    }
}

impl PushChannel for MemoryPushChannel {
    fn validate(&self, config: &UpdateConfig) -> bool {
        !self.reject && config.enable
    }

    fn deliver(&self, content: &str, _config: &UpdateConfig, group: &str) -> bool {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Delivery {
                group: group.to_string(),
                content: content.to_string(),
            });
        true
    }
}
