//! App - アプリケーション層
//!
//! reconcile のルールと ports を組み合わせて 1 サイクル分の処理を実行する。
//!
//! # 主要コンポーネント
//! - **CatalogRefresher**: merge → expiry → persist → push のドライバ

pub mod refresher;

pub use self::refresher::{CatalogRefresher, RefreshOutcome, SkipReason, UPDATE_GROUP};
