//! Impls - ports の実装とファイル入出力
//!
//! # 含まれる実装
//! - **MemoryPushChannel**: 開発・テスト用（配信内容を記録）
//! - **LocalPushChannel**: ローカルファイルへの配信
//! - **store**: カタログ / aliveness / タスク一覧の JSON 読み書き
//!
//! リモート配信（gist, paste サービスなど）は別クレートで PushChannel を実装する想定。

pub mod local_push;
pub mod memory_push;
pub mod store;

pub use self::local_push::LocalPushChannel;
pub use self::memory_push::{Delivery, MemoryPushChannel};
