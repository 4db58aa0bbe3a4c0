//! Ports - 外部コラボレータとの境界
//!
//! コアが直接扱わない外部システム（配信チャネル）へのインターフェース。
//! 実装は `impls` に置く。

pub mod push;

pub use self::push::PushChannel;
