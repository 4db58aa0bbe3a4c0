//! PushChannel port - 更新済みカタログの配信先
//!
//! 配信プロトコル（gist / paste サービス / ローカルファイル など）はこの trait の
//! 実装側の関心事。コアは validate → deliver の順で呼ぶだけ。

use crate::domain::UpdateConfig;

/// PushChannel は refresh 結果の配信先
///
/// # 設計原則
/// - 同期呼び出し（リトライ・バックオフは実装側の責務）
/// - `validate` は副作用なし。`false` なら refresh は何も書かずに中断する
/// - `deliver` の失敗はエラーにしない（`false` を返すだけ）
pub trait PushChannel {
    /// Is `config` usable by this channel?
    fn validate(&self, config: &UpdateConfig) -> bool;

    /// Deliver `content`. Returns whether the channel accepted it.
    fn deliver(&self, content: &str, config: &UpdateConfig, group: &str) -> bool;
}
