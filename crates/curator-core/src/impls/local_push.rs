//! LocalPushChannel - ローカルファイルへの配信
//!
//! `update.fileid` をルートディレクトリからの相対パスとして扱い、
//! 内容をそのまま書き出す。

use std::path::{Component, Path, PathBuf};

use tracing::{error, info};

use super::store;
use crate::domain::UpdateConfig;
use crate::ports::PushChannel;

/// Key in the update config naming the target file.
pub const FILE_KEY: &str = "fileid";

/// Writes pushed content to `root/<fileid>`.
#[derive(Debug, Clone)]
pub struct LocalPushChannel {
    root: PathBuf,
}

impl LocalPushChannel {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolved target, if `fileid` is a non-empty relative path that stays under `root`.
    pub fn target(&self, config: &UpdateConfig) -> Option<PathBuf> {
        let file = config.get_str(FILE_KEY)?.trim();
        if file.is_empty() {
            return None;
        }
        let relative = Path::new(file);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        contained.then(|| self.root.join(relative))
    }
}

impl PushChannel for LocalPushChannel {
    fn validate(&self, config: &UpdateConfig) -> bool {
        self.target(config).is_some()
    }

    fn deliver(&self, content: &str, config: &UpdateConfig, group: &str) -> bool {
        let Some(path) = self.target(config) else {
            error!(group, "[PushError] missing or invalid '{FILE_KEY}' in push config");
            return false;
        };

        match store::persist(&path, content) {
            Ok(()) => {
                info!(
                    group,
                    path = %path.display(),
                    bytes = content.len(),
                    "pushed content to local file"
                );
                true
            }
            Err(e) => {
                error!(group, error = %e, "[PushError] failed to push content to local file");
                false
            }
        }
    }
}
