//! Errors - エラー型
//!
//! 検証失敗（disabled / invalid config / empty domains）はエラーではなく
//! `RefreshOutcome::Skipped` として返す。ここに来るのは I/O とシリアライズのみ。

use std::path::PathBuf;

use thiserror::Error;

/// CuratorError は呼び出し側に伝播するハードエラー
#[derive(Debug, Error)]
pub enum CuratorError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CuratorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CuratorError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CuratorError::Json {
            path: path.into(),
            source,
        }
    }
}
