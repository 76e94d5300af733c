//! Errors - エラー型と分類
//!
//! 実行系のエラー（`ExecutionError`）は呼び出し側に伝播させず、
//! `ExecutionResult` の失敗値に変換されます。通知系のエラー（`NotifyError`）は
//! sink 単位で隔離されます。

use std::any::Any;

use thiserror::Error;

/// Task 構築時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task title must not be empty")]
    EmptyTitle,
}

/// 未知の priority 名
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority '{0}' (expected low, medium or high)")]
pub struct ParsePriorityError(pub String);

/// work が返した（または work の周りで捕まえた）失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkError {
    #[error("{0}")]
    Failed(String),

    #[error("work panicked: {0}")]
    Panicked(String),
}

impl WorkError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// 実行が成功しなかった理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("execution cancelled before the work started")]
    Cancelled,

    #[error(transparent)]
    Work(#[from] WorkError),
}

/// 通知 transport（`send(title, message)`）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{transport} transport failed: {reason}")]
pub struct TransportError {
    pub transport: String,
    pub reason: String,
}

impl TransportError {
    pub fn new(transport: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            transport: transport.into(),
            reason: reason.into(),
        }
    }
}

/// 通知 sink のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("sink '{sink}' failed: {source}")]
    Transport {
        sink: String,
        #[source]
        source: TransportError,
    },

    /// sink が panic した（catch 済み、後続の sink には影響しない）
    #[error("sink '{sink}' panicked: {message}")]
    Panicked { sink: String, message: String },

    /// composite の子 sink の一部が失敗した（残りには配送済み）
    #[error("{failed} of {total} sinks failed")]
    Partial { failed: usize, total: usize },
}

/// 不正または読めない executor 設定
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("keyword rule #{index} has an empty keyword")]
    EmptyKeyword { index: usize },

    #[error("{kind} notification #{index} has an empty {field}")]
    EmptyNotificationTarget {
        kind: &'static str,
        field: &'static str,
        index: usize,
    },
}

/// catch_unwind で拾った panic payload を文字列にする
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
