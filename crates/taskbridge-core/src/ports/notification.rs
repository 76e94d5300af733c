//! Notification ports - 実行結果の配送
//!
//! - **NotificationSink**: 結果をどこへ届けるか（Email, Messaging, Composite）
//! - **NotificationTransport**: 実際の送信手段（`send(title, message)` だけを要求）
//!
//! 再送・認証・整形は transport 側の責務です。

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;

use crate::domain::errors::panic_message;
use crate::domain::{ExecutionResult, NotifyError, TransportError};

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, result: &ExecutionResult) -> Result<(), NotifyError>;

    /// ログとエラーに使うラベル
    fn name(&self) -> &str;
}

/// `sink.notify` を呼び、panic を `NotifyError::Panicked` に変換する
///
/// executor と CompositeSink はこれ経由で配送します。1 つの sink が panic
/// しても、呼び出し側のタスクも後続の sink も巻き込まれません。
pub(crate) async fn notify_isolated(
    sink: &dyn NotificationSink,
    result: &ExecutionResult,
) -> Result<(), NotifyError> {
    match AssertUnwindSafe(sink.notify(result)).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => Err(NotifyError::Panicked {
            sink: sink.name().to_string(),
            message: panic_message(panic.as_ref()),
        }),
    }
}

#[async_trait]
pub trait NotificationTransport: Send + Sync {
    async fn send(&self, title: &str, message: &str) -> Result<(), TransportError>;
}
