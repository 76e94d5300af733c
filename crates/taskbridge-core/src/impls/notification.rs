//! Notification impls - 組み込みの sink と transport
//!
//! - `EmailSink` / `MessagingSink`: 結果を整形して transport に渡す
//! - `CompositeSink`: 子 sink に順番に配送（1 つの失敗で止めない）
//! - `LogTransport`: tracing に書くだけの transport（デモ・開発用）

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{ExecutionResult, NotifyError, TransportError};
use crate::ports::notification::notify_isolated;
use crate::ports::{NotificationSink, NotificationTransport};

fn status_line(result: &ExecutionResult) -> String {
    let status = if result.succeeded() { "succeeded" } else { "failed" };
    match result.priority() {
        Some(priority) => format!("[{status}] [{priority}] {}", result.message()),
        None => format!("[{status}] {}", result.message()),
    }
}

/// EmailSink は結果をメールで届ける
pub struct EmailSink {
    recipient: String,
    transport: Arc<dyn NotificationTransport>,
    name: String,
}

impl EmailSink {
    pub fn new(recipient: impl Into<String>, transport: Arc<dyn NotificationTransport>) -> Self {
        let recipient = recipient.into();
        Self {
            name: format!("email:{recipient}"),
            recipient,
            transport,
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

#[async_trait]
impl NotificationSink for EmailSink {
    async fn notify(&self, result: &ExecutionResult) -> Result<(), NotifyError> {
        let subject = format!("Task '{}' ({})", result.task_title(), self.recipient);
        self.transport
            .send(&subject, &status_line(result))
            .await
            .map_err(|source| NotifyError::Transport {
                sink: self.name.clone(),
                source,
            })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// MessagingSink は結果をチャットのチャンネルへ届ける
pub struct MessagingSink {
    channel: String,
    transport: Arc<dyn NotificationTransport>,
    name: String,
}

impl MessagingSink {
    pub fn new(channel: impl Into<String>, transport: Arc<dyn NotificationTransport>) -> Self {
        let channel = channel.into();
        Self {
            name: format!("messaging:{channel}"),
            channel,
            transport,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

#[async_trait]
impl NotificationSink for MessagingSink {
    async fn notify(&self, result: &ExecutionResult) -> Result<(), NotifyError> {
        let title = format!("#{} {}", self.channel, result.task_title());
        self.transport
            .send(&title, &status_line(result))
            .await
            .map_err(|source| NotifyError::Transport {
                sink: self.name.clone(),
                source,
            })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// CompositeSink は子 sink に順番に配送する
///
/// 前の子が失敗（panic を含む）しても、後ろの子は必ず呼ばれます。
pub struct CompositeSink {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl CompositeSink {
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl NotificationSink for CompositeSink {
    async fn notify(&self, result: &ExecutionResult) -> Result<(), NotifyError> {
        let mut failed = 0;
        for sink in &self.sinks {
            match notify_isolated(sink.as_ref(), result).await {
                Ok(()) => debug!(sink = sink.name(), "notification delivered"),
                Err(err) => {
                    failed += 1;
                    warn!(sink = sink.name(), error = %err, "notification failed");
                }
            }
        }

        if failed == 0 {
            Ok(())
        } else {
            Err(NotifyError::Partial {
                failed,
                total: self.sinks.len(),
            })
        }
    }

    fn name(&self) -> &str {
        "composite"
    }
}

/// LogTransport は通知をログに書くだけ
#[derive(Debug, Clone)]
pub struct LogTransport {
    label: String,
}

impl LogTransport {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl NotificationTransport for LogTransport {
    async fn send(&self, title: &str, message: &str) -> Result<(), TransportError> {
        info!(transport = %self.label, %title, body = %message, "sending notification");
        Ok(())
    }
}
