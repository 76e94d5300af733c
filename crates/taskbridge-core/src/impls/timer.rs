//! TokioTimer - tokio::time ベースの Timer

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::ports::{SleepOutcome, Timer};

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration, cancel: &CancellationToken) -> SleepOutcome {
        tokio::select! {
            // 同時ならキャンセル優先
            biased;
            _ = cancel.cancelled() => SleepOutcome::Cancelled,
            _ = tokio::time::sleep(duration) => SleepOutcome::Completed,
        }
    }
}
