//! Timer port - キャンセル可能な sleep
//!
//! Delayed 実行の唯一の suspension point です。キャンセルは例外ではなく
//! `SleepOutcome::Cancelled` という値で返ります。

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    Completed,
    Cancelled,
}

#[async_trait]
pub trait Timer: Send + Sync {
    /// `cancel` が先に発火しなければ `duration` だけ待つ
    ///
    /// 既にキャンセル済みの token なら待たずに `Cancelled` を返します。
    async fn sleep(&self, duration: Duration, cancel: &CancellationToken) -> SleepOutcome;
}
