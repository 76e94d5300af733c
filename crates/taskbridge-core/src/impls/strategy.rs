//! Strategy impls - 組み込みの実行方式
//!
//! - `SynchronousStrategy`: work をその場で呼ぶ
//! - `DelayedStrategy`: Timer で待ってから呼ぶ（待機中のキャンセルで work は呼ばない）

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{ExecutionResult, Task};
use crate::ports::{ExecutionStrategy, SleepOutcome, Timer, WorkFn};

#[derive(Debug, Clone, Copy, Default)]
pub struct SynchronousStrategy;

impl SynchronousStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExecutionStrategy for SynchronousStrategy {
    async fn execute<'a>(
        &self,
        _task: &'a Task,
        work: WorkFn<'a>,
        _cancel: &CancellationToken,
    ) -> ExecutionResult {
        work().await
    }

    fn name(&self) -> &'static str {
        "synchronous"
    }
}

/// DelayedStrategy は `delay` だけ待ってから work を呼ぶ
pub struct DelayedStrategy {
    delay: Duration,
    timer: Arc<dyn Timer>,
}

impl DelayedStrategy {
    pub fn new(delay: Duration, timer: Arc<dyn Timer>) -> Self {
        Self { delay, timer }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ExecutionStrategy for DelayedStrategy {
    async fn execute<'a>(
        &self,
        task: &'a Task,
        work: WorkFn<'a>,
        cancel: &CancellationToken,
    ) -> ExecutionResult {
        match self.timer.sleep(self.delay, cancel).await {
            SleepOutcome::Completed => work().await,
            SleepOutcome::Cancelled => ExecutionResult::cancelled(task),
        }
    }

    fn name(&self) -> &'static str {
        "delayed"
    }
}
