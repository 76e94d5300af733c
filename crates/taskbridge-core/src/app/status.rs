//! Status - executor のカウンタ
//!
//! executor が持つ唯一の共有可変状態です。すべて atomic で更新します。

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::domain::ExecutionResult;

/// [`ExecutorStats`] のスナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionCounts {
    pub submitted: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub cancelled: u64,
    pub notification_failures: u64,
}

#[derive(Debug, Default)]
pub struct ExecutorStats {
    submitted: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    cancelled: AtomicU64,
    notification_failures: AtomicU64,
}

impl ExecutorStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// キャンセルは `cancelled` のみに数え、`failed` には入れない
    pub(crate) fn record_result(&self, result: &ExecutionResult) {
        let counter = if result.succeeded() {
            &self.succeeded
        } else if result.is_cancelled() {
            &self.cancelled
        } else {
            &self.failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_notification_failure(&self) {
        self.notification_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn counts(&self) -> ExecutionCounts {
        ExecutionCounts {
            submitted: self.submitted.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            notification_failures: self.notification_failures.load(Ordering::Relaxed),
        }
    }
}
