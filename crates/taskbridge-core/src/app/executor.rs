//! TaskExecutor - 1 タスク = 1 ExecutionResult のオーケストレーション
//!
//! # フロー
//! 1. PriorityResolver で実効 priority を決める（純粋、失敗しない）
//! 2. TaskHandler から work function を組み立てる（まだ呼ばない）
//! 3. ExecutionStrategy に渡す（ここで suspend する可能性あり）
//! 4. 結果を登録順に各 NotificationSink へ配送（逐次）
//! 5. 通知の成否に関係なく結果を返す
//!
//! リトライはしません。必要なら呼び出し側が Task を再投入します。

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::domain::errors::panic_message;
use crate::domain::{ExecutionResult, Priority, Task, WorkError};
use crate::ports::{
    Clock, ExecutionStrategy, IdGenerator, NotificationSink, PriorityResolver, TaskHandler,
    WorkContext, WorkFn, work_fn,
};
use crate::ports::notification::notify_isolated;

use super::builder::TaskExecutorBuilder;
use super::status::{ExecutionCounts, ExecutorStats};

/// TaskExecutor は resolver / strategy / work source / 0 個以上の sink を束ねる
///
/// 協調オブジェクトはすべて不変に共有されるので、1 つの executor で並行
/// `run` を何本でも捌けます。可変状態は atomic な [`ExecutorStats`] だけです。
pub struct TaskExecutor {
    pub(crate) resolver: Arc<dyn PriorityResolver>,
    pub(crate) strategy: Arc<dyn ExecutionStrategy>,
    pub(crate) handler: Arc<dyn TaskHandler>,
    pub(crate) sinks: Vec<Arc<dyn NotificationSink>>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) ids: Arc<dyn IdGenerator>,
    pub(crate) stats: Arc<ExecutorStats>,
}

impl TaskExecutor {
    pub fn builder() -> TaskExecutorBuilder {
        TaskExecutorBuilder::new()
    }

    /// 外部キャンセルなしで 1 タスク実行
    pub async fn run(&self, task: Task) -> ExecutionResult {
        self.run_with_cancel(task, CancellationToken::new()).await
    }

    /// 1 タスク実行。`cancel` は work 開始前の待機を打ち切る
    pub async fn run_with_cancel(&self, task: Task, cancel: CancellationToken) -> ExecutionResult {
        self.stats.record_submitted();

        let run_id = self.ids.generate_run_id();
        let priority = self.resolver.resolve(&task);
        let span = info_span!(
            "task_run",
            %run_id,
            task_id = %task.id(),
            title = task.title(),
            %priority,
            strategy = self.strategy.name()
        );

        async {
            info!("executing task");
            let started_at = self.clock.now();

            let work = self.work_for(&task, priority, &cancel);
            let result = self
                .strategy
                .execute(&task, work, &cancel)
                .await
                .stamped(run_id, priority, started_at, self.clock.now());

            self.stats.record_result(&result);
            if result.succeeded() {
                info!(detail = result.message(), "task succeeded");
            } else {
                warn!(
                    detail = result.message(),
                    failure = ?result.failure_kind(),
                    "task did not succeed"
                );
            }

            self.dispatch(&result).await;
            result
        }
        .instrument(span)
        .await
    }

    /// work = handler 呼び出し。Err と panic は失敗の result になる
    fn work_for<'a>(
        &self,
        task: &'a Task,
        priority: Priority,
        cancel: &CancellationToken,
    ) -> WorkFn<'a> {
        let handler = Arc::clone(&self.handler);
        let ctx = WorkContext {
            task: task.clone(),
            priority,
            cancel: cancel.clone(),
        };

        work_fn(move || {
            async move {
                let outcome = AssertUnwindSafe(async move { handler.handle(ctx).await })
                    .catch_unwind()
                    .await;
                match outcome {
                    Ok(Ok(message)) => ExecutionResult::success(task, message),
                    Ok(Err(err)) => ExecutionResult::failure(task, &err.into()),
                    Err(panic) => ExecutionResult::failure(
                        task,
                        &WorkError::Panicked(panic_message(panic.as_ref())).into(),
                    ),
                }
            }
            .boxed()
        })
    }

    async fn dispatch(&self, result: &ExecutionResult) {
        for sink in &self.sinks {
            match notify_isolated(sink.as_ref(), result).await {
                Ok(()) => debug!(sink = sink.name(), "notification delivered"),
                Err(err) => {
                    self.stats.record_notification_failure();
                    warn!(sink = sink.name(), error = %err, "notification failed");
                }
            }
        }
    }

    pub fn counts(&self) -> ExecutionCounts {
        self.stats.counts()
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FailureKind, NotifyError};
    use crate::impls::notification::test_support::{PanickingTransport, RecordingTransport};
    use crate::impls::{
        CompositeSink, DelayedStrategy, EmailSink, FixedPriorityResolver, KeywordPriorityResolver,
        MessagingSink, TokioTimer,
    };
    use crate::ports::{FixedClock, handler_fn};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct CountingHandler {
        calls: AtomicU32,
    }

    impl CountingHandler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
            })
        }
    }

    #[async_trait]
    impl TaskHandler for CountingHandler {
        async fn handle(&self, ctx: WorkContext) -> Result<String, WorkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{} done at {}", ctx.task.title(), ctx.priority))
        }
    }

    /// 呼ばれた順番を記録する sink
    struct OrderSink {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    #[async_trait]
    impl NotificationSink for OrderSink {
        async fn notify(&self, _result: &ExecutionResult) -> Result<(), NotifyError> {
            self.log.lock().unwrap().push(self.label);
            if self.fail {
                Err(NotifyError::Partial { failed: 1, total: 1 })
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &str {
            self.label
        }
    }

    fn executor(handler: Arc<dyn TaskHandler>) -> TaskExecutor {
        TaskExecutor::builder()
            .resolver(Arc::new(KeywordPriorityResolver::title_aware()))
            .handler(handler)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn run_returns_result_for_the_submitted_task() {
        let handler = CountingHandler::new();
        let exec = executor(handler.clone());
        let task = Task::new("Urgent Financial Report", "year end").unwrap();

        let result = exec.run(task.clone()).await;

        assert!(result.succeeded());
        assert_eq!(result.task_title(), task.title());
        assert_eq!(result.task_id(), task.id());
        assert_eq!(result.priority(), Some(Priority::High));
        assert_eq!(result.message(), "Urgent Financial Report done at HIGH");
        assert!(result.run_id().is_some());
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn timestamps_come_from_the_clock() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let exec = TaskExecutor::builder()
            .handler(CountingHandler::new())
            .clock(Arc::new(FixedClock::new(at)))
            .build()
            .unwrap();

        let result = exec.run(Task::new("t", "").unwrap()).await;
        assert_eq!(result.started_at(), Some(at));
        assert_eq!(result.finished_at(), Some(at));
    }

    #[tokio::test]
    async fn work_error_becomes_failed_result() {
        let exec = executor(Arc::new(handler_fn(|_ctx: WorkContext| async {
            Err::<String, _>(WorkError::failed("disk full"))
        })));

        let result = exec.run(Task::new("Backup", "").unwrap()).await;

        assert!(!result.succeeded());
        assert_eq!(result.failure_kind(), Some(FailureKind::WorkFailed));
        assert!(result.message().contains("disk full"));
        assert_eq!(exec.counts().failed, 1);
    }

    #[tokio::test]
    async fn panicking_work_does_not_abort_the_executor() {
        let exec = executor(Arc::new(handler_fn(|ctx: WorkContext| async move {
            if ctx.task.title() == "explode" {
                panic!("boom");
            }
            Ok("fine".to_string())
        })));

        let result = exec.run(Task::new("explode", "").unwrap()).await;
        assert_eq!(result.failure_kind(), Some(FailureKind::Panicked));
        assert!(result.message().contains("boom"));

        let next = exec.run(Task::new("calm", "").unwrap()).await;
        assert!(next.succeeded());
    }

    #[tokio::test]
    async fn sinks_are_called_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let exec = TaskExecutor::builder()
            .handler(CountingHandler::new())
            .sink(Arc::new(OrderSink {
                label: "first",
                log: log.clone(),
                fail: false,
            }))
            .sink(Arc::new(OrderSink {
                label: "second",
                log: log.clone(),
                fail: true,
            }))
            .sink(Arc::new(OrderSink {
                label: "third",
                log: log.clone(),
                fail: false,
            }))
            .build()
            .unwrap();

        let result = exec.run(Task::new("t", "").unwrap()).await;

        assert!(result.succeeded());
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
        assert_eq!(exec.counts().notification_failures, 1);
    }

    #[tokio::test]
    async fn composite_failure_does_not_change_the_result() {
        let a = RecordingTransport::failing();
        let b = RecordingTransport::ok();
        let composite = CompositeSink::new(vec![
            Arc::new(EmailSink::new("a@example.com", a.clone())),
            Arc::new(MessagingSink::new("b", b.clone())),
        ]);
        let exec = TaskExecutor::builder()
            .handler(CountingHandler::new())
            .sink(Arc::new(composite))
            .build()
            .unwrap();

        let result = exec.run(Task::new("Weekly Report", "").unwrap()).await;

        assert!(result.succeeded());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn panicking_sink_does_not_lose_the_result() {
        let in_composite = RecordingTransport::ok();
        let after = RecordingTransport::ok();
        let composite = CompositeSink::new(vec![
            Arc::new(EmailSink::new("a@example.com", Arc::new(PanickingTransport))),
            Arc::new(MessagingSink::new("b", in_composite.clone())),
        ]);
        let exec = Arc::new(
            TaskExecutor::builder()
                .handler(CountingHandler::new())
                .sink(Arc::new(composite))
                .sink(Arc::new(EmailSink::new("c@example.com", Arc::new(PanickingTransport))))
                .sink(Arc::new(MessagingSink::new("d", after.clone())))
                .build()
                .unwrap(),
        );

        let runner = Arc::clone(&exec);
        let result = tokio::spawn(async move {
            runner.run(Task::new("Weekly Report", "").unwrap()).await
        })
        .await
        .unwrap();

        assert!(result.succeeded());
        assert_eq!(in_composite.calls(), 1);
        assert_eq!(after.calls(), 1);
        let counts = exec.counts();
        assert_eq!(counts.succeeded, 1);
        assert_eq!(counts.notification_failures, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_delayed_run_skips_work_but_still_notifies() {
        let handler = CountingHandler::new();
        let transport = RecordingTransport::ok();
        let exec = TaskExecutor::builder()
            .strategy(Arc::new(DelayedStrategy::new(
                Duration::from_secs(30),
                Arc::new(TokioTimer),
            )))
            .handler(handler.clone())
            .sink(Arc::new(EmailSink::new("ops@example.com", transport.clone())))
            .build()
            .unwrap();

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            trigger.cancel();
        });

        let task = Task::new("Weekly Report", "").unwrap();
        let result = exec.run_with_cancel(task.clone(), cancel).await;

        assert!(!result.succeeded());
        assert!(result.is_cancelled());
        assert_eq!(result.task_title(), task.title());
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
        assert_eq!(transport.calls(), 1);
        assert_eq!(exec.counts().cancelled, 1);
    }

    #[tokio::test]
    async fn concurrent_runs_do_not_mix_results() {
        let exec = Arc::new(
            TaskExecutor::builder()
                .resolver(Arc::new(FixedPriorityResolver::new(Priority::Medium)))
                .handler(CountingHandler::new())
                .build()
                .unwrap(),
        );

        let handles: Vec<_> = (0..100)
            .map(|i| {
                let exec = Arc::clone(&exec);
                tokio::spawn(async move {
                    let task = Task::new(format!("task {i}"), "").unwrap();
                    exec.run(task).await
                })
            })
            .collect();

        let joined_all = futures::future::join_all(handles).await;
        for (i, joined) in joined_all.into_iter().enumerate() {
            let result = joined.unwrap();
            assert_eq!(result.task_title(), format!("task {i}"));
            assert_eq!(result.message(), format!("task {i} done at MEDIUM"));
        }
        assert_eq!(exec.counts().submitted, 100);
        assert_eq!(exec.counts().succeeded, 100);
    }
}
