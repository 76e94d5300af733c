//! TaskExecutorBuilder - executor の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - work source（TaskHandler）が無ければ build() で BuildError
//! - それ以外の port はデフォルトを持つ

use std::sync::Arc;

use crate::impls::{KeywordPriorityResolver, SynchronousStrategy};
use crate::ports::{
    Clock, ExecutionStrategy, IdGenerator, NotificationSink, PriorityResolver, SystemClock,
    TaskHandler, UlidGenerator,
};

use super::executor::TaskExecutor;
use super::status::ExecutorStats;

/// BuildError は executor 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no task handler registered; call .handler(...) before build()")]
    MissingHandler,
}

/// TaskExecutorBuilder は [`TaskExecutor`] を組み立てる
///
/// # 使用例
/// ```ignore
/// let executor = TaskExecutor::builder()
///     .resolver(Arc::new(KeywordPriorityResolver::title_aware()))
///     .strategy(Arc::new(SynchronousStrategy))
///     .handler(Arc::new(ReportHandler))
///     .sink(Arc::new(EmailSink::new("ops@example.com", transport)))
///     .build()?;
/// ```
///
/// デフォルト: title-aware keyword resolver, synchronous strategy, SystemClock,
/// ULID の run id, sink なし。
pub struct TaskExecutorBuilder {
    resolver: Arc<dyn PriorityResolver>,
    strategy: Arc<dyn ExecutionStrategy>,
    handler: Option<Arc<dyn TaskHandler>>,
    sinks: Vec<Arc<dyn NotificationSink>>,
    clock: Arc<dyn Clock>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl TaskExecutorBuilder {
    pub fn new() -> Self {
        Self {
            resolver: Arc::new(KeywordPriorityResolver::title_aware()),
            strategy: Arc::new(SynchronousStrategy),
            handler: None,
            sinks: Vec::new(),
            clock: Arc::new(SystemClock),
            ids: None,
        }
    }

    pub fn resolver(mut self, resolver: Arc<dyn PriorityResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn strategy(mut self, strategy: Arc<dyn ExecutionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn handler(mut self, handler: Arc<dyn TaskHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// sink を追加する（配送順 = 登録順）
    pub fn sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sinks(mut self, sinks: impl IntoIterator<Item = Arc<dyn NotificationSink>>) -> Self {
        self.sinks.extend(sinks);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 未指定なら設定済みの Clock から ULID を採番する
    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(self) -> Result<TaskExecutor, BuildError> {
        let handler = self.handler.ok_or(BuildError::MissingHandler)?;
        let ids: Arc<dyn IdGenerator> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(UlidGenerator::new(Arc::clone(&self.clock))),
        };

        Ok(TaskExecutor {
            resolver: self.resolver,
            strategy: self.strategy,
            handler,
            sinks: self.sinks,
            clock: self.clock,
            ids,
            stats: Arc::new(ExecutorStats::new()),
        })
    }
}

impl Default for TaskExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
