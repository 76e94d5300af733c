//! TaskHandler port - タスクの「仕事」を提供する work source
//!
//! Core は handler の中身を知りません。完了したかどうかと、返ってきた
//! メッセージだけを記録します。

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{Priority, Task, WorkError};

/// WorkContext は handler が仕事中に参照できるもの一式
#[derive(Debug, Clone)]
pub struct WorkContext {
    pub task: Task,
    pub priority: Priority,

    /// strategy が見ているのと同じシグナル（長い work はこれを見てよい）
    pub cancel: CancellationToken,
}

/// Handler は Task の仕事を実行してメッセージを返す
///
/// # 使用例
/// ```ignore
/// struct ReportHandler;
///
/// #[async_trait]
/// impl TaskHandler for ReportHandler {
///     async fn handle(&self, ctx: WorkContext) -> Result<String, WorkError> {
///         Ok(format!("{} Report generated successfully.", ctx.task.title()))
///     }
/// }
/// ```
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn handle(&self, ctx: WorkContext) -> Result<String, WorkError>;
}

/// async closure を [`TaskHandler`] にするアダプタ
pub struct FnHandler<F, Fut> {
    f: F,
    _marker: PhantomData<fn() -> Fut>,
}

/// `Fn(WorkContext) -> impl Future<Output = Result<String, WorkError>>` から handler を作る
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F, Fut>
where
    F: Fn(WorkContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, WorkError>> + Send,
{
    FnHandler {
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<F, Fut> TaskHandler for FnHandler<F, Fut>
where
    F: Fn(WorkContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, WorkError>> + Send,
{
    async fn handle(&self, ctx: WorkContext) -> Result<String, WorkError> {
        (self.f)(ctx).await
    }
}
