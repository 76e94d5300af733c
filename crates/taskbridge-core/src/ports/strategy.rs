//! ExecutionStrategy port - 「どう実行するか」を Task から切り離す
//!
//! Task と実行方式は独立に差し替えられます（Bridge）。Strategy は
//! ログも通知もしません。それは executor の責務です。

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::domain::{ExecutionResult, Task};

/// 遅延 work: closure を呼んで future を await するまで何も走らない
pub type WorkFn<'a> = Box<dyn FnOnce() -> BoxFuture<'a, ExecutionResult> + Send + 'a>;

/// closure を [`WorkFn`] に包む
pub fn work_fn<'a, F>(f: F) -> WorkFn<'a>
where
    F: FnOnce() -> BoxFuture<'a, ExecutionResult> + Send + 'a,
{
    Box::new(f)
}

/// ExecutionStrategy は work をいつ・どのように呼ぶかを決める
///
/// # 契約
/// - 呼び出しごとに必ず 1 つの `ExecutionResult` を返す
/// - `work` を呼ばなかった場合（キャンセル等）は失敗の result を自分で作る
#[async_trait]
pub trait ExecutionStrategy: Send + Sync {
    async fn execute<'a>(
        &self,
        task: &'a Task,
        work: WorkFn<'a>,
        cancel: &CancellationToken,
    ) -> ExecutionResult;

    /// ログ用の短いラベル（`"synchronous"`, `"delayed"`）
    fn name(&self) -> &'static str;
}
