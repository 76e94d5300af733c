//! IdGenerator port - ID 生成の抽象化
//!
//! テスト容易性のために trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（Clock から timestamp を取る）

use crate::domain::ids::{RunId, TaskId};
use crate::domain::{Task, TaskBuilder, TaskError};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は分散環境でも衝突しない ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（executor は複数タスクから同時に使う）
pub trait IdGenerator: Send + Sync {
    fn generate_task_id(&self) -> TaskId;

    fn generate_run_id(&self) -> RunId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// FixedClock を使うと timestamp 部分が決定的になります。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_task_id(&self) -> TaskId {
        TaskId::from(self.next_ulid())
    }

    fn generate_run_id(&self) -> RunId {
        RunId::from(self.next_ulid())
    }
}

impl TaskBuilder {
    /// `ids` から採番して build（FixedClock なら timestamp が決定的）
    pub fn build_with(self, ids: &dyn IdGenerator) -> Result<Task, TaskError> {
        self.build_with_id(ids.generate_task_id())
    }
}
