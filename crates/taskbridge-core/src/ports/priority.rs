//! PriorityResolver port - Task から実効 Priority を決める
//!
//! Resolver は純粋関数として設計されます（副作用なし、失敗なし）。

use crate::domain::{Priority, Task};

/// PriorityResolver は Task の実効 Priority を決定
///
/// # 設計原則
/// - 純粋関数（同じ Task には常に同じ Priority）
/// - Task 自身の `declared_priority` を読むかどうかは実装の自由
pub trait PriorityResolver: Send + Sync {
    fn resolve(&self, task: &Task) -> Priority;
}

impl<F> PriorityResolver for F
where
    F: Fn(&Task) -> Priority + Send + Sync,
{
    fn resolve(&self, task: &Task) -> Priority {
        self(task)
    }
}
