//! Domain identifiers - 型付き ID
//!
//! ULID ベースの ID を Phantom type パターンで包んでいます。
//! `TaskId` と `RunId` は同じ表現を持ちますが、型としては混同できません。
//!
//! - **TaskId**: Task の同一性（clone しても同じ、derive すると新しい ID）
//! - **RunId**: `TaskExecutor::run` 1 回ごとの実行 ID（ログ相関用）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"task-", "run-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は PhantomData で、実行時にはメモリを消費しません。
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

// derive(Clone, Copy) だと `T: Copy` が要求される（marker は値を持たない）
impl<T: IdMarker> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: IdMarker> Copy for Id<T> {}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// システム時刻とスレッド RNG から新しい ID を作る
    ///
    /// timestamp を制御したい場合は `IdGenerator` を使ってください。
    pub fn generate() -> Self {
        Self::from_ulid(Ulid::new())
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Task のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskMarker {}

impl IdMarker for TaskMarker {
    fn prefix() -> &'static str {
        "task-"
    }
}

/// Run のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RunMarker {}

impl IdMarker for RunMarker {
    fn prefix() -> &'static str {
        "run-"
    }
}

/// Task の ID
pub type TaskId = Id<TaskMarker>;

/// `TaskExecutor::run` 1 回分の ID
pub type RunId = Id<RunMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_type_prefix() {
        let task_id = TaskId::generate();
        let run_id = RunId::generate();

        assert!(task_id.to_string().starts_with("task-"));
        assert!(run_id.to_string().starts_with("run-"));
    }

    #[test]
    fn ids_are_copy_and_comparable() {
        let ulid = Ulid::new();
        let a = TaskId::from(ulid);
        let b = a;
        assert_eq!(a, b);
        assert_eq!(a.as_ulid(), ulid);
    }

    #[test]
    fn id_serializes_as_plain_ulid() {
        let ulid = Ulid::new();
        let id = RunId::from_ulid(ulid);

        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, format!("\"{ulid}\""));

        let back: RunId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, id);
    }
}
