//! taskbridge-core
//!
//! タスク実行と結果通知のコア。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Task, Priority, ExecutionResult, ids, errors）
//! - **ports**: 抽象化レイヤー（PriorityResolver, ExecutionStrategy, TaskHandler, NotificationSink, Timer, Clock）
//! - **impls**: ports の実装（Keyword/Fixed resolver, Synchronous/Delayed strategy, Email/Messaging/Composite sink）
//! - **app**: TaskExecutor とその builder / config / stats
//!
//! 1 つの Task は `TaskExecutor::run` を 1 回通り、work や通知がどうなっても
//! `ExecutionResult` をちょうど 1 つ返します。

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{ExecutorConfig, TaskExecutor, TaskExecutorBuilder};
pub use domain::{ExecutionResult, Priority, Task};
