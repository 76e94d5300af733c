//! App - アプリケーション層
//!
//! ports を組み合わせて executor を組み立てます。
//!
//! # 主要コンポーネント
//! - **TaskExecutor**: resolve → execute → notify のオーケストレーション
//! - **TaskExecutorBuilder**: 構築とワイヤリング（fail-fast）
//! - **ExecutorConfig**: JSON 設定からの構築
//! - **ExecutorStats**: atomic カウンタ

pub mod builder;
pub mod config;
pub mod executor;
pub mod status;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, TaskExecutorBuilder};
pub use self::config::{
    ExecutorConfig, NotificationConfig, ResolverConfig, StrategyConfig, Transports,
};
pub use self::executor::TaskExecutor;
pub use self::status::{ExecutionCounts, ExecutorStats};
