//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **FixedPriorityResolver / KeywordPriorityResolver**
//! - **SynchronousStrategy / DelayedStrategy**
//! - **EmailSink / MessagingSink / CompositeSink / LogTransport**
//! - **TokioTimer**
//!
//! 実際のメール・チャットクライアントは core に含めません。
//! `NotificationTransport` を実装して注入してください。

pub mod notification;
pub mod priority;
pub mod strategy;
pub mod timer;

// 主要な型を再エクスポート
pub use self::notification::{CompositeSink, EmailSink, LogTransport, MessagingSink};
pub use self::priority::{FixedPriorityResolver, KeywordPriorityResolver, KeywordRule};
pub use self::strategy::{DelayedStrategy, SynchronousStrategy};
pub use self::timer::TokioTimer;
