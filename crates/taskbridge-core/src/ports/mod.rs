//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! executor は各 trait を `Arc<dyn ...>` で受け取り、実装の詳細を知りません。
//!
//! - 優先度の決定（PriorityResolver）
//! - 実行方式（ExecutionStrategy + Timer）
//! - 仕事の中身（TaskHandler）
//! - 結果の配送（NotificationSink + NotificationTransport）
//! - 時刻と ID（Clock, IdGenerator）

pub mod clock;
pub mod handler;
pub mod id_generator;
pub mod notification;
pub mod priority;
pub mod strategy;
pub mod timer;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::handler::{FnHandler, TaskHandler, WorkContext, handler_fn};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::notification::{NotificationSink, NotificationTransport};
pub use self::priority::PriorityResolver;
pub use self::strategy::{ExecutionStrategy, WorkFn, work_fn};
pub use self::timer::{SleepOutcome, Timer};
