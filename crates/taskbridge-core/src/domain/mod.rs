//! Domain model (ids, task, priority, result, errors).

pub mod errors;
pub mod ids;
pub mod priority;
pub mod result;
pub mod task;

pub use self::errors::{
    ConfigError, ExecutionError, NotifyError, ParsePriorityError, TaskError, TransportError,
    WorkError,
};
pub use self::ids::{RunId, TaskId};
pub use self::priority::Priority;
pub use self::result::{ExecutionResult, FailureKind};
pub use self::task::{ExternalTask, Task, TaskBuilder, TaskKind};
