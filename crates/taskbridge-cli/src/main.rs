use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use taskbridge_core::app::{ExecutorConfig, TaskExecutorBuilder, Transports};
use taskbridge_core::domain::{ExternalTask, Priority, Task, WorkError};
use taskbridge_core::impls::{
    CompositeSink, DelayedStrategy, EmailSink, FixedPriorityResolver, KeywordPriorityResolver,
    LogTransport, MessagingSink, TokioTimer,
};
use taskbridge_core::ports::{TaskHandler, WorkContext};
use taskbridge_core::TaskExecutor;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pretends to generate a report; takes a little while.
struct ReportHandler {
    work_time: Duration,
}

#[async_trait]
impl TaskHandler for ReportHandler {
    async fn handle(&self, ctx: WorkContext) -> Result<String, WorkError> {
        info!(title = ctx.task.title(), "generating report...");
        tokio::select! {
            _ = ctx.cancel.cancelled() => Err(WorkError::failed("report generation was cancelled")),
            _ = tokio::time::sleep(self.work_time) => {
                Ok(format!("{} generated successfully.", ctx.task.title()))
            }
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Same tasks, different priority policies.
async fn priority_demo(handler: Arc<dyn TaskHandler>) -> anyhow::Result<()> {
    let urgent = Task::new("Urgent Financial Report", "Q4 numbers")?;
    let regular = Task::new("Weekly Report", "team status")?;

    let always_high = TaskExecutor::builder()
        .resolver(Arc::new(FixedPriorityResolver::new(Priority::High)))
        .handler(Arc::clone(&handler))
        .build()?;
    let title_aware = TaskExecutor::builder()
        .resolver(Arc::new(KeywordPriorityResolver::title_aware()))
        .handler(Arc::clone(&handler))
        .build()?;
    let fallback = TaskExecutor::builder()
        .resolver(Arc::new(FixedPriorityResolver::new(Priority::Low)))
        .handler(handler)
        .build()?;

    for (executor, task) in [
        (&always_high, urgent.clone()),
        (&title_aware, urgent),
        (&fallback, regular),
    ] {
        let result = executor.run(task).await;
        println!(
            "{} -> priority={} succeeded={} message={}",
            result.task_title(),
            result.priority().map(|p| p.to_string()).unwrap_or_default(),
            result.succeeded(),
            result.message()
        );
    }
    Ok(())
}

/// One result, fanned out to email and messaging.
async fn notification_demo(handler: Arc<dyn TaskHandler>) -> anyhow::Result<()> {
    let composite = CompositeSink::new(vec![
        Arc::new(EmailSink::new(
            "finance@example.com",
            Arc::new(LogTransport::new("email")),
        )),
        Arc::new(MessagingSink::new(
            "finance",
            Arc::new(LogTransport::new("messaging")),
        )),
    ]);
    let executor = TaskExecutor::builder()
        .handler(handler)
        .sink(Arc::new(composite))
        .build()?;

    let external = ExternalTask {
        task_name: "End-of-Year Financial Report".to_string(),
        task_detail: "Adapted from the external tracker".to_string(),
        is_completed: false,
    };
    let result = executor.run(Task::try_from(external)?).await;
    println!("notified: {}", result.message());
    Ok(())
}

/// A delayed run that gets cancelled before its delay elapses.
async fn cancellation_demo(handler: Arc<dyn TaskHandler>) -> anyhow::Result<()> {
    let executor = TaskExecutor::builder()
        .strategy(Arc::new(DelayedStrategy::new(
            Duration::from_secs(5),
            Arc::new(TokioTimer),
        )))
        .handler(handler)
        .build()?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let result = executor
        .run_with_cancel(Task::new("Deferred Cleanup", "")?, cancel)
        .await;
    println!(
        "cancelled={} message={} counts={:?}",
        result.is_cancelled(),
        result.message(),
        executor.counts()
    );
    Ok(())
}

/// Run a task through an executor built from a JSON config file.
async fn config_demo(path: &str, handler: Arc<dyn TaskHandler>) -> anyhow::Result<()> {
    let config = ExecutorConfig::from_path(path)?;
    let transports = Transports {
        email: Arc::new(LogTransport::new("email")),
        messaging: Arc::new(LogTransport::new("messaging")),
    };
    let executor = TaskExecutorBuilder::from_config(&config, &transports, Arc::new(TokioTimer))
        .handler(handler)
        .build()?;

    let result = executor
        .run(Task::new("Urgent Quarterly Report", "from config")?)
        .await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let handler: Arc<dyn TaskHandler> = Arc::new(ReportHandler {
        work_time: Duration::from_millis(300),
    });

    if let Some(path) = std::env::args().nth(1) {
        return config_demo(&path, handler).await;
    }

    priority_demo(Arc::clone(&handler)).await?;
    notification_demo(Arc::clone(&handler)).await?;
    cancellation_demo(handler).await?;
    Ok(())
}
