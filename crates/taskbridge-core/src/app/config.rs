//! ExecutorConfig - JSON で executor を組み立てる
//!
//! ```json
//! {
//!   "strategy": { "kind": "delayed", "delay_ms": 1000 },
//!   "resolver": {
//!     "kind": "keyword",
//!     "rules": [
//!       { "keyword": "urgent", "priority": "high" },
//!       { "keyword": "report", "priority": "medium" }
//!     ],
//!     "default": "low"
//!   },
//!   "notifications": [
//!     { "kind": "email", "recipient": "ops@example.com" },
//!     { "kind": "messaging", "channel": "finance" }
//!   ]
//! }
//! ```
//!
//! 省略したセクションはデフォルト（synchronous, title-aware keyword, 通知なし）。

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{ConfigError, Priority};
use crate::impls::{
    DelayedStrategy, EmailSink, FixedPriorityResolver, KeywordPriorityResolver, KeywordRule,
    MessagingSink, SynchronousStrategy,
};
use crate::ports::{
    ExecutionStrategy, NotificationSink, NotificationTransport, PriorityResolver, Timer,
};

use super::builder::TaskExecutorBuilder;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StrategyConfig {
    #[default]
    Synchronous,
    Delayed {
        delay_ms: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolverConfig {
    Fixed {
        priority: Priority,
    },
    Keyword {
        rules: Vec<KeywordRule>,
        #[serde(default = "default_priority")]
        default: Priority,
    },
}

fn default_priority() -> Priority {
    Priority::Low
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let preset = KeywordPriorityResolver::title_aware();
        Self::Keyword {
            rules: preset.rules().to_vec(),
            default: preset.default_priority(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NotificationConfig {
    Email { recipient: String },
    Messaging { channel: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub strategy: StrategyConfig,
    pub resolver: ResolverConfig,
    pub notifications: Vec<NotificationConfig>,
}

/// 設定から作る sink が使う transport
#[derive(Clone)]
pub struct Transports {
    pub email: Arc<dyn NotificationTransport>,
    pub messaging: Arc<dyn NotificationTransport>,
}

impl ExecutorConfig {
    /// パースして validate まで行う
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ExecutorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ResolverConfig::Keyword { rules, .. } = &self.resolver {
            if let Some(index) = rules.iter().position(|r| r.keyword.trim().is_empty()) {
                return Err(ConfigError::EmptyKeyword { index });
            }
        }

        for (index, notification) in self.notifications.iter().enumerate() {
            let (kind, field, value) = match notification {
                NotificationConfig::Email { recipient } => ("email", "recipient", recipient),
                NotificationConfig::Messaging { channel } => ("messaging", "channel", channel),
            };
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyNotificationTarget { kind, field, index });
            }
        }
        Ok(())
    }

    pub fn build_resolver(&self) -> Arc<dyn PriorityResolver> {
        match &self.resolver {
            ResolverConfig::Fixed { priority } => Arc::new(FixedPriorityResolver::new(*priority)),
            ResolverConfig::Keyword { rules, default } => {
                Arc::new(KeywordPriorityResolver::new(rules.iter().cloned(), *default))
            }
        }
    }

    pub fn build_strategy(&self, timer: Arc<dyn Timer>) -> Arc<dyn ExecutionStrategy> {
        match self.strategy {
            StrategyConfig::Synchronous => Arc::new(SynchronousStrategy),
            StrategyConfig::Delayed { delay_ms } => {
                Arc::new(DelayedStrategy::new(Duration::from_millis(delay_ms), timer))
            }
        }
    }

    pub fn build_sinks(&self, transports: &Transports) -> Vec<Arc<dyn NotificationSink>> {
        self.notifications
            .iter()
            .map(|n| -> Arc<dyn NotificationSink> {
                match n {
                    NotificationConfig::Email { recipient } => Arc::new(EmailSink::new(
                        recipient.clone(),
                        Arc::clone(&transports.email),
                    )),
                    NotificationConfig::Messaging { channel } => Arc::new(MessagingSink::new(
                        channel.clone(),
                        Arc::clone(&transports.messaging),
                    )),
                }
            })
            .collect()
    }
}

impl TaskExecutorBuilder {
    /// `config` の resolver / strategy / sink を設定済みの builder
    ///
    /// handler は `build()` の前に別途渡す必要があります。
    pub fn from_config(
        config: &ExecutorConfig,
        transports: &Transports,
        timer: Arc<dyn Timer>,
    ) -> Self {
        TaskExecutorBuilder::new()
            .resolver(config.build_resolver())
            .strategy(config.build_strategy(timer))
            .sinks(config.build_sinks(transports))
    }
}
