//! Priority impls - 組み込みの resolver
//!
//! - `FixedPriorityResolver`: 入力に関係なく定数
//! - `KeywordPriorityResolver`: タイトルのキーワード（大文字小文字無視、先勝ち）

use serde::{Deserialize, Serialize};

use crate::domain::{Priority, Task};
use crate::ports::PriorityResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPriorityResolver {
    priority: Priority,
}

impl FixedPriorityResolver {
    pub fn new(priority: Priority) -> Self {
        Self { priority }
    }
}

impl PriorityResolver for FixedPriorityResolver {
    fn resolve(&self, _task: &Task) -> Priority {
        self.priority
    }
}

/// `(keyword, priority)` のルール 1 件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub priority: Priority,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, priority: Priority) -> Self {
        Self {
            keyword: keyword.into(),
            priority,
        }
    }
}

/// KeywordPriorityResolver はタイトルに対する順序付きキーワードルール
///
/// ルールを先頭から試し、タイトルに含まれる最初のキーワード（大文字小文字無視）が
/// 勝ちます。どれにも当たらなければ `default`。同点判定はルール順のみです。
/// 空キーワードはすべてのタイトルにマッチします。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPriorityResolver {
    // keyword は小文字で保持
    rules: Vec<KeywordRule>,
    default: Priority,
}

impl KeywordPriorityResolver {
    pub fn new(rules: impl IntoIterator<Item = KeywordRule>, default: Priority) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| KeywordRule::new(rule.keyword.to_lowercase(), rule.priority))
            .collect();
        Self { rules, default }
    }

    /// `urgent` → high, `report` → medium, それ以外は low
    pub fn title_aware() -> Self {
        Self::new(
            [
                KeywordRule::new("urgent", Priority::High),
                KeywordRule::new("report", Priority::Medium),
            ],
            Priority::Low,
        )
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn default_priority(&self) -> Priority {
        self.default
    }
}

impl PriorityResolver for KeywordPriorityResolver {
    fn resolve(&self, task: &Task) -> Priority {
        let title = task.title().to_lowercase();
        self.rules
            .iter()
            .find(|rule| title.contains(rule.keyword.as_str()))
            .map(|rule| rule.priority)
            .unwrap_or(self.default)
    }
}
