//! 关系平衡分与提示语
//!
//! 当前分数只看记录总数：每多一条记录扣 10 分，最低 0 分。
//! 不区分状态，也不区分是谁欠谁。

use crate::favor::models::FavorRecord;
use serde::Serialize;
use std::fmt;

/// 满分
pub const MAX_SCORE: u8 = 100;

/// 每条记录扣的分数
pub const PENALTY_PER_FAVOR: usize = 10;

/// 计算平衡分：`max(100 - 10 * n, 0)`
pub fn compute_score(records: &[FavorRecord]) -> u8 {
    score_for_count(records.len())
}

pub fn score_for_count(count: usize) -> u8 {
    let penalty = count.saturating_mul(PENALTY_PER_FAVOR);
    // 结果不超过 100，转换不会截断
    (MAX_SCORE as usize).saturating_sub(penalty) as u8
}

/// 平衡程度分档
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceLevel {
    /// (80, 100]
    VeryBalanced,
    /// (60, 80]
    FairlyBalanced,
    /// (40, 60]
    MildImbalance,
    /// (20, 40]
    SignificantImbalance,
    /// [0, 20]
    UrgentImbalance,
}

impl BalanceLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            81.. => BalanceLevel::VeryBalanced,
            61..=80 => BalanceLevel::FairlyBalanced,
            41..=60 => BalanceLevel::MildImbalance,
            21..=40 => BalanceLevel::SignificantImbalance,
            0..=20 => BalanceLevel::UrgentImbalance,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BalanceLevel::VeryBalanced => "very balanced",
            BalanceLevel::FairlyBalanced => "fairly balanced",
            BalanceLevel::MildImbalance => "mild imbalance",
            BalanceLevel::SignificantImbalance => "significant imbalance",
            BalanceLevel::UrgentImbalance => "urgent imbalance",
        }
    }

    /// 仪表盘上的表情标记
    pub fn tag(&self) -> &'static str {
        match self {
            BalanceLevel::VeryBalanced => "🟢😊",
            BalanceLevel::FairlyBalanced => "🟡🙂",
            BalanceLevel::MildImbalance => "🟠🤔",
            BalanceLevel::SignificantImbalance => "🔴😟",
            BalanceLevel::UrgentImbalance => "⚫️😢",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BalanceLevel::VeryBalanced => "Your relationships are very balanced, keep it up!",
            BalanceLevel::FairlyBalanced => {
                "Your relationships are fairly balanced, keep communicating."
            }
            BalanceLevel::MildImbalance => {
                "Some imbalance is showing, pay attention to reciprocating."
            }
            BalanceLevel::SignificantImbalance => {
                "Your relationships are out of balance, return some favors!"
            }
            BalanceLevel::UrgentImbalance => {
                "Time to repair your relationships, do a favor to restore the balance!"
            }
        }
    }
}

/// 分数对应的提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub level: BalanceLevel,
    pub tag: &'static str,
    pub message: &'static str,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tag, self.message)
    }
}

/// 分数到提示的映射，对任意 u8 都有定义（超过 100 按最高档处理）
pub fn derive_insight(score: u8) -> Insight {
    let level = BalanceLevel::from_score(score);
    Insight {
        level,
        tag: level.tag(),
        message: level.message(),
    }
}

/// 仪表盘摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub favor_count: usize,
    pub score: u8,
    pub insight: Insight,
}

impl BalanceSummary {
    /// 没有任何记录时仪表盘展示空状态
    pub fn is_empty(&self) -> bool {
        self.favor_count == 0
    }
}

pub fn summarize(records: &[FavorRecord]) -> BalanceSummary {
    let score = compute_score(records);
    BalanceSummary {
        favor_count: records.len(),
        score,
        insight: derive_insight(score),
    }
}
