use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{FinancialInput, HistoryRecord};
use super::money::format_currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    NoData,
    Increased,
    Decreased,
    Stable,
}

impl TrendDirection {
    pub const fn label(self) -> &'static str {
        match self {
            TrendDirection::NoData => "no data available",
            TrendDirection::Increased => "increased",
            TrendDirection::Decreased => "decreased",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Debt movement since the previous submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Current debt minus prior debt; positive when debt grew.
    pub change: Decimal,
    pub previous_debt: Option<Decimal>,
    pub description: String,
}

/// One point of the debt series a chart renderer plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPoint {
    pub captured_at: DateTime<Utc>,
    pub debt: Decimal,
}

/// The record immediately preceding the current submission.
///
/// `history` is most-recent-first and includes the current submission at index 0.
pub(crate) fn prior_record(history: &[HistoryRecord]) -> Option<&HistoryRecord> {
    if history.len() < 2 {
        None
    } else {
        history.get(1)
    }
}

pub fn analyze_trend(input: &FinancialInput, history: &[HistoryRecord]) -> TrendResult {
    let Some(prior) = prior_record(history) else {
        return TrendResult {
            direction: TrendDirection::NoData,
            change: Decimal::ZERO,
            previous_debt: None,
            description: "No historical data available.".to_string(),
        };
    };

    let previous = prior.snapshot.sanitized().debt;
    let change = input.debt - previous;

    let (direction, description) = if change > Decimal::ZERO {
        (
            TrendDirection::Increased,
            format!("Debt increased by {} - need action plan", format_currency(change)),
        )
    } else if change < Decimal::ZERO {
        (
            TrendDirection::Decreased,
            format!(
                "Debt reduced by {} - excellent progress!",
                format_currency(-change)
            ),
        )
    } else {
        (
            TrendDirection::Stable,
            "Debt stable - maintain current strategy".to_string(),
        )
    };

    TrendResult {
        direction,
        change,
        previous_debt: Some(previous),
        description,
    }
}

/// Debt series ordered oldest-first.
pub fn debt_series(history: &[HistoryRecord]) -> Vec<DebtPoint> {
    history
        .iter()
        .rev()
        .map(|record| DebtPoint {
            captured_at: record.captured_at,
            debt: record.snapshot.sanitized().debt,
        })
        .collect()
}
