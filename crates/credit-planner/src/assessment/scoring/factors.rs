use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::super::domain::{FinancialInput, JobStability};
use super::super::money::format_currency;
use super::config::{ScoreModel, ScoringConfig};
use super::{CreditFactor, ScoreComponent};

const BASE_SCORE: Decimal = dec!(500);
const INCOME_SCALE: Decimal = dec!(100000);
const INCOME_MULTIPLE_CAP: Decimal = dec!(2);
const AGE_WEIGHT: Decimal = dec!(0.5);
const STABILITY_BONUS: Decimal = dec!(50);
const TREND_STEP: Decimal = dec!(10000);
const TREND_CAP: Decimal = dec!(50);

pub(crate) const CREDIT_SCORE_FLOOR: u16 = 300;
pub(crate) const CREDIT_SCORE_CEILING: u16 = 900;

pub(crate) fn credit_components(
    input: &FinancialInput,
    config: &ScoringConfig,
    prior_debt: Option<Decimal>,
) -> Vec<ScoreComponent> {
    let mut components = Vec::with_capacity(8);

    components.push(ScoreComponent {
        factor: CreditFactor::Base,
        points: BASE_SCORE,
        notes: "baseline".to_string(),
    });

    let income_multiple = (input.income / INCOME_SCALE).min(INCOME_MULTIPLE_CAP);
    components.push(ScoreComponent {
        factor: CreditFactor::Income,
        points: income_multiple * dec!(100),
        notes: format!("monthly income {}", format_currency(input.income)),
    });

    let debt_ratio = input.debt / input.income_divisor();
    components.push(ScoreComponent {
        factor: CreditFactor::Debt,
        points: ((Decimal::ONE - debt_ratio) * dec!(150)).max(Decimal::ZERO),
        notes: format!("debt-to-income {:.2}", debt_ratio),
    });

    let utilization = input.credit_utilization / dec!(100);
    components.push(ScoreComponent {
        factor: CreditFactor::Utilization,
        points: ((Decimal::ONE - utilization) * dec!(150)).max(Decimal::ZERO),
        notes: format!("credit utilization {}%", input.credit_utilization.normalize()),
    });

    let missed = Decimal::from(input.missed_payments);
    components.push(ScoreComponent {
        factor: CreditFactor::PaymentHistory,
        points: ((Decimal::ONE - missed / dec!(12)) * dec!(100)).max(Decimal::ZERO),
        notes: format!("{} missed payment(s) in 12 months", input.missed_payments),
    });

    if config.model == ScoreModel::Extended {
        components.push(ScoreComponent {
            factor: CreditFactor::Age,
            points: Decimal::from(input.age) * AGE_WEIGHT,
            notes: format!("age {}", input.age),
        });

        let stable = input.job_stability == JobStability::Stable;
        components.push(ScoreComponent {
            factor: CreditFactor::JobStability,
            points: if stable { STABILITY_BONUS } else { Decimal::ZERO },
            notes: if stable {
                "stable employment".to_string()
            } else {
                "no stability bonus".to_string()
            },
        });
    }

    if config.debt_trend_adjustment {
        if let Some(component) =
            prior_debt.and_then(|prior| debt_trend_component(input.debt, prior))
        {
            components.push(component);
        }
    }

    components
}

fn debt_trend_component(current: Decimal, prior: Decimal) -> Option<ScoreComponent> {
    let change = current - prior;
    if change.is_zero() {
        return None;
    }

    let magnitude = (change.abs() / TREND_STEP).min(TREND_CAP);
    let (points, notes) = if change > Decimal::ZERO {
        (-magnitude, format!("debt up {}", format_currency(change)))
    } else {
        (magnitude, format!("debt down {}", format_currency(-change)))
    };

    Some(ScoreComponent {
        factor: CreditFactor::DebtTrend,
        points,
        notes,
    })
}

/// Sum the components, clamp to the credit-score range and truncate toward zero.
pub(crate) fn credit_score(components: &[ScoreComponent]) -> u16 {
    let total: Decimal = components.iter().map(|component| component.points).sum();
    total
        .clamp(
            Decimal::from(CREDIT_SCORE_FLOOR),
            Decimal::from(CREDIT_SCORE_CEILING),
        )
        .trunc()
        .to_u16()
        .unwrap_or(CREDIT_SCORE_FLOOR)
}

pub(crate) fn health_score(input: &FinancialInput) -> u8 {
    let debt_to_income = input.debt / input.income_divisor();
    let utilization = input.credit_utilization / dec!(100);
    let missed = Decimal::from(input.missed_payments);

    let score = dec!(100)
        - (debt_to_income * dec!(40)).min(dec!(40))
        - (utilization * dec!(30)).min(dec!(30))
        - (missed * dec!(5)).min(dec!(20));

    score
        .clamp(Decimal::ZERO, dec!(100))
        .trunc()
        .to_u8()
        .unwrap_or(0)
}
