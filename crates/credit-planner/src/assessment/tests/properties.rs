use super::common::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assessment::scoring::{ScoreCalculator, ScoreModel, ScoreResult, ScoringConfig};
use crate::assessment::FinancialInput;

const INCOMES: [Decimal; 8] = [
    dec!(0),
    dec!(1),
    dec!(9999),
    dec!(50000),
    dec!(100000),
    dec!(200000),
    dec!(10000000),
    dec!(10000000000000000000000000000),
];
const DEBTS: [Decimal; 7] = [
    dec!(0),
    dec!(500),
    dec!(25000),
    dec!(50000),
    dec!(400000),
    dec!(50000000),
    dec!(1000000000000000000000000000),
];
const UTILIZATIONS: [Decimal; 6] = [dec!(0), dec!(10), dec!(30), dec!(50), dec!(70.5), dec!(100)];

fn calculators() -> Vec<ScoreCalculator> {
    [ScoreModel::Standard, ScoreModel::Extended]
        .into_iter()
        .map(|model| {
            ScoreCalculator::new(ScoringConfig {
                model,
                debt_trend_adjustment: false,
            })
        })
        .collect()
}

fn input(income: Decimal, debt: Decimal, utilization: Decimal, missed: u32) -> FinancialInput {
    FinancialInput {
        income,
        expenses: dec!(10000),
        debt,
        credit_utilization: utilization,
        missed_payments: missed,
        ..FinancialInput::default()
    }
}

fn score(calculator: &ScoreCalculator, input: &FinancialInput) -> ScoreResult {
    calculator.score(&input.sanitized(), &[])
}

#[test]
fn scores_stay_within_bounds_for_extreme_inputs() {
    for calculator in calculators() {
        for income in INCOMES {
            for debt in DEBTS {
                for utilization in UTILIZATIONS {
                    for missed in [0, 1, 3, 12] {
                        let result = score(&calculator, &input(income, debt, utilization, missed));
                        assert!(
                            (300..=900).contains(&result.credit_score),
                            "credit score {} out of range",
                            result.credit_score
                        );
                        assert!(result.health_score <= 100);
                    }
                }
            }
        }
    }
}

#[test]
fn credit_score_never_falls_as_income_rises() {
    for calculator in calculators() {
        for debt in DEBTS {
            for utilization in UTILIZATIONS {
                let scores: Vec<u16> = INCOMES
                    .iter()
                    .map(|income| score(&calculator, &input(*income, debt, utilization, 1)).credit_score)
                    .collect();
                assert!(
                    scores.windows(2).all(|pair| pair[0] <= pair[1]),
                    "income sweep not monotonic: {scores:?}"
                );
            }
        }
    }
}

#[test]
fn credit_score_never_rises_with_debt_utilization_or_missed_payments() {
    let calculator = ScoreCalculator::default();
    for income in INCOMES {
        let by_debt: Vec<u16> = DEBTS
            .iter()
            .map(|debt| score(&calculator, &input(income, *debt, dec!(30), 0)).credit_score)
            .collect();
        assert!(by_debt.windows(2).all(|pair| pair[0] >= pair[1]), "{by_debt:?}");

        let by_utilization: Vec<u16> = UTILIZATIONS
            .iter()
            .map(|util| score(&calculator, &input(income, dec!(5000), *util, 0)).credit_score)
            .collect();
        assert!(
            by_utilization.windows(2).all(|pair| pair[0] >= pair[1]),
            "{by_utilization:?}"
        );

        let by_missed: Vec<u16> = (0..=12)
            .map(|missed| score(&calculator, &input(income, dec!(5000), dec!(30), missed)).credit_score)
            .collect();
        assert!(by_missed.windows(2).all(|pair| pair[0] >= pair[1]), "{by_missed:?}");
    }
}

#[test]
fn health_score_never_rises_with_debt_ratio_utilization_or_missed_payments() {
    let calculator = ScoreCalculator::default();
    let income = dec!(50000);

    let by_debt: Vec<u8> = DEBTS
        .iter()
        .map(|debt| score(&calculator, &input(income, *debt, dec!(30), 0)).health_score)
        .collect();
    assert!(by_debt.windows(2).all(|pair| pair[0] >= pair[1]), "{by_debt:?}");

    let by_utilization: Vec<u8> = UTILIZATIONS
        .iter()
        .map(|util| score(&calculator, &input(income, dec!(5000), *util, 0)).health_score)
        .collect();
    assert!(
        by_utilization.windows(2).all(|pair| pair[0] >= pair[1]),
        "{by_utilization:?}"
    );

    let by_missed: Vec<u8> = (0..=12)
        .map(|missed| score(&calculator, &input(income, dec!(5000), dec!(30), missed)).health_score)
        .collect();
    assert!(by_missed.windows(2).all(|pair| pair[0] >= pair[1]), "{by_missed:?}");
}

#[test]
fn zero_income_divides_debt_by_one() {
    let result = score(
        &ScoreCalculator::default(),
        &input(Decimal::ZERO, dec!(1234), dec!(30), 0),
    );

    assert_eq!(result.debt_to_income, dec!(1234));
    assert!(result.risk_factors.high_debt_ratio);
}

#[test]
fn every_report_keeps_currency_outputs_non_negative() {
    let engine = engine();
    for income in INCOMES {
        for debt in DEBTS {
            let report = engine.assess(&input(income, debt, dec!(60), 2), &[], generated_at());

            assert!(report.profile.investment_capacity >= Decimal::ZERO);
            assert!(report.profile.emergency_fund_target >= Decimal::ZERO);
            for option in &report.repayment.options {
                assert!(option.monthly_payment >= Decimal::ZERO);
                assert!(option.total_interest >= Decimal::ZERO);
            }
            if let Some(offer) = &report.repayment.refinancing {
                assert!(offer.savings_opportunity >= Decimal::ZERO);
            }
            if let Some(allocation) = report.investment.allocation() {
                assert!(allocation.equity_amount >= Decimal::ZERO);
                assert!(allocation.fixed_deposit_amount >= Decimal::ZERO);
            }
        }
    }
}

#[test]
fn oversized_wire_amounts_are_assessed_within_bounds() {
    let engine = crate::assessment::AssessmentEngine::new(
        ScoringConfig {
            model: ScoreModel::Extended,
            debt_trend_adjustment: true,
        },
        crate::assessment::ReferenceData::default(),
    );
    let payloads = [
        r#"{"income": 0, "loan_amount": 1e27}"#,
        r#"{"income": 1e28, "expenses": 0}"#,
        r#"{"income": 1e28, "expenses": 1e28, "debt": 1e28, "missed_payments": -3, "age": 300}"#,
    ];

    for payload in payloads {
        let current: FinancialInput = serde_json::from_str(payload).expect("payload parses");
        let history = history_with_prior(&current, dec!(0));

        let report = engine.assess(&current, &history, generated_at());

        assert!((300..=900).contains(&report.score.credit_score), "{payload}");
        assert!(report.score.health_score <= 100, "{payload}");
        assert!(report.profile.investment_capacity <= crate::assessment::MAX_AMOUNT);
    }
}
