use chrono::{TimeZone, Utc};
use credit_planner::assessment::market::RateBand;
use credit_planner::assessment::{
    AssessmentEngine, CreditRule, FinancialInput, InvestmentPlan, ReferenceData, RiskTier,
    ScoringConfig, TrendDirection,
};
use rust_decimal_macros::dec;

fn generated_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn fixture_market() -> ReferenceData {
    let mut market = ReferenceData::default();
    market.as_of = "March 2026".to_string();
    market.personal_loan_rates.clear();
    market.personal_loan_rates.insert(
        "Cooperative Bank".to_string(),
        RateBand {
            min: dec!(8.25),
            max: dec!(14),
        },
    );
    market.fd_rates.clear();
    market
        .fd_rates
        .insert("Cooperative Bank".to_string(), dec!(8.1));
    market
}

#[test]
fn reference_table_is_injected_not_global() {
    let engine = AssessmentEngine::new(ScoringConfig::default(), fixture_market());
    let input = FinancialInput {
        income: dec!(120000),
        expenses: dec!(40000),
        debt: dec!(200000),
        credit_utilization: dec!(20),
        ..FinancialInput::default()
    };

    let report = engine.assess(&input, &[], generated_at());

    let offer = report
        .repayment
        .refinancing
        .as_ref()
        .expect("refinancing offer present");
    assert_eq!(offer.lender, "Cooperative Bank");
    assert_eq!(offer.rate_pct, dec!(8.25));

    let allocation = report.investment.allocation().expect("allocation present");
    let deposit = allocation
        .best_fixed_deposit
        .as_ref()
        .expect("deposit offer present");
    assert_eq!(deposit.rate_pct, dec!(8.1));
    assert!(report.narrative.contains("March 2026"));
}

#[test]
fn report_serializes_as_plain_structured_data() {
    let engine = AssessmentEngine::default();
    let input = FinancialInput {
        income: dec!(30000),
        expenses: dec!(10000),
        debt: dec!(5000),
        ..FinancialInput::default()
    };

    let report = engine.assess(&input, &[], generated_at());
    let value = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(value["rules"]["Credit score above 700"], true);
    assert_eq!(value["rules"]["Has stable income"], true);
    assert_eq!(value["rules"]["Low expenses ratio"], true);
    assert_eq!(value["rules"]["Low debt"], true);
    assert_eq!(value["profile"]["priority"], "wealth_building");
    assert_eq!(value["repayment"]["strategy"], "debt_snowball");
    assert!(value["generated_at"].as_str().is_some());
    assert!(report.rules.passed(CreditRule::LowDebt));
}

#[test]
fn low_appetite_subject_is_steered_to_debt_funds() {
    let engine = AssessmentEngine::default();
    let input: FinancialInput = serde_json::from_str(
        r#"{"income": 90000, "expenses": 40000, "risk_appetite": "low", "age": 41}"#,
    )
    .expect("input parses");

    let report = engine.assess(&input, &[], generated_at());

    assert_eq!(report.profile.risk_category, RiskTier::Conservative);
    match &report.investment {
        InvestmentPlan::Allocated(plan) => {
            assert_eq!(plan.fixed_deposit_share, dec!(0.4));
            assert_eq!(plan.recommended_funds.len(), 2);
            assert!(plan
                .recommended_funds
                .iter()
                .all(|fund| fund.name.contains("Fund")));
        }
        other => panic!("expected allocation, got {other:?}"),
    }
    assert_eq!(report.trend.direction, TrendDirection::NoData);
}

#[test]
fn young_high_appetite_earner_is_aggressive() {
    let engine = AssessmentEngine::default();
    let input: FinancialInput = serde_json::from_str(
        r#"{"income": 150000, "expenses": 60000, "risk_appetite": "high", "age": 27}"#,
    )
    .expect("input parses");

    let report = engine.assess(&input, &[], generated_at());

    assert_eq!(report.profile.risk_category, RiskTier::Aggressive);
    let plan = report.investment.allocation().expect("allocation present");
    assert_eq!(plan.fixed_deposit_share, dec!(0.1));
    assert_eq!(
        plan.recommended_funds[0].name,
        "Parag Parikh Flexi Cap Fund"
    );
}
