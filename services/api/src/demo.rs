use crate::assess::render;
use crate::cli::OutputFormat;
use crate::infra::{build_engine, InMemoryHistoryStore};
use clap::Args;
use credit_planner::assessment::{
    AssessmentService, FinancialGoal, FinancialInput, InvestmentType, JobStability,
    RecommendationReport, RiskAppetite, SubjectId,
};
use credit_planner::config::AppConfig;
use credit_planner::error::AppError;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Subject identifier used for the sample history
    #[arg(long, default_value = "demo-user")]
    pub(crate) subject: String,
    /// Format of the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config)?;
    let store = Arc::new(InMemoryHistoryStore::default());
    let service = AssessmentService::new(store, engine);
    let subject = SubjectId(args.subject);

    println!("Credit planner demo");
    println!(
        "Subject: {} | model: {:?} | debt trend adjustment: {}",
        subject, config.scoring.model, config.scoring.debt_trend_adjustment
    );

    let mut latest = None;
    for (month, input) in demo_submissions().into_iter().enumerate() {
        let report = service.submit(subject.clone(), input)?;
        print_checkpoint(month + 1, &report);
        latest = Some(report);
    }

    let history = service.history(&subject)?;
    println!("\nStored submissions: {}", history.len());

    if let Some(report) = latest {
        println!("\n{}", render(&report, args.format)?);
    }
    Ok(())
}

fn print_checkpoint(month: usize, report: &RecommendationReport) {
    println!(
        "\nMonth {month}: credit score {} ({}), health {}/100, priority {}",
        report.score.credit_score,
        report.score.credit_band.label(),
        report.score.health_score,
        report.profile.priority.title()
    );
    println!("  Trend: {}", report.trend.description);
    let passed: Vec<&str> = report
        .rules
        .iter()
        .filter(|(_, passed)| *passed)
        .map(|(rule, _)| rule.label())
        .collect();
    if passed.is_empty() {
        println!("  Rules passed: none");
    } else {
        println!("  Rules passed: {}", passed.join(", "));
    }
}

/// Three months of a salaried subject paying down a personal loan.
fn demo_submissions() -> Vec<FinancialInput> {
    let goals: BTreeSet<FinancialGoal> = [FinancialGoal::EmergencyFund, FinancialGoal::BuyHouse]
        .into_iter()
        .collect();
    let investments: BTreeSet<InvestmentType> = [InvestmentType::Fd].into_iter().collect();

    let base = FinancialInput {
        income: dec!(85000),
        expenses: dec!(42000),
        debt: dec!(320000),
        credit_utilization: dec!(62),
        missed_payments: 2,
        age: 29,
        dependents: 1,
        job_stability: JobStability::Stable,
        risk_appetite: RiskAppetite::High,
        financial_goals: goals,
        current_investments: investments,
    };

    [
        (dec!(320000), dec!(62), 2),
        (dec!(290000), dec!(48), 1),
        (dec!(255000), dec!(35), 0),
    ]
    .into_iter()
    .map(|(debt, credit_utilization, missed_payments)| FinancialInput {
        debt,
        credit_utilization,
        missed_payments,
        ..base.clone()
    })
    .collect()
}
