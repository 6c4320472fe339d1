mod actions;
mod narrative;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::FinancialInput;
use super::profile::Profile;
use super::rules::RuleReport;
use super::scoring::ScoreResult;
use super::strategy::{InvestmentPlan, RepaymentPlan};
use super::trend::{DebtPoint, TrendResult};

/// Computed pieces handed to the composer.
#[derive(Debug, Clone)]
pub struct ReportParts {
    pub input: FinancialInput,
    pub market_as_of: String,
    pub profile: Profile,
    pub score: ScoreResult,
    pub trend: TrendResult,
    pub rules: RuleReport,
    pub repayment: RepaymentPlan,
    pub investment: InvestmentPlan,
    pub debt_history: Vec<DebtPoint>,
}

/// Complete assessment handed to reporting collaborators as plain structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// The only time-dependent field; everything else is a function of the inputs.
    pub generated_at: DateTime<Utc>,
    pub input: FinancialInput,
    pub market_as_of: String,
    pub profile: Profile,
    pub score: ScoreResult,
    pub trend: TrendResult,
    pub rules: RuleReport,
    pub repayment: RepaymentPlan,
    pub investment: InvestmentPlan,
    pub actions: Vec<String>,
    pub debt_history: Vec<DebtPoint>,
    pub narrative: String,
}

pub fn compose_report(parts: ReportParts, generated_at: DateTime<Utc>) -> RecommendationReport {
    let ReportParts {
        input,
        market_as_of,
        profile,
        score,
        trend,
        rules,
        repayment,
        investment,
        debt_history,
    } = parts;

    let actions = actions::action_plan(&profile, &repayment, &investment);

    let mut report = RecommendationReport {
        generated_at,
        input,
        market_as_of,
        profile,
        score,
        trend,
        rules,
        repayment,
        investment,
        actions,
        debt_history,
        narrative: String::new(),
    };
    report.narrative = narrative::render(&report);
    report
}
