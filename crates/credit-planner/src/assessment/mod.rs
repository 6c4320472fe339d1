//! Financial-health scoring and recommendation engine.
//!
//! A submission flows through the profile analyzer, score calculator, rule evaluator,
//! trend analyzer and strategy generator before the report composer assembles one
//! [`RecommendationReport`]. The engine is pure: history arrives as an immutable
//! most-recent-first slice and the caller supplies the timestamp. Storage and HTTP live
//! in the `history`, `service` and `router` boundary modules.

pub mod domain;
pub mod engine;
pub mod history;
pub mod market;
pub(crate) mod money;
pub mod profile;
pub mod report;
pub mod router;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod strategy;
pub mod trend;

#[cfg(test)]
mod tests;

pub use domain::{
    FinancialGoal, FinancialInput, HistoryRecord, InvestmentType, JobStability, RiskAppetite,
    SubjectId, DEFAULT_AGE, MAX_AMOUNT,
};
pub use engine::AssessmentEngine;
pub use history::{
    import_csv, records_for_subject, HistoryError, HistoryImportError, HistoryStore,
};
pub use market::{Fund, FundCategory, LenderRate, ReferenceData};
pub use profile::{analyze_profile, Priority, Profile, RiskTier};
pub use report::{compose_report, RecommendationReport, ReportParts};
pub use router::{assessment_router, EvaluateRequest};
pub use rules::{evaluate_rules, CreditRule, RuleReport};
pub use scoring::{
    risk_profile, CreditBand, CreditFactor, RiskFactors, ScoreCalculator, ScoreComponent,
    ScoreModel, ScoreResult, ScoringConfig,
};
pub use service::{AssessmentService, AssessmentServiceError, HISTORY_PAGE_LIMIT};
pub use strategy::{
    AllocationPlan, InvestmentPlan, ProjectedReturns, RefinancingOffer, RepaymentOption,
    RepaymentPlan, RepaymentStrategy, StrategyGenerator,
};
pub use trend::{analyze_trend, debt_series, DebtPoint, TrendDirection, TrendResult};
