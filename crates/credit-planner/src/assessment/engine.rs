use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::{FinancialInput, HistoryRecord};
use super::market::ReferenceData;
use super::profile::analyze_profile;
use super::report::{compose_report, RecommendationReport, ReportParts};
use super::rules::evaluate_rules;
use super::scoring::{ScoreCalculator, ScoringConfig};
use super::strategy::StrategyGenerator;
use super::trend::{analyze_trend, debt_series};

/// Pure scoring and recommendation pipeline.
///
/// Holds only immutable configuration, so one engine can serve any number of concurrent
/// evaluations. `history` is a most-recent-first snapshot that includes the current
/// submission at index 0; it is never modified.
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    scores: ScoreCalculator,
    strategies: StrategyGenerator,
}

impl AssessmentEngine {
    pub fn new(config: ScoringConfig, market: ReferenceData) -> Self {
        Self {
            scores: ScoreCalculator::new(config),
            strategies: StrategyGenerator::new(market),
        }
    }

    pub fn scoring_config(&self) -> &ScoringConfig {
        self.scores.config()
    }

    pub fn market(&self) -> &ReferenceData {
        self.strategies.market()
    }

    pub fn assess(
        &self,
        input: &FinancialInput,
        history: &[HistoryRecord],
        generated_at: DateTime<Utc>,
    ) -> RecommendationReport {
        let input = input.sanitized();

        let profile = analyze_profile(&input);
        let score = self.scores.score(&input, history);
        let trend = analyze_trend(&input, history);
        let rules = evaluate_rules(&input, score.credit_score);
        let repayment = self.strategies.repayment_plan(&input);
        let investment = self.strategies.investment_plan(&profile);

        debug!(
            credit_score = score.credit_score,
            health_score = score.health_score,
            risk_profile = score.risk_profile.label(),
            priority = profile.priority.key(),
            trend = trend.direction.label(),
            "assessment computed"
        );

        compose_report(
            ReportParts {
                market_as_of: self.market().as_of.clone(),
                debt_history: debt_series(history),
                input,
                profile,
                score,
                trend,
                rules,
                repayment,
                investment,
            },
            generated_at,
        )
    }
}
