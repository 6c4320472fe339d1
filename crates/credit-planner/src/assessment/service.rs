use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{FinancialInput, HistoryRecord, SubjectId};
use super::engine::AssessmentEngine;
use super::history::{HistoryError, HistoryStore};
use super::report::RecommendationReport;

/// Records consulted per submission: the current one plus its predecessor.
const TREND_WINDOW: usize = 2;

/// Upper bound on records returned by [`AssessmentService::history`].
pub const HISTORY_PAGE_LIMIT: usize = 50;

/// Service pairing the history store with the assessment engine.
pub struct AssessmentService<H> {
    history: Arc<H>,
    engine: Arc<AssessmentEngine>,
}

impl<H> AssessmentService<H>
where
    H: HistoryStore + 'static,
{
    pub fn new(history: Arc<H>, engine: AssessmentEngine) -> Self {
        Self {
            history,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &AssessmentEngine {
        &self.engine
    }

    /// Store the submission, then assess it against the subject's most recent history.
    pub fn submit(
        &self,
        subject: SubjectId,
        input: FinancialInput,
    ) -> Result<RecommendationReport, AssessmentServiceError> {
        let now = Utc::now();
        self.history.append(HistoryRecord {
            subject: subject.clone(),
            captured_at: now,
            snapshot: input.clone(),
        })?;

        let history = self.history.recent(&subject, TREND_WINDOW)?;
        let report = self.engine.assess(&input, &history, now);

        info!(
            subject = %subject,
            credit_score = report.score.credit_score,
            health_score = report.score.health_score,
            trend = report.trend.direction.label(),
            "assessment stored"
        );

        Ok(report)
    }

    /// Assess without touching the store. `prior` is most-recent-first and excludes the
    /// current submission.
    pub fn evaluate(
        &self,
        subject: SubjectId,
        input: FinancialInput,
        prior: Vec<HistoryRecord>,
    ) -> RecommendationReport {
        let now = Utc::now();
        let mut history = Vec::with_capacity(prior.len() + 1);
        history.push(HistoryRecord {
            subject: subject.clone(),
            captured_at: now,
            snapshot: input.clone(),
        });
        history.extend(prior);

        let report = self.engine.assess(&input, &history, now);

        info!(
            subject = %subject,
            credit_score = report.score.credit_score,
            health_score = report.score.health_score,
            trend = report.trend.direction.label(),
            prior_records = history.len() - 1,
            "assessment evaluated"
        );

        report
    }

    pub fn history(&self, subject: &SubjectId) -> Result<Vec<HistoryRecord>, AssessmentServiceError> {
        let records = self.history.recent(subject, HISTORY_PAGE_LIMIT)?;
        Ok(records)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    History(#[from] HistoryError),
}
