use credit_planner::assessment::{
    AssessmentEngine, HistoryError, HistoryRecord, HistoryStore, SubjectId,
};
use credit_planner::config::AppConfig;
use credit_planner::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local history keyed by subject, in append order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryHistoryStore {
    records: Arc<Mutex<HashMap<SubjectId, Vec<HistoryRecord>>>>,
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, record: HistoryRecord) -> Result<(), HistoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| HistoryError::Unavailable("history mutex poisoned".to_string()))?;
        guard.entry(record.subject.clone()).or_default().push(record);
        Ok(())
    }

    fn recent(&self, subject: &SubjectId, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| HistoryError::Unavailable("history mutex poisoned".to_string()))?;
        Ok(guard
            .get(subject)
            .map(|records| records.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

/// Engine wired with the configured scoring switches and reference table.
pub(crate) fn build_engine(config: &AppConfig) -> Result<AssessmentEngine, AppError> {
    let market = config.reference_data()?;
    Ok(AssessmentEngine::new(config.scoring, market))
}
