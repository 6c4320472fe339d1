use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::assessment::domain::{FinancialInput, HistoryRecord, SubjectId};
use crate::assessment::history::{HistoryError, HistoryStore};
use crate::assessment::{assessment_router, AssessmentEngine, AssessmentService};

pub(super) fn subject() -> SubjectId {
    SubjectId("subject-42".to_string())
}

pub(super) fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 14, 10, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Salaried subject with no debt and moderate card usage.
pub(super) fn baseline_input() -> FinancialInput {
    FinancialInput {
        income: dec!(50000),
        expenses: dec!(30000),
        debt: Decimal::ZERO,
        credit_utilization: dec!(30),
        missed_payments: 0,
        ..FinancialInput::default()
    }
}

pub(super) fn indebted_input(debt: Decimal) -> FinancialInput {
    FinancialInput {
        income: dec!(50000),
        expenses: dec!(20000),
        debt,
        credit_utilization: dec!(40),
        missed_payments: 1,
        ..FinancialInput::default()
    }
}

pub(super) fn record(day: u32, snapshot: FinancialInput) -> HistoryRecord {
    HistoryRecord {
        subject: subject(),
        captured_at: Utc
            .with_ymd_and_hms(2025, 8, day, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
        snapshot,
    }
}

/// Most-recent-first history whose head is the current submission.
pub(super) fn history_with_prior(current: &FinancialInput, prior_debt: Decimal) -> Vec<HistoryRecord> {
    vec![
        record(14, current.clone()),
        record(1, indebted_input(prior_debt)),
    ]
}

pub(super) fn engine() -> AssessmentEngine {
    AssessmentEngine::default()
}

pub(super) fn build_service() -> (AssessmentService<MemoryHistoryStore>, Arc<MemoryHistoryStore>) {
    let store = Arc::new(MemoryHistoryStore::default());
    let service = AssessmentService::new(store.clone(), engine());
    (service, store)
}

pub(super) fn assessment_router_with_service(
    service: AssessmentService<MemoryHistoryStore>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryHistoryStore {
    records: Arc<Mutex<HashMap<SubjectId, Vec<HistoryRecord>>>>,
}

impl MemoryHistoryStore {
    pub(super) fn count(&self, subject: &SubjectId) -> usize {
        self.records
            .lock()
            .expect("history mutex poisoned")
            .get(subject)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&self, record: HistoryRecord) -> Result<(), HistoryError> {
        self.records
            .lock()
            .expect("history mutex poisoned")
            .entry(record.subject.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    fn recent(&self, subject: &SubjectId, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard
            .get(subject)
            .map(|records| records.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

pub(super) struct UnavailableHistoryStore;

impl HistoryStore for UnavailableHistoryStore {
    fn append(&self, _record: HistoryRecord) -> Result<(), HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _subject: &SubjectId, _limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
