use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{FinancialInput, SubjectId};
use super::history::{import_csv, records_for_subject, HistoryStore};
use super::service::AssessmentService;

/// Subject attached to stateless evaluations that do not name one.
const ANONYMOUS_SUBJECT: &str = "anonymous";

/// Body for a one-off evaluation. `history_csv` uses the legacy history export layout.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub input: FinancialInput,
    #[serde(default)]
    pub history_csv: Option<String>,
}

/// Router builder exposing the assessment endpoints.
pub fn assessment_router<H>(service: Arc<AssessmentService<H>>) -> Router
where
    H: HistoryStore + 'static,
{
    Router::new()
        .route("/api/v1/assessments/evaluate", post(evaluate_handler::<H>))
        .route(
            "/api/v1/subjects/:subject/assessments",
            post(submit_handler::<H>),
        )
        .route(
            "/api/v1/subjects/:subject/history",
            get(history_handler::<H>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<H>(
    State(service): State<Arc<AssessmentService<H>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    H: HistoryStore + 'static,
{
    let EvaluateRequest {
        subject,
        input,
        history_csv,
    } = request;

    let prior = match history_csv.as_deref() {
        Some(csv) => match import_csv(csv.as_bytes()) {
            Ok(records) => match subject.as_deref() {
                Some(name) => records_for_subject(&records, &SubjectId(name.to_string())),
                None => records,
            },
            Err(error) => {
                let payload = json!({
                    "error": error.to_string(),
                });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
        None => Vec::new(),
    };

    let subject = SubjectId(subject.unwrap_or_else(|| ANONYMOUS_SUBJECT.to_string()));
    let report = service.evaluate(subject, input, prior);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn submit_handler<H>(
    State(service): State<Arc<AssessmentService<H>>>,
    Path(subject): Path<String>,
    axum::Json(input): axum::Json<FinancialInput>,
) -> Response
where
    H: HistoryStore + 'static,
{
    match service.submit(SubjectId(subject), input) {
        Ok(report) => (StatusCode::CREATED, axum::Json(report)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn history_handler<H>(
    State(service): State<Arc<AssessmentService<H>>>,
    Path(subject): Path<String>,
) -> Response
where
    H: HistoryStore + 'static,
{
    let subject = SubjectId(subject);
    match service.history(&subject) {
        Ok(records) => {
            let payload = json!({
                "subject": subject.0,
                "records": records,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
