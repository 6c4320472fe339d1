//! Boundary with the history collaborator.
//!
//! The engine only ever receives history as an immutable slice. Writing and storage layout
//! belong to implementations of [`HistoryStore`]; this module defines the contract and an
//! importer for the legacy CSV table layout.

mod import;

pub use import::{import_csv, records_for_subject, HistoryImportError};

use super::domain::{HistoryRecord, SubjectId};

/// Append-only storage of past submissions.
pub trait HistoryStore: Send + Sync {
    fn append(&self, record: HistoryRecord) -> Result<(), HistoryError>;

    /// Up to `limit` records for the subject, most recent first.
    fn recent(&self, subject: &SubjectId, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}
