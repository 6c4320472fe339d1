use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::super::domain::{FinancialInput, HistoryRecord, SubjectId};

#[derive(Debug, thiserror::Error)]
pub enum HistoryImportError {
    #[error("failed to read history export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid history CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: column `{column}` has non-numeric value `{value}`")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: unrecognized timestamp `{value}`")]
    InvalidTimestamp { line: u64, value: String },
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    user_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    income: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    expenses: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    loan_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    credit_util: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    missed_payments: Option<String>,
    timestamp: String,
}

/// Read a history export, returning records ordered most recent first.
///
/// Expected headers: `user_id,income,expenses,loan_amount,credit_util,missed_payments,timestamp`.
/// Extra columns are ignored and blank numeric cells take the input defaults.
pub fn import_csv<R: Read>(reader: R) -> Result<Vec<HistoryRecord>, HistoryImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map(|position| position.line()).unwrap_or(0);
        let parsed: HistoryRow = row.deserialize(Some(&headers))?;
        records.push(parsed.into_record(line)?);
    }

    records.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
    Ok(records)
}

/// Filter imported records down to one subject, preserving most-recent-first order.
pub fn records_for_subject(records: &[HistoryRecord], subject: &SubjectId) -> Vec<HistoryRecord> {
    records
        .iter()
        .filter(|record| &record.subject == subject)
        .cloned()
        .collect()
}

impl HistoryRow {
    fn into_record(self, line: u64) -> Result<HistoryRecord, HistoryImportError> {
        let missed_payments = parse_amount(line, "missed_payments", self.missed_payments)?
            .max(Decimal::ZERO)
            .trunc()
            .to_u32()
            .unwrap_or(u32::MAX);

        let snapshot = FinancialInput {
            income: parse_amount(line, "income", self.income)?,
            expenses: parse_amount(line, "expenses", self.expenses)?,
            debt: parse_amount(line, "loan_amount", self.loan_amount)?,
            credit_utilization: parse_amount(line, "credit_util", self.credit_util)?,
            missed_payments,
            ..FinancialInput::default()
        };

        let captured_at =
            parse_timestamp(&self.timestamp).ok_or(HistoryImportError::InvalidTimestamp {
                line,
                value: self.timestamp.clone(),
            })?;

        Ok(HistoryRecord {
            subject: SubjectId(self.user_id),
            captured_at,
            snapshot,
        })
    }
}

fn parse_amount(
    line: u64,
    column: &'static str,
    raw: Option<String>,
) -> Result<Decimal, HistoryImportError> {
    match raw {
        None => Ok(Decimal::ZERO),
        Some(value) => Decimal::from_str(&value)
            .or_else(|_| Decimal::from_scientific(&value))
            .map_err(|_| HistoryImportError::InvalidNumber {
                line,
                column,
                value,
            }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts RFC 3339, naive ISO date-times (taken as UTC) and bare dates.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EXPORT: &str = "\
id,user_id,income,expenses,loan_amount,credit_util,missed_payments,timestamp
1,alice,50000,30000,40000,35,0,2025-08-01T09:15:00.123456
2,bob,20000,15000,5000,,1,2025-08-02
3,alice,52000,30000,50000,42.5,1,2025-08-14T10:00:00Z
";

    #[test]
    fn imports_legacy_rows_most_recent_first() {
        let records = import_csv(EXPORT.as_bytes()).expect("export imports");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].subject.as_str(), "alice");
        assert_eq!(records[0].snapshot.debt, dec!(50000));
        assert_eq!(records[0].snapshot.credit_utilization, dec!(42.5));
        assert_eq!(records[1].subject.as_str(), "bob");
        assert_eq!(records[1].snapshot.credit_utilization, Decimal::ZERO);
        assert_eq!(records[2].snapshot.debt, dec!(40000));
    }

    #[test]
    fn filters_by_subject() {
        let records = import_csv(EXPORT.as_bytes()).expect("export imports");

        let alice = records_for_subject(&records, &SubjectId("alice".to_string()));

        assert_eq!(alice.len(), 2);
        assert!(alice[0].captured_at > alice[1].captured_at);
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let csv = "user_id,income,expenses,loan_amount,credit_util,missed_payments,timestamp\n\
alice,lots,0,0,0,0,2025-08-01\n";

        match import_csv(csv.as_bytes()) {
            Err(HistoryImportError::InvalidNumber { line, column, value }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "income");
                assert_eq!(value, "lots");
            }
            other => panic!("expected invalid number, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_timestamps() {
        let csv = "user_id,income,expenses,loan_amount,credit_util,missed_payments,timestamp\n\
alice,1,0,0,0,0,last tuesday\n";

        assert!(matches!(
            import_csv(csv.as_bytes()),
            Err(HistoryImportError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn parses_supported_timestamp_shapes() {
        assert!(parse_timestamp("2025-08-14T10:00:00+05:30").is_some());
        assert!(parse_timestamp("2025-08-14T10:00:00").is_some());
        assert!(parse_timestamp("2025-08-14 10:00:00").is_some());
        assert!(parse_timestamp("2025-08-14").is_some());
        assert!(parse_timestamp("  ").is_none());
    }
}
