use crate::cli::OutputFormat;
use crate::infra::{build_engine, InMemoryHistoryStore};
use clap::Args;
use credit_planner::assessment::{
    import_csv, records_for_subject, AssessmentService, FinancialInput, HistoryRecord,
    RecommendationReport, SubjectId,
};
use credit_planner::config::AppConfig;
use credit_planner::error::AppError;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CLI_SUBJECT: &str = "cli";

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding one financial submission
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Optional CSV history export (user_id,income,expenses,loan_amount,credit_util,missed_payments,timestamp)
    #[arg(long)]
    pub(crate) history_csv: Option<PathBuf>,
    /// Restrict the history export to this subject
    #[arg(long)]
    pub(crate) subject: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config)?;
    let service = AssessmentService::new(Arc::new(InMemoryHistoryStore::default()), engine);

    let input = read_input(&args.input)?;
    let prior = match &args.history_csv {
        Some(path) => read_history(path, args.subject.as_deref())?,
        None => Vec::new(),
    };

    let subject = SubjectId(args.subject.unwrap_or_else(|| CLI_SUBJECT.to_string()));
    let report = service.evaluate(subject, input, prior);
    println!("{}", render(&report, args.format)?);
    Ok(())
}

pub(crate) fn read_input(path: &Path) -> Result<FinancialInput, AppError> {
    let file = File::open(path)?;
    let input = serde_json::from_reader(BufReader::new(file))?;
    Ok(input)
}

fn read_history(path: &Path, subject: Option<&str>) -> Result<Vec<HistoryRecord>, AppError> {
    let file = File::open(path)?;
    let records = import_csv(BufReader::new(file))?;
    Ok(match subject {
        Some(name) => records_for_subject(&records, &SubjectId(name.to_string())),
        None => records,
    })
}

pub(crate) fn render(report: &RecommendationReport, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(report.narrative.clone()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        let mut file = File::create(&path).expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        path
    }

    #[test]
    fn reads_partial_submissions_with_legacy_names() {
        let path = temp_file(
            "submission.json",
            r#"{"income": 50000, "expenses": 30000, "loan_amount": 0, "credit_util": 30}"#,
        );

        let input = read_input(&path).expect("input parses");
        std::fs::remove_file(&path).ok();

        assert_eq!(input.credit_utilization, rust_decimal_macros::dec!(30));
        assert_eq!(input.age, 30);
    }

    #[test]
    fn malformed_submission_is_an_input_error() {
        let path = temp_file("broken.json", "{ income: ");

        let result = read_input(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AppError::Input(_))));
    }

    #[test]
    fn history_is_filtered_to_the_requested_subject() {
        let path = temp_file(
            "history.csv",
            "user_id,income,expenses,loan_amount,credit_util,missed_payments,timestamp\n\
a,50000,20000,40000,40,1,2025-08-01\n\
b,50000,20000,90000,40,1,2025-08-02\n",
        );

        let records = read_history(&path, Some("a")).expect("history loads");
        let all = read_history(&path, None).expect("history loads");
        std::fs::remove_file(&path).ok();

        assert_eq!(records.len(), 1);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn renders_text_and_json() {
        let engine = credit_planner::assessment::AssessmentEngine::default();
        let service = AssessmentService::new(Arc::new(InMemoryHistoryStore::default()), engine);
        let report = service.evaluate(
            SubjectId(CLI_SUBJECT.to_string()),
            FinancialInput::default(),
            Vec::new(),
        );

        let text = render(&report, OutputFormat::Text).expect("text renders");
        assert!(text.starts_with("Financial Plan"));

        let json = render(&report, OutputFormat::Json).expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert!(value.get("score").is_some());
    }
}
