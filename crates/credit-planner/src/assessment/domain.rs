use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};

/// Age assumed when a submission does not carry one.
pub const DEFAULT_AGE: u8 = 30;

const MAX_MISSED_PAYMENTS: u32 = 12;

/// Ceiling applied to every monthly currency amount. Keeps derived ratios and projections
/// inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Identifier for the person whose submissions are tracked over time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How dependable the subject's primary income source is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStability {
    #[default]
    Stable,
    Uncertain,
    NewJob,
    SelfEmployed,
}

/// Self-declared tolerance for investment volatility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAppetite {
    Low,
    #[default]
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialGoal {
    EmergencyFund,
    DebtFree,
    BuyHouse,
    BuyCar,
    ChildEducation,
    RetirementPlanning,
    Travel,
    StartBusiness,
    Wedding,
}

impl FinancialGoal {
    pub const fn label(self) -> &'static str {
        match self {
            FinancialGoal::EmergencyFund => "emergency fund",
            FinancialGoal::DebtFree => "becoming debt free",
            FinancialGoal::BuyHouse => "buying a house",
            FinancialGoal::BuyCar => "buying a car",
            FinancialGoal::ChildEducation => "child education",
            FinancialGoal::RetirementPlanning => "retirement planning",
            FinancialGoal::Travel => "travel",
            FinancialGoal::StartBusiness => "starting a business",
            FinancialGoal::Wedding => "wedding",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    None,
    Fd,
    MutualFunds,
    Stocks,
    Ppf,
    Nps,
    Gold,
    RealEstate,
}

impl InvestmentType {
    pub const fn label(self) -> &'static str {
        match self {
            InvestmentType::None => "none",
            InvestmentType::Fd => "fixed deposits",
            InvestmentType::MutualFunds => "mutual funds",
            InvestmentType::Stocks => "stocks",
            InvestmentType::Ppf => "PPF",
            InvestmentType::Nps => "NPS",
            InvestmentType::Gold => "gold",
            InvestmentType::RealEstate => "real estate",
        }
    }
}

/// One self-reported submission. Monthly currency amounts, utilization in percent.
///
/// Every field is optional on the wire; absent fields take the documented defaults so
/// collaborators can send partial forms without the engine failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialInput {
    pub income: Decimal,
    pub expenses: Decimal,
    #[serde(alias = "loan_amount", alias = "existing_debt")]
    pub debt: Decimal,
    #[serde(alias = "credit_util")]
    pub credit_utilization: Decimal,
    #[serde(deserialize_with = "lenient_missed_payments")]
    pub missed_payments: u32,
    #[serde(deserialize_with = "lenient_age")]
    pub age: u8,
    pub dependents: u8,
    pub job_stability: JobStability,
    pub risk_appetite: RiskAppetite,
    pub financial_goals: BTreeSet<FinancialGoal>,
    pub current_investments: BTreeSet<InvestmentType>,
}

impl Default for FinancialInput {
    fn default() -> Self {
        Self {
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            debt: Decimal::ZERO,
            credit_utilization: Decimal::ZERO,
            missed_payments: 0,
            age: DEFAULT_AGE,
            dependents: 0,
            job_stability: JobStability::default(),
            risk_appetite: RiskAppetite::default(),
            financial_goals: BTreeSet::new(),
            current_investments: BTreeSet::new(),
        }
    }
}

impl FinancialInput {
    /// Clamp out-of-domain values instead of rejecting them.
    ///
    /// Amounts are held to `0..=MAX_AMOUNT`, utilization is held to `0..=100`, missed payments are
    /// capped at twelve and an age of zero (an unset form field) falls back to the default.
    pub fn sanitized(&self) -> Self {
        let mut input = self.clone();
        input.income = input.income.clamp(Decimal::ZERO, MAX_AMOUNT);
        input.expenses = input.expenses.clamp(Decimal::ZERO, MAX_AMOUNT);
        input.debt = input.debt.clamp(Decimal::ZERO, MAX_AMOUNT);
        input.credit_utilization = input.credit_utilization.clamp(Decimal::ZERO, dec!(100));
        input.missed_payments = input.missed_payments.min(MAX_MISSED_PAYMENTS);
        if input.age == 0 {
            input.age = DEFAULT_AGE;
        }
        input
    }

    /// Income used as a divisor; zero income counts as one.
    pub fn income_divisor(&self) -> Decimal {
        self.income.max(Decimal::ONE)
    }
}

/// Counts arrive from hand-filled forms as negatives, floats or oversized integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientCount {
    Whole(i64),
    Fractional(f64),
}

impl LenientCount {
    fn truncated(self) -> i64 {
        match self {
            LenientCount::Whole(value) => value,
            // `as` saturates at the i64 bounds
            LenientCount::Fractional(value) => value.trunc() as i64,
        }
    }
}

fn lenient_missed_payments<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = Option::<LenientCount>::deserialize(deserializer)?;
    Ok(count.map_or(0, |count| {
        let capped = count.truncated().clamp(0, i64::from(MAX_MISSED_PAYMENTS));
        u32::try_from(capped).unwrap_or(MAX_MISSED_PAYMENTS)
    }))
}

fn lenient_age<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let age = Option::<LenientCount>::deserialize(deserializer)?;
    Ok(age
        .and_then(|age| u8::try_from(age.truncated()).ok())
        .filter(|age| *age > 0)
        .unwrap_or(DEFAULT_AGE))
}

/// Timestamped snapshot held by the history collaborator. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub subject: SubjectId,
    pub captured_at: DateTime<Utc>,
    pub snapshot: FinancialInput,
}
