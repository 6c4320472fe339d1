use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::super::domain::FinancialInput;
use super::super::market::{LenderRate, ReferenceData};

/// Utilization above which debt is treated as revolving credit-card balance.
const REVOLVING_UTILIZATION_THRESHOLD: Decimal = dec!(50);
const REFINANCE_HORIZON_YEARS: Decimal = dec!(3);
pub(crate) const REPAYMENT_TERMS_MONTHS: [u32; 2] = [36, 60];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentStrategy {
    NoDebt,
    DebtAvalanche,
    DebtSnowball,
}

impl RepaymentStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            RepaymentStrategy::NoDebt => "No debt to repay",
            RepaymentStrategy::DebtAvalanche => "Debt Avalanche",
            RepaymentStrategy::DebtSnowball => "Debt Snowball",
        }
    }

    pub const fn tip(self) -> &'static str {
        match self {
            RepaymentStrategy::NoDebt => "Maintain timely payments and keep utilization low.",
            RepaymentStrategy::DebtAvalanche => {
                "Clear revolving card balances first; they carry the highest interest."
            }
            RepaymentStrategy::DebtSnowball => {
                "Pay more than the minimum due every month and close the smallest balances first."
            }
        }
    }
}

/// Level-payment schedule for one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentOption {
    pub term_months: u32,
    pub monthly_payment: Decimal,
    pub total_paid: Decimal,
    pub total_interest: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinancingOffer {
    pub lender: String,
    pub rate_pct: Decimal,
    /// Interest avoided over three years by moving to the offer; never negative.
    pub savings_opportunity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentPlan {
    pub strategy: RepaymentStrategy,
    pub principal: Decimal,
    pub current_rate_pct: Decimal,
    pub revolving: bool,
    pub options: Vec<RepaymentOption>,
    pub refinancing: Option<RefinancingOffer>,
    pub tip: String,
}

impl RepaymentPlan {
    fn no_debt() -> Self {
        let strategy = RepaymentStrategy::NoDebt;
        Self {
            strategy,
            principal: Decimal::ZERO,
            current_rate_pct: Decimal::ZERO,
            revolving: false,
            options: Vec::new(),
            refinancing: None,
            tip: strategy.tip().to_string(),
        }
    }

    pub fn has_debt(&self) -> bool {
        self.strategy != RepaymentStrategy::NoDebt
    }

    /// Payment of the shortest horizon, or zero without debt.
    pub fn monthly_payment(&self) -> Decimal {
        self.options
            .first()
            .map(|option| option.monthly_payment)
            .unwrap_or(Decimal::ZERO)
    }
}

pub(crate) fn plan_repayment(input: &FinancialInput, market: &ReferenceData) -> RepaymentPlan {
    let principal = input.debt;
    if principal <= Decimal::ZERO {
        return RepaymentPlan::no_debt();
    }

    let revolving = input.credit_utilization > REVOLVING_UTILIZATION_THRESHOLD;
    let (current_rate_pct, strategy) = if revolving {
        (market.revolving_credit_rate, RepaymentStrategy::DebtAvalanche)
    } else {
        (market.installment_rate_estimate, RepaymentStrategy::DebtSnowball)
    };

    let options: Vec<RepaymentOption> = REPAYMENT_TERMS_MONTHS
        .iter()
        .map(|&term_months| {
            let monthly_payment = amortized_payment(principal, current_rate_pct, term_months);
            let total_paid = monthly_payment * Decimal::from(term_months);
            RepaymentOption {
                term_months,
                monthly_payment,
                total_paid,
                total_interest: (total_paid - principal).max(Decimal::ZERO),
            }
        })
        .collect();

    let refinancing = market.best_personal_loan().map(|best| {
        let current_total = options
            .first()
            .map(|option| option.total_paid)
            .unwrap_or(principal);
        refinancing_offer(principal, current_total, best)
    });

    RepaymentPlan {
        strategy,
        principal,
        current_rate_pct,
        revolving,
        options,
        refinancing,
        tip: strategy.tip().to_string(),
    }
}

fn refinancing_offer(
    principal: Decimal,
    current_total: Decimal,
    best: LenderRate,
) -> RefinancingOffer {
    let refinanced_total =
        principal * (Decimal::ONE + best.rate_pct / dec!(100) * REFINANCE_HORIZON_YEARS);
    RefinancingOffer {
        lender: best.lender,
        rate_pct: best.rate_pct,
        savings_opportunity: (current_total - refinanced_total).max(Decimal::ZERO),
    }
}

/// Standard amortizing-loan payment: `P * r / (1 - (1 + r)^-n)` with monthly rate `r`.
pub(crate) fn amortized_payment(
    principal: Decimal,
    annual_rate_pct: Decimal,
    months: u32,
) -> Decimal {
    if months == 0 {
        return principal;
    }

    let periods = Decimal::from(months);
    let monthly_rate = annual_rate_pct / dec!(100) / dec!(12);
    if monthly_rate <= Decimal::ZERO {
        return principal / periods;
    }

    let growth = (Decimal::ONE + monthly_rate).powi(i64::from(months));
    principal * monthly_rate * growth / (growth - Decimal::ONE)
}
