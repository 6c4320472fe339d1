use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::super::market::{Fund, FundCategory, LenderRate, ReferenceData};
use super::super::profile::{Profile, RiskTier};

/// Monthly capacity below which no allocation is proposed.
pub(crate) const MINIMUM_INVESTMENT_CAPACITY: Decimal = dec!(1000);
pub(crate) const DEFERRED_MESSAGE: &str = "Focus on increasing income and reducing expenses first";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedReturns {
    pub conservative_rate_pct: Decimal,
    /// Twelve monthly contributions grown at the conservative rate.
    pub conservative_value: Decimal,
    pub optimistic_rate_pct: Decimal,
    pub optimistic_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub monthly_investment: Decimal,
    pub equity_share: Decimal,
    pub fixed_deposit_share: Decimal,
    pub equity_amount: Decimal,
    pub fixed_deposit_amount: Decimal,
    pub recommended_funds: Vec<Fund>,
    pub projected_returns: ProjectedReturns,
    pub best_fixed_deposit: Option<LenderRate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvestmentPlan {
    /// Capacity is too small; the subject should fix cash flow first.
    Deferred { message: String },
    Allocated(AllocationPlan),
}

impl InvestmentPlan {
    pub fn allocation(&self) -> Option<&AllocationPlan> {
        match self {
            InvestmentPlan::Allocated(plan) => Some(plan),
            InvestmentPlan::Deferred { .. } => None,
        }
    }
}

pub(crate) fn plan_investment(profile: &Profile, market: &ReferenceData) -> InvestmentPlan {
    let capacity = profile.investment_capacity;
    if capacity < MINIMUM_INVESTMENT_CAPACITY {
        return InvestmentPlan::Deferred {
            message: DEFERRED_MESSAGE.to_string(),
        };
    }

    let (recommended_funds, fixed_deposit_share) = match profile.risk_category {
        RiskTier::Conservative => (take(market, FundCategory::DebtFunds, 2), dec!(0.4)),
        RiskTier::Aggressive => (take(market, FundCategory::FlexiCap, 2), dec!(0.1)),
        RiskTier::Moderate => {
            let mut funds = take(market, FundCategory::LargeCap, 1);
            funds.extend(take(market, FundCategory::FlexiCap, 1));
            (funds, dec!(0.2))
        }
    };
    let equity_share = Decimal::ONE - fixed_deposit_share;

    let annual_contribution = capacity * dec!(12);
    let bands = &market.return_bands;
    let projected_returns = ProjectedReturns {
        conservative_rate_pct: bands.conservative_pct,
        conservative_value: grow(annual_contribution, bands.conservative_pct),
        optimistic_rate_pct: bands.optimistic_pct,
        optimistic_value: grow(annual_contribution, bands.optimistic_pct),
    };

    InvestmentPlan::Allocated(AllocationPlan {
        monthly_investment: capacity,
        equity_share,
        fixed_deposit_share,
        equity_amount: capacity * equity_share,
        fixed_deposit_amount: capacity * fixed_deposit_share,
        recommended_funds,
        projected_returns,
        best_fixed_deposit: market.best_fixed_deposit(),
    })
}

fn take(market: &ReferenceData, category: FundCategory, count: usize) -> Vec<Fund> {
    market.funds(category).iter().take(count).cloned().collect()
}

fn grow(amount: Decimal, rate_pct: Decimal) -> Decimal {
    amount * (Decimal::ONE + rate_pct / dec!(100))
}
