mod investment;
mod repayment;

pub use investment::{AllocationPlan, InvestmentPlan, ProjectedReturns};
pub use repayment::{RefinancingOffer, RepaymentOption, RepaymentPlan, RepaymentStrategy};

use super::domain::FinancialInput;
use super::market::ReferenceData;
use super::profile::Profile;

/// Builds the debt-repayment and investment plans against a reference table.
#[derive(Debug, Clone, Default)]
pub struct StrategyGenerator {
    market: ReferenceData,
}

impl StrategyGenerator {
    pub fn new(market: ReferenceData) -> Self {
        Self { market }
    }

    pub fn market(&self) -> &ReferenceData {
        &self.market
    }

    pub fn repayment_plan(&self, input: &FinancialInput) -> RepaymentPlan {
        repayment::plan_repayment(input, &self.market)
    }

    pub fn investment_plan(&self, profile: &Profile) -> InvestmentPlan {
        investment::plan_investment(profile, &self.market)
    }
}
