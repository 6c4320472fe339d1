use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::super::money::{format_currency, format_rate};
use super::super::profile::{Priority, Profile};
use super::super::strategy::{InvestmentPlan, RepaymentPlan};

const EMERGENCY_CONTRIBUTION_CAP: Decimal = dec!(5000);
const DEFAULT_SIP: Decimal = dec!(5000);

/// Thirty-day action list, one fixed template per priority.
pub(crate) fn action_plan(
    profile: &Profile,
    repayment: &RepaymentPlan,
    investment: &InvestmentPlan,
) -> Vec<String> {
    let refinancing = repayment
        .refinancing
        .as_ref()
        .map(|offer| format!("{} at {}", offer.lender, format_rate(offer.rate_pct)));

    match profile.priority {
        Priority::CreditRepair => vec![
            if repayment.revolving {
                format!(
                    "Pay all credit card dues immediately (avoid {} interest)",
                    format_rate(repayment.current_rate_pct)
                )
            } else {
                "Pay all credit card dues immediately".to_string()
            },
            "Reduce credit utilization below 30% this month".to_string(),
            "Set up auto-pay for all bills".to_string(),
            "Apply for a secured credit card if needed".to_string(),
        ],
        Priority::DebtReduction => vec![
            format!(
                "Transfer high-interest debt to {}",
                refinancing.unwrap_or_else(|| "a lower rate lender".to_string())
            ),
            format!(
                "Start emergency fund: {}/month",
                format_currency(
                    profile
                        .surplus
                        .min(EMERGENCY_CONTRIBUTION_CAP)
                        .max(Decimal::ZERO)
                )
            ),
            "Avoid new credit for 6 months".to_string(),
            "Consider debt consolidation".to_string(),
        ],
        Priority::DebtManagement => vec![
            format!(
                "Pay {}/month to clear your debt within 36 months",
                format_currency(repayment.monthly_payment())
            ),
            "Keep credit utilization below 30%".to_string(),
            format!(
                "Build an emergency fund toward {}",
                format_currency(profile.emergency_fund_target)
            ),
            match refinancing {
                Some(offer) => format!("Compare your current rate against {offer}"),
                None => "Compare personal loan rates before your next renewal".to_string(),
            },
        ],
        Priority::WealthBuilding => {
            let sip = investment
                .allocation()
                .map(|plan| plan.monthly_investment)
                .unwrap_or(DEFAULT_SIP);
            let deposit = investment
                .allocation()
                .and_then(|plan| plan.best_fixed_deposit.as_ref())
                .map(|offer| format!("{} at {}", format_rate(offer.rate_pct), offer.lender))
                .unwrap_or_else(|| "the best available deposit rate".to_string());
            vec![
                format!("Start SIP: {} in recommended funds", format_currency(sip)),
                format!("Open high-yield savings account: {deposit}"),
                "Increase insurance coverage".to_string(),
                "Plan for tax-saving investments (ELSS)".to_string(),
            ]
        }
    }
}
