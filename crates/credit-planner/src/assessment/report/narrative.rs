use super::super::money::{format_currency, format_rate, format_share};
use super::super::strategy::{InvestmentPlan, RepaymentPlan};
use super::RecommendationReport;

/// Deterministic plain-text rendering of a report. Never includes the timestamp.
pub(crate) fn render(report: &RecommendationReport) -> String {
    let mut lines = vec![
        format!(
            "Financial Plan (based on {} market data)",
            report.market_as_of
        ),
        String::new(),
    ];

    profile_section(report, &mut lines);
    checkup_section(report, &mut lines);
    debt_section(&report.repayment, &mut lines);
    investment_section(&report.investment, &mut lines);

    lines.push("Action Plan (next 30 days)".to_string());
    for (index, action) in report.actions.iter().enumerate() {
        lines.push(format!("{}. {}", index + 1, action));
    }

    lines.join("\n")
}

fn profile_section(report: &RecommendationReport, lines: &mut Vec<String>) {
    let profile = &report.profile;
    let score = &report.score;

    lines.push("Profile Summary".to_string());
    lines.push(format!(
        "- Credit Score: {}/900 ({})",
        score.credit_score,
        score.credit_band.label()
    ));
    lines.push(format!(
        "- Financial Health: {}/100 ({} risk profile)",
        score.health_score,
        score.risk_profile.label()
    ));
    lines.push(format!(
        "- Risk Category: {}",
        profile.risk_category.label()
    ));
    lines.push(format!(
        "- Monthly Surplus: {}",
        format_currency(profile.surplus)
    ));
    lines.push(format!(
        "- Investment Capacity: {}",
        format_currency(profile.investment_capacity)
    ));
    lines.push(format!(
        "- Emergency Fund Target: {}",
        format_currency(profile.emergency_fund_target)
    ));
    lines.push(format!("- Priority: {}", profile.priority.title()));

    if !report.input.financial_goals.is_empty() {
        let goals: Vec<&str> = report
            .input
            .financial_goals
            .iter()
            .map(|goal| goal.label())
            .collect();
        lines.push(format!("- Goals: {}", goals.join(", ")));
    }

    if !report.input.current_investments.is_empty() {
        let holdings: Vec<&str> = report
            .input
            .current_investments
            .iter()
            .map(|holding| holding.label())
            .collect();
        lines.push(format!("- Current Investments: {}", holdings.join(", ")));
    }

    lines.push(String::new());
}

fn checkup_section(report: &RecommendationReport, lines: &mut Vec<String>) {
    let score = &report.score;

    lines.push("Financial Health Checkup".to_string());
    lines.push(format!("- Debt-to-Income Ratio: {:.2}", score.debt_to_income));
    lines.push(format!("- Advice: {}", score.credit_band.suggestion()));
    lines.push(format!("- Comment: {}", score.debt_ratio_comment()));
    lines.push(format!("- Trend: {}", report.trend.description));
    lines.push(format!(
        "- Rules passed: {} of {}",
        report.rules.passed_count(),
        report.rules.iter().count()
    ));
    lines.push(String::new());
}

fn debt_section(plan: &RepaymentPlan, lines: &mut Vec<String>) {
    lines.push("Debt Strategy".to_string());

    if !plan.has_debt() {
        lines.push(format!("- {}", plan.strategy.label()));
        lines.push(format!("- Tip: {}", plan.tip));
        lines.push(String::new());
        return;
    }

    lines.push(format!("- Strategy: {}", plan.strategy.label()));
    lines.push(format!(
        "- Current debt rate: {}",
        format_rate(plan.current_rate_pct)
    ));
    if let Some(offer) = &plan.refinancing {
        lines.push(format!(
            "- Best refinancing: {} at {}",
            offer.lender,
            format_rate(offer.rate_pct)
        ));
    }
    for option in &plan.options {
        lines.push(format!(
            "- {} months: {}/month ({} total interest)",
            option.term_months,
            format_currency(option.monthly_payment),
            format_currency(option.total_interest)
        ));
    }
    if let Some(offer) = &plan.refinancing {
        lines.push(format!(
            "- Potential savings: {} by refinancing",
            format_currency(offer.savings_opportunity)
        ));
    }
    lines.push(format!("- Tip: {}", plan.tip));
    lines.push(String::new());
}

fn investment_section(plan: &InvestmentPlan, lines: &mut Vec<String>) {
    lines.push("Investment Recommendation".to_string());

    match plan {
        InvestmentPlan::Deferred { message } => {
            lines.push(format!("- {message}"));
        }
        InvestmentPlan::Allocated(allocation) => {
            lines.push(format!(
                "- Monthly SIP: {}",
                format_currency(allocation.monthly_investment)
            ));
            lines.push(format!(
                "- Allocation: {} ({}) in equity funds, {} ({}) in fixed deposits",
                format_currency(allocation.equity_amount),
                format_share(allocation.equity_share),
                format_currency(allocation.fixed_deposit_amount),
                format_share(allocation.fixed_deposit_share)
            ));
            if !allocation.recommended_funds.is_empty() {
                let names: Vec<&str> = allocation
                    .recommended_funds
                    .iter()
                    .map(|fund| fund.name.as_str())
                    .collect();
                lines.push(format!("- Top funds: {}", names.join(", ")));
            }
            let returns = &allocation.projected_returns;
            lines.push(format!(
                "- Value after 12 months: {} at {} p.a., {} at {} p.a.",
                format_currency(returns.conservative_value),
                format_rate(returns.conservative_rate_pct),
                format_currency(returns.optimistic_value),
                format_rate(returns.optimistic_rate_pct)
            ));
            if let Some(offer) = &allocation.best_fixed_deposit {
                lines.push(format!(
                    "- Best FD rate: {} at {}",
                    format_rate(offer.rate_pct),
                    offer.lender
                ));
            }
        }
    }

    lines.push(String::new());
}
