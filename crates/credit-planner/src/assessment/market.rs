//! Static market reference table consumed by the strategy generator.
//!
//! Rates are plain configuration: the engine receives a [`ReferenceData`] value and never
//! fetches anything itself. Deployments can swap the built-in table for a JSON file.

use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Advertised personal-loan interest band for one lender, in percent per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub min: Decimal,
    pub max: Decimal,
}

/// A mutual fund listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub name: String,
    pub three_year_return: Decimal,
    pub risk: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundCategory {
    LargeCap,
    FlexiCap,
    DebtFunds,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FundCatalog {
    #[serde(default)]
    pub large_cap: Vec<Fund>,
    #[serde(default)]
    pub flexi_cap: Vec<Fund>,
    #[serde(default)]
    pub debt_funds: Vec<Fund>,
}

/// Annual return assumptions used for projections, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnBands {
    pub conservative_pct: Decimal,
    pub optimistic_pct: Decimal,
}

/// Lender quoting the lowest rate in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderRate {
    pub lender: String,
    pub rate_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub as_of: String,
    pub personal_loan_rates: BTreeMap<String, RateBand>,
    /// Flat annual rate assumed for ordinary installment debt.
    pub installment_rate_estimate: Decimal,
    /// Average annual rate on revolving credit-card balances.
    pub revolving_credit_rate: Decimal,
    pub funds: FundCatalog,
    pub fd_rates: BTreeMap<String, Decimal>,
    pub return_bands: ReturnBands,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::india_2025()
    }
}

impl ReferenceData {
    /// Built-in table of Indian retail rates as of August 2025.
    pub fn india_2025() -> Self {
        let personal_loan_rates = [
            ("HDFC", dec!(10.85), dec!(21.0)),
            ("ICICI", dec!(10.60), dec!(21.0)),
            ("Axis", dec!(9.99), dec!(21.0)),
            ("SBI", dec!(11.50), dec!(16.0)),
            ("Bajaj", dec!(10.0), dec!(30.0)),
        ]
        .into_iter()
        .map(|(lender, min, max)| (lender.to_string(), RateBand { min, max }))
        .collect();

        let fd_rates = [
            ("SBI", dec!(6.8)),
            ("HDFC", dec!(7.0)),
            ("ICICI", dec!(7.25)),
            ("Axis", dec!(7.5)),
        ]
        .into_iter()
        .map(|(bank, rate)| (bank.to_string(), rate))
        .collect();

        Self {
            as_of: "August 2025".to_string(),
            personal_loan_rates,
            installment_rate_estimate: dec!(18),
            revolving_credit_rate: dec!(36),
            funds: FundCatalog {
                large_cap: vec![
                    fund("ICICI Pru Bluechip Fund", dec!(15.2), "Low"),
                    fund("Axis Bluechip Fund", dec!(14.8), "Low"),
                    fund("Mirae Asset Large Cap Fund", dec!(14.5), "Low"),
                ],
                flexi_cap: vec![
                    fund("Parag Parikh Flexi Cap Fund", dec!(17.8), "Moderate"),
                    fund("HDFC Flexi Cap Fund", dec!(16.2), "Moderate"),
                    fund("Kotak Flexi Cap Fund", dec!(15.9), "Moderate"),
                ],
                debt_funds: vec![
                    fund("ICICI Pru Short Term Fund", dec!(7.2), "Very Low"),
                    fund("Axis Banking & PSU Debt Fund", dec!(7.8), "Low"),
                    fund("HDFC Corporate Bond Fund", dec!(7.5), "Low"),
                ],
            },
            fd_rates,
            return_bands: ReturnBands {
                conservative_pct: dec!(8),
                optimistic_pct: dec!(15),
            },
        }
    }

    /// Load a replacement table from JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn funds(&self, category: FundCategory) -> &[Fund] {
        match category {
            FundCategory::LargeCap => &self.funds.large_cap,
            FundCategory::FlexiCap => &self.funds.flexi_cap,
            FundCategory::DebtFunds => &self.funds.debt_funds,
        }
    }

    /// Lender with the lowest minimum personal-loan rate; ties keep the first in key order.
    pub fn best_personal_loan(&self) -> Option<LenderRate> {
        self.personal_loan_rates
            .iter()
            .fold(None::<(&String, &RateBand)>, |best, (lender, band)| match best {
                Some((_, current)) if current.min <= band.min => best,
                _ => Some((lender, band)),
            })
            .map(|(lender, band)| LenderRate {
                lender: lender.clone(),
                rate_pct: band.min,
            })
    }

    /// Institution paying the highest fixed-deposit rate; ties keep the first in key order.
    pub fn best_fixed_deposit(&self) -> Option<LenderRate> {
        self.fd_rates
            .iter()
            .fold(None::<(&String, &Decimal)>, |best, (bank, rate)| match best {
                Some((_, current)) if current >= rate => best,
                _ => Some((bank, rate)),
            })
            .map(|(bank, rate)| LenderRate {
                lender: bank.clone(),
                rate_pct: *rate,
            })
    }
}

fn fund(name: &str, three_year_return: Decimal, risk: &str) -> Fund {
    Fund {
        name: name.to_string(),
        three_year_return,
        risk: risk.to_string(),
    }
}
