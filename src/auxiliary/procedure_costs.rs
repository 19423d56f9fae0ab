//! Procedure costs paid in pre-deduction

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::{round2, split_even};

/// Professional social-security contribution on fees
pub const PROFESSIONAL_FUND_FACTOR: Decimal = dec!(1.04);
/// VAT applied on professional fees
pub const FEE_VAT_FACTOR: Decimal = dec!(1.22);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureFee {
    /// e.g. trustee, attestor, advisor, court costs
    pub name: String,
    pub taxable_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureCostTerms {
    pub fees: Vec<ProcedureFee>,
    /// Monthly operating fund for business continuity
    pub operating_fund_monthly: Decimal,
    pub operating_fund_months: u32,
}

impl Default for ProcedureCostTerms {
    fn default() -> Self {
        Self {
            fees: Vec::new(),
            operating_fund_monthly: Decimal::ZERO,
            operating_fund_months: 12,
        }
    }
}

impl ProcedureFee {
    /// Fee grossed up by professional fund and VAT
    pub fn gross_amount(&self) -> Decimal {
        round2(self.taxable_amount * PROFESSIONAL_FUND_FACTOR * FEE_VAT_FACTOR)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcedureMonth {
    pub fees: Decimal,
    pub operating_fund: Decimal,
}

impl ProcedureMonth {
    pub fn total(&self) -> Decimal {
        self.fees + self.operating_fund
    }
}

/// Fees spread evenly over the horizon, operating fund for its own duration
pub fn procedure_schedule(terms: &ProcedureCostTerms, duration: usize) -> Vec<ProcedureMonth> {
    let mut months = vec![ProcedureMonth::default(); duration];
    for fee in terms.fees.iter().filter(|f| f.taxable_amount > Decimal::ZERO) {
        for (month, quota) in months.iter_mut().zip(split_even(fee.gross_amount(), duration)) {
            month.fees += quota;
        }
    }
    if terms.operating_fund_monthly > Decimal::ZERO {
        for month in months.iter_mut().take(terms.operating_fund_months as usize) {
            month.operating_fund = terms.operating_fund_monthly;
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_gross_up_and_spread() {
        let terms = ProcedureCostTerms {
            fees: vec![ProcedureFee { name: "Trustee".to_string(), taxable_amount: dec!(10000) }],
            operating_fund_monthly: dec!(2000),
            operating_fund_months: 3,
        };
        let months = procedure_schedule(&terms, 12);
        let fees: Decimal = months.iter().map(|m| m.fees).sum();
        assert_eq!(fees, dec!(12688.00));
        assert_eq!(months[0].fees, dec!(1057.33));
        assert_eq!(months[11].fees, dec!(1057.37));
        assert_eq!(months[2].operating_fund, dec!(2000));
        assert_eq!(months[3].operating_fund, Decimal::ZERO);
        assert_eq!(months[0].total(), dec!(3057.33));
    }
}
