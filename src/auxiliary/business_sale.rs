//! Sale of the going concern

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleTerms {
    pub gross_price: Decimal,
    /// Severance liabilities taken over by the buyer
    pub assumed_severance: Decimal,
    /// Other debts taken over by the buyer
    pub assumed_debts: Decimal,
    pub sale_period: u32,
}

impl Default for SaleTerms {
    fn default() -> Self {
        Self {
            gross_price: Decimal::ZERO,
            assumed_severance: Decimal::ZERO,
            assumed_debts: Decimal::ZERO,
            sale_period: 60,
        }
    }
}

/// Sale components booked in the sale period
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleProceeds {
    pub period: u32,
    pub gross: Decimal,
    /// Stored negative
    pub assumed_severance: Decimal,
    /// Stored negative
    pub assumed_debts: Decimal,
    pub net: Decimal,
}

/// `None` when there is no sale or it falls outside the horizon
pub fn sale_proceeds(terms: &SaleTerms, duration: usize) -> Option<SaleProceeds> {
    if terms.gross_price <= Decimal::ZERO || terms.sale_period as usize >= duration {
        return None;
    }
    Some(SaleProceeds {
        period: terms.sale_period,
        gross: terms.gross_price,
        assumed_severance: -terms.assumed_severance,
        assumed_debts: -terms.assumed_debts,
        net: terms.gross_price - terms.assumed_severance - terms.assumed_debts,
    })
}
