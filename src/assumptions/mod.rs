//! Plan assumptions for one (case, scenario)
//!
//! Rates are fractions (`0.03` is 3%). Every section has defaults so a
//! partially specified plan still projects.

mod drivers;
pub mod loader;

pub use drivers::{BalanceDrivers, LineDriver};
pub use loader::PlanInputs;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::amortization::{Financing, TaxDebt};
use crate::auxiliary::{ProcedureCostTerms, RentTerms, SaleTerms, ScheduledCollection};
use crate::error::PlanResult;
use crate::liquidation::LiquidationParams;
use crate::settlement::SettlementParams;
use crate::timeline::Timeline;

/// Horizon and tax parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanParams {
    pub start_year: i32,
    pub start_month: u32,
    pub duration_months: u32,
    /// Corporate income tax on positive pre-tax result
    pub corporate_tax_rate: Decimal,
    /// Regional production tax on positive pre-tax result
    pub regional_tax_rate: Decimal,
    pub sales_vat_rate: Decimal,
    pub purchase_vat_rate: Decimal,
    /// Months between VAT accrual and settlement
    pub vat_settlement_lag: u32,
}

impl Default for PlanParams {
    fn default() -> Self {
        Self {
            start_year: 2025,
            start_month: 1,
            duration_months: 120,
            corporate_tax_rate: dec!(0.24),
            regional_tax_rate: dec!(0.039),
            sales_vat_rate: dec!(0.22),
            purchase_vat_rate: dec!(0.22),
            vat_settlement_lag: 1,
        }
    }
}

/// Container for all plan assumptions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub version: u32,
    pub plan: PlanParams,
    /// Income-statement drivers keyed by opening line code
    pub ce_drivers: BTreeMap<String, LineDriver>,
    pub balance_drivers: BalanceDrivers,
    pub financings: Vec<Financing>,
    pub tax_debts: Vec<TaxDebt>,
    pub rent: RentTerms,
    pub business_sale: SaleTerms,
    pub procedure_costs: ProcedureCostTerms,
    pub asset_collections: Vec<ScheduledCollection>,
    pub liquidation: LiquidationParams,
    pub settlement: SettlementParams,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            version: 1,
            plan: PlanParams::default(),
            ce_drivers: BTreeMap::new(),
            balance_drivers: BalanceDrivers::default(),
            financings: Vec::new(),
            tax_debts: Vec::new(),
            rent: RentTerms::default(),
            business_sale: SaleTerms::default(),
            procedure_costs: ProcedureCostTerms::default(),
            asset_collections: Vec::new(),
            liquidation: LiquidationParams::default(),
            settlement: SettlementParams::default(),
        }
    }
}

impl Assumptions {
    /// Load assumptions from a JSON file
    pub fn from_json_path(path: &Path) -> PlanResult<Self> {
        loader::load_assumptions(path)
    }

    pub fn timeline(&self) -> PlanResult<Timeline> {
        Timeline::build(self.plan.start_year, self.plan.start_month, self.plan.duration_months)
    }

    pub fn duration(&self) -> usize {
        self.plan.duration_months as usize
    }

    pub fn driver(&self, code: &str) -> Option<&LineDriver> {
        self.ce_drivers.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let a = Assumptions::default();
        assert_eq!(a.plan.duration_months, 120);
        assert_eq!(a.balance_drivers.dso, dec!(60));
        assert_eq!(a.balance_drivers.short_term_debt_share, dec!(0.40));
        assert_eq!(a.settlement.classes.len(), 4);
        assert!(a.settlement.cash_constrained);
        assert_eq!(a.timeline().unwrap().len(), 120);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{
            "plan": { "duration_months": 36, "start_month": 7 },
            "ce_drivers": { "REVENUE": { "growth_rates": [0.05, 0.03] } },
            "rent": { "annual_fee": 24000 }
        }"#;
        let a: Assumptions = serde_json::from_str(json).unwrap();
        assert_eq!(a.plan.duration_months, 36);
        assert_eq!(a.plan.start_year, 2025);
        assert_eq!(a.plan.corporate_tax_rate, dec!(0.24));
        assert_eq!(a.driver("REVENUE").unwrap().growth_rates.len(), 2);
        assert_eq!(a.rent.annual_fee, dec!(24000));
        assert_eq!(a.rent.vat_rate, dec!(0.22));
        assert_eq!(a.timeline().unwrap().periods[0].label, "Jul-2025");
    }
}
