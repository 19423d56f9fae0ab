//! Rescheduled tax debts
//!
//! Constant principal, interest on the declining balance and the penalty
//! spread pro-rata across installments, the last one absorbing rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{schedule, AmortizationMethod};
use crate::money::split_even;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxDebt {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub principal: Decimal,
    #[serde(default)]
    pub annual_rate: Decimal,
    #[serde(default)]
    pub penalties: Decimal,
    pub installments: u32,
    #[serde(default)]
    pub start_period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxDebtRow {
    pub period: u32,
    pub principal: Decimal,
    pub interest: Decimal,
    pub penalty: Decimal,
    pub installment: Decimal,
    pub residual: Decimal,
}

impl TaxDebt {
    pub fn schedule(&self) -> Vec<TaxDebtRow> {
        let base = schedule(
            self.principal,
            self.annual_rate,
            self.installments,
            AmortizationMethod::ConstantPrincipal,
        );
        let penalties = split_even(self.penalties.max(Decimal::ZERO), base.len());
        base.into_iter()
            .zip(penalties)
            .map(|(row, penalty)| TaxDebtRow {
                period: self.start_period + row.number - 1,
                principal: row.principal,
                interest: row.interest,
                penalty,
                installment: row.installment + penalty,
                residual: row.residual,
            })
            .collect()
    }
}

/// All tax debts summed for one period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxDebtPeriod {
    pub principal: Decimal,
    pub interest: Decimal,
    pub penalty: Decimal,
    pub installment: Decimal,
}

pub fn aggregate_tax_debts(debts: &[TaxDebt], duration: usize) -> Vec<TaxDebtPeriod> {
    let mut periods = vec![TaxDebtPeriod::default(); duration];
    for row in debts.iter().flat_map(|d| d.schedule()) {
        if let Some(p) = periods.get_mut(row.period as usize) {
            p.principal += row.principal;
            p.interest += row.interest;
            p.penalty += row.penalty;
            p.installment += row.installment;
        }
    }
    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn debt() -> TaxDebt {
        TaxDebt {
            id: "T1".to_string(),
            description: "VAT 2023".to_string(),
            principal: dec!(10000),
            annual_rate: dec!(0.024),
            penalties: dec!(1000),
            installments: 3,
            start_period: 2,
        }
    }

    #[test]
    fn test_penalty_pro_rata_with_remainder() {
        let rows = debt().schedule();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].period, 2);
        assert_eq!(rows[0].penalty, dec!(333.33));
        assert_eq!(rows[2].penalty, dec!(333.34));
        assert_eq!(rows[0].principal, dec!(3333.33));
        assert_eq!(rows[2].principal, dec!(3333.34));
        assert_eq!(rows[0].interest, dec!(20.00));
        assert_eq!(rows[0].installment, dec!(3686.66));
        assert_eq!(rows[2].residual, Decimal::ZERO);
    }

    #[test]
    fn test_aggregate_sums_components() {
        let periods = aggregate_tax_debts(&[debt(), debt()], 6);
        let principal: Decimal = periods.iter().map(|p| p.principal).sum();
        let penalty: Decimal = periods.iter().map(|p| p.penalty).sum();
        assert_eq!(principal, dec!(20000));
        assert_eq!(penalty, dec!(2000));
        assert_eq!(periods[0], TaxDebtPeriod::default());
    }
}
