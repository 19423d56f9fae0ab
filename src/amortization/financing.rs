//! New and pre-existing financings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{schedule, AmortizationMethod, ScheduleRow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancingKind {
    /// Disbursed during the plan
    #[default]
    New,
    /// Already outstanding at plan start
    Existing,
}

/// A loan modelled in the plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Financing {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: FinancingKind,
    /// Amount disbursed (new financings)
    #[serde(default)]
    pub principal: Decimal,
    pub annual_rate: Decimal,
    pub term_months: u32,
    /// Period of disbursement, also the period of the first installment
    #[serde(default)]
    pub disbursement_period: u32,
    #[serde(default)]
    pub method: AmortizationMethod,
    /// Outstanding principal at plan start (existing financings)
    #[serde(default)]
    pub initial_residual: Option<Decimal>,
    /// Installments still due at plan start (existing financings)
    #[serde(default)]
    pub remaining_installments: Option<u32>,
}

impl Financing {
    /// Principal and number of installments the schedule is built on
    fn amortized_terms(&self) -> (Decimal, u32) {
        match self.kind {
            FinancingKind::New => (self.principal, self.term_months),
            FinancingKind::Existing => (
                self.initial_residual.unwrap_or(self.principal),
                self.remaining_installments.unwrap_or(self.term_months),
            ),
        }
    }

    pub fn schedule(&self) -> Vec<ScheduleRow> {
        let (principal, term) = self.amortized_terms();
        schedule(principal, self.annual_rate, term, self.method)
    }

    /// Plan period an installment number falls in
    pub fn period_of(&self, row: &ScheduleRow) -> u32 {
        self.disbursement_period + row.number - 1
    }
}

/// All financings summed for one period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancingPeriod {
    pub disbursement: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub installment: Decimal,
    /// Principal repaid on financings already outstanding at plan start
    pub existing_principal: Decimal,
    /// Outstanding principal of new financings at period end
    pub new_residual: Decimal,
}

/// Per-period totals across all financings over `duration` periods
pub fn aggregate_financings(financings: &[Financing], duration: usize) -> Vec<FinancingPeriod> {
    let mut periods = vec![FinancingPeriod::default(); duration];

    for financing in financings {
        let rows = financing.schedule();
        if rows.is_empty() {
            continue;
        }
        let start = financing.disbursement_period as usize;
        if financing.kind == FinancingKind::New {
            if let Some(p) = periods.get_mut(start) {
                p.disbursement += financing.principal;
            }
        }
        for row in &rows {
            let Some(p) = periods.get_mut(financing.period_of(row) as usize) else {
                break;
            };
            p.principal += row.principal;
            p.interest += row.interest;
            p.installment += row.installment;
            match financing.kind {
                FinancingKind::New => p.new_residual += row.residual,
                FinancingKind::Existing => p.existing_principal += row.principal,
            }
        }
    }
    periods
}
