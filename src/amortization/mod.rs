//! Loan amortization calculators
//!
//! Pure functions producing one row per month. Every schedule satisfies
//! `Σ principal == principal` to the cent and ends with a zero residual.
//! Degenerate input (non-positive principal, zero term, negative rate)
//! produces an empty schedule.

pub mod financing;
pub mod tax_debt;

pub use financing::{Financing, FinancingKind, FinancingPeriod, aggregate_financings};
pub use tax_debt::{TaxDebt, TaxDebtRow, TaxDebtPeriod, aggregate_tax_debts};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{compound, monthly_rate, round2, split_even};

/// Repayment profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmortizationMethod {
    /// French: constant installment, rising principal share
    #[default]
    ConstantInstallment,
    /// Italian: constant principal, interest on declining balance
    ConstantPrincipal,
    /// Interest only, full principal on the final installment
    Bullet,
}

/// One month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based installment number
    pub number: u32,
    pub principal: Decimal,
    pub interest: Decimal,
    pub installment: Decimal,
    /// Outstanding principal after this installment
    pub residual: Decimal,
}

/// Build the monthly schedule for a loan
pub fn schedule(
    principal: Decimal,
    annual_rate: Decimal,
    term_months: u32,
    method: AmortizationMethod,
) -> Vec<ScheduleRow> {
    if principal <= Decimal::ZERO || term_months == 0 || annual_rate < Decimal::ZERO {
        return Vec::new();
    }
    let rate = monthly_rate(annual_rate);
    match method {
        AmortizationMethod::ConstantInstallment if rate.is_zero() => {
            constant_principal(principal, rate, term_months)
        }
        AmortizationMethod::ConstantInstallment => constant_installment(principal, rate, term_months),
        AmortizationMethod::ConstantPrincipal => constant_principal(principal, rate, term_months),
        AmortizationMethod::Bullet => bullet(principal, rate, term_months),
    }
}

/// Level installment `P·r·(1+r)^n / ((1+r)^n − 1)`, last row settles the exact residual.
/// Empty when the compounding factor overflows.
fn constant_installment(principal: Decimal, rate: Decimal, term: u32) -> Vec<ScheduleRow> {
    let Some(installment) = level_installment(principal, rate, term) else {
        return Vec::new();
    };

    let mut rows = Vec::with_capacity(term as usize);
    let mut residual = principal;
    for number in 1..=term {
        let interest = round2(residual * rate);
        let quota = if number == term {
            residual
        } else {
            (installment - interest).min(residual).max(Decimal::ZERO)
        };
        residual -= quota;
        rows.push(ScheduleRow {
            number,
            principal: quota,
            interest,
            installment: quota + interest,
            residual,
        });
    }
    rows
}

fn level_installment(principal: Decimal, rate: Decimal, term: u32) -> Option<Decimal> {
    let factor = compound(rate, term)?;
    let numerator = principal.checked_mul(rate)?.checked_mul(factor)?;
    numerator.checked_div(factor - Decimal::ONE).map(round2)
}

fn constant_principal(principal: Decimal, rate: Decimal, term: u32) -> Vec<ScheduleRow> {
    let quotas = split_even(principal, term as usize);
    let mut residual = principal;
    quotas
        .into_iter()
        .zip(1..=term)
        .map(|(quota, number)| {
            let interest = round2(residual * rate);
            residual -= quota;
            ScheduleRow {
                number,
                principal: quota,
                interest,
                installment: quota + interest,
                residual,
            }
        })
        .collect()
}

fn bullet(principal: Decimal, rate: Decimal, term: u32) -> Vec<ScheduleRow> {
    let interest = round2(principal * rate);
    (1..=term)
        .map(|number| {
            let last = number == term;
            let quota = if last { principal } else { Decimal::ZERO };
            ScheduleRow {
                number,
                principal: quota,
                interest,
                installment: quota + interest,
                residual: principal - quota,
            }
        })
        .collect()
}

/// One installment of a named instrument, as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRow {
    pub instrument_id: String,
    /// FINANCING or TAX_DEBT
    pub instrument_kind: String,
    pub period: u32,
    pub principal: Decimal,
    pub interest: Decimal,
    pub penalty: Decimal,
    pub installment: Decimal,
    pub residual: Decimal,
}

/// Per-instrument schedules of every financing and tax debt, placed on the plan horizon
pub fn instrument_rows(financings: &[Financing], tax_debts: &[TaxDebt]) -> Vec<InstrumentRow> {
    let mut rows = Vec::new();
    for financing in financings {
        for row in financing.schedule() {
            rows.push(InstrumentRow {
                instrument_id: financing.id.clone(),
                instrument_kind: "FINANCING".to_string(),
                period: financing.period_of(&row),
                principal: row.principal,
                interest: row.interest,
                penalty: Decimal::ZERO,
                installment: row.installment,
                residual: row.residual,
            });
        }
    }
    for debt in tax_debts {
        for row in debt.schedule() {
            rows.push(InstrumentRow {
                instrument_id: debt.id.clone(),
                instrument_kind: "TAX_DEBT".to_string(),
                period: row.period,
                principal: row.principal,
                interest: row.interest,
                penalty: row.penalty,
                installment: row.installment,
                residual: row.residual,
            });
        }
    }
    rows
}
