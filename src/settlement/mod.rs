//! Settlement (concordato) distributor
//!
//! Each class is offered a share of its admitted credit, paid in a lump sum
//! or in installments over its window. Month by month, classes are served in
//! priority order out of the cash the treasury projection leaves available.

mod schedule;

pub use schedule::{plan_class, ClassSchedule, PaymentMode, PlannedClass};

use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::balances::CreditorClass;
use crate::money::pct_of;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementParams {
    pub classes: Vec<ClassSchedule>,
    /// Cap payments at the cash available in the treasury projection
    pub cash_constrained: bool,
}

impl Default for SettlementParams {
    fn default() -> Self {
        Self {
            classes: ClassSchedule::defaults(),
            cash_constrained: true,
        }
    }
}

/// One class in one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementLine {
    pub period: u32,
    pub creditor_class: CreditorClass,
    pub opening_debt: Decimal,
    pub proposed_payment: Decimal,
    pub planned_installment: Decimal,
    pub payment: Decimal,
    pub cumulative_paid: Decimal,
    pub residual_debt: Decimal,
    /// Percent of the admitted credit paid so far
    pub satisfaction_pct: Decimal,
}

/// Final position of one class at the end of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassOutcome {
    pub class: CreditorClass,
    pub credit: Decimal,
    pub proposed_payment: Decimal,
    pub paid: Decimal,
    pub satisfaction_pct: Decimal,
}

/// Distribute the settlement month by month.
///
/// `treasury_balance` is the Banca running balance per period; the cash
/// available in a month is that balance less everything already paid to
/// creditors in earlier months. Without cash constraints it is ignored.
pub fn distribute(
    claims: &BTreeMap<CreditorClass, Decimal>,
    params: &SettlementParams,
    treasury_balance: &[Decimal],
    duration: usize,
) -> Vec<SettlementLine> {
    let mut plans: Vec<PlannedClass> = params
        .classes
        .iter()
        .map(|schedule| {
            let credit = claims.get(&schedule.class).copied().unwrap_or(Decimal::ZERO).abs();
            plan_class(schedule, credit, duration)
        })
        .collect();
    plans.sort_by_key(|plan| plan.priority);

    let mut cumulative: Vec<Decimal> = vec![Decimal::ZERO; plans.len()];
    let mut paid_before = Decimal::ZERO;
    let mut lines = Vec::with_capacity(duration * plans.len());

    for period in 0..duration {
        let mut cash = if params.cash_constrained {
            let balance = treasury_balance.get(period).copied().unwrap_or(Decimal::ZERO);
            Some((balance - paid_before).max(Decimal::ZERO))
        } else {
            None
        };
        let mut paid_this_month = Decimal::ZERO;

        for (plan, cumulative_paid) in plans.iter().zip(cumulative.iter_mut()) {
            let opening_debt = plan.credit - *cumulative_paid;
            let planned_installment = plan.planned_at(period as u32);
            let mut payment = planned_installment
                .min(opening_debt)
                .min(plan.proposed_payment - *cumulative_paid)
                .max(Decimal::ZERO);
            if let Some(available) = cash.as_mut() {
                payment = payment.min(*available);
                *available -= payment;
            }
            *cumulative_paid += payment;
            paid_this_month += payment;

            lines.push(SettlementLine {
                period: period as u32,
                creditor_class: plan.class,
                opening_debt,
                proposed_payment: plan.proposed_payment,
                planned_installment,
                payment,
                cumulative_paid: *cumulative_paid,
                residual_debt: opening_debt - payment,
                satisfaction_pct: pct_of(*cumulative_paid, plan.credit),
            });
        }
        paid_before += paid_this_month;
    }

    info!(
        "Settlement: {} classes over {} periods, {} paid",
        plans.len(),
        duration,
        paid_before
    );
    lines
}

/// Total paid to creditors up to and including each period
pub fn cumulative_payments(lines: &[SettlementLine], duration: usize) -> Vec<Decimal> {
    let mut per_period = vec![Decimal::ZERO; duration];
    for line in lines {
        if let Some(amount) = per_period.get_mut(line.period as usize) {
            *amount += line.payment;
        }
    }
    let mut running = Decimal::ZERO;
    per_period
        .into_iter()
        .map(|amount| {
            running += amount;
            running
        })
        .collect()
}

/// Last line of every class
pub fn class_outcomes(lines: &[SettlementLine]) -> Vec<ClassOutcome> {
    let mut last: BTreeMap<CreditorClass, &SettlementLine> = BTreeMap::new();
    for line in lines {
        last.insert(line.creditor_class, line);
    }
    last.into_values()
        .map(|line| {
            let credit = line.cumulative_paid + line.residual_debt;
            ClassOutcome {
                class: line.creditor_class,
                credit,
                proposed_payment: line.proposed_payment,
                paid: line.cumulative_paid,
                satisfaction_pct: line.satisfaction_pct,
            }
        })
        .collect()
}
