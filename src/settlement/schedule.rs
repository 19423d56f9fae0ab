//! Per-class payment schedules of a settlement proposal

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::balances::CreditorClass;
use crate::money::{round2, split_even};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    /// Equal monthly installments across the window
    #[default]
    Installments,
    /// Single payment at the start of the window
    LumpSum,
}

/// Proposal terms for one creditor class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSchedule {
    pub class: CreditorClass,
    /// Fraction of the admitted credit offered
    pub proposed_rate: Decimal,
    pub start_period: u32,
    /// Last payment period (inclusive), clamped to the horizon
    pub end_period: u32,
    #[serde(default)]
    pub mode: PaymentMode,
    /// Lower ranks are paid first when cash is short
    pub priority: u32,
}

impl ClassSchedule {
    /// Statutory defaults for the four classes
    pub fn defaults() -> Vec<ClassSchedule> {
        vec![
            ClassSchedule {
                class: CreditorClass::PreDeduction,
                proposed_rate: dec!(1.00),
                start_period: 0,
                end_period: 23,
                mode: PaymentMode::Installments,
                priority: 0,
            },
            ClassSchedule {
                class: CreditorClass::MortgageSecured,
                proposed_rate: dec!(1.00),
                start_period: 12,
                end_period: 84,
                mode: PaymentMode::Installments,
                priority: 1,
            },
            ClassSchedule {
                class: CreditorClass::Privileged,
                proposed_rate: dec!(0.80),
                start_period: 12,
                end_period: 84,
                mode: PaymentMode::Installments,
                priority: 2,
            },
            ClassSchedule {
                class: CreditorClass::Unsecured,
                proposed_rate: dec!(0.20),
                start_period: 24,
                end_period: 119,
                mode: PaymentMode::Installments,
                priority: 3,
            },
        ]
    }
}

/// A class schedule resolved against its admitted credit
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedClass {
    pub class: CreditorClass,
    pub priority: u32,
    pub credit: Decimal,
    pub proposed_payment: Decimal,
    /// Base installment before the rounding adjustment on the last one
    pub installment: Decimal,
    pub planned: BTreeMap<u32, Decimal>,
}

impl PlannedClass {
    pub fn planned_at(&self, period: u32) -> Decimal {
        self.planned.get(&period).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Spread the proposed payment over the class window
pub fn plan_class(schedule: &ClassSchedule, credit: Decimal, duration: usize) -> PlannedClass {
    let proposed_payment = round2(credit * schedule.proposed_rate);
    let start = schedule.start_period;
    let end = schedule.end_period.min((duration as u32).saturating_sub(1));
    let mut planned = BTreeMap::new();
    let mut installment = Decimal::ZERO;

    if proposed_payment > Decimal::ZERO && duration > 0 && start <= end {
        match schedule.mode {
            PaymentMode::LumpSum => {
                planned.insert(start, proposed_payment);
                installment = proposed_payment;
            }
            PaymentMode::Installments => {
                let quotas = split_even(proposed_payment, (end - start + 1) as usize);
                installment = quotas.first().copied().unwrap_or(Decimal::ZERO);
                planned.extend((start..=end).zip(quotas));
            }
        }
    }

    PlannedClass {
        class: schedule.class,
        priority: schedule.priority,
        credit,
        proposed_payment,
        installment,
        planned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsecured(mode: PaymentMode, end_period: u32) -> ClassSchedule {
        ClassSchedule {
            class: CreditorClass::Unsecured,
            proposed_rate: dec!(0.20),
            start_period: 24,
            end_period,
            mode,
            priority: 3,
        }
    }

    #[test]
    fn test_installments_remainder_on_last() {
        let plan = plan_class(&unsecured(PaymentMode::Installments, 119), dec!(100000), 120);
        assert_eq!(plan.proposed_payment, dec!(20000));
        assert_eq!(plan.installment, dec!(208.33));
        assert_eq!(plan.planned.len(), 96);
        assert_eq!(plan.planned_at(24), dec!(208.33));
        assert_eq!(plan.planned_at(119), dec!(208.65));
        assert_eq!(plan.planned_at(23), Decimal::ZERO);
        assert_eq!(plan.planned.values().copied().sum::<Decimal>(), dec!(20000));
    }

    #[test]
    fn test_lump_sum_and_window_clamp() {
        let plan = plan_class(&unsecured(PaymentMode::LumpSum, 200), dec!(50000), 60);
        assert_eq!(plan.planned.len(), 1);
        assert_eq!(plan.planned_at(24), dec!(10000));

        let clamped = plan_class(&unsecured(PaymentMode::Installments, 200), dec!(50000), 60);
        assert_eq!(clamped.planned.len(), 36);
        assert_eq!(clamped.planned.keys().last(), Some(&59));
    }

    #[test]
    fn test_window_past_horizon_plans_nothing() {
        let plan = plan_class(&unsecured(PaymentMode::Installments, 119), dec!(100000), 12);
        assert!(plan.planned.is_empty());
        assert_eq!(plan.proposed_payment, dec!(20000));
    }
}
