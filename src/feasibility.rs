//! Feasibility and sustainability checks on a computed plan
//!
//! - feasibility test: continuity value against liquidation value
//! - sustainability: monthly treasury surplus after settlement payments
//! - comparison: what each creditor class gets under either route

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::balances::{AssetItem, CreditorClass};
use crate::liquidation::LiquidationResult;
use crate::money::pct_of;
use crate::settlement::{class_outcomes, cumulative_payments, SettlementLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeasibilityBand {
    ClearlyPreferable,
    Preferable,
    Marginal,
    LiquidationPreferable,
}

impl FeasibilityBand {
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio >= dec!(1.2) {
            FeasibilityBand::ClearlyPreferable
        } else if ratio >= Decimal::ONE {
            FeasibilityBand::Preferable
        } else if ratio >= dec!(0.8) {
            FeasibilityBand::Marginal
        } else {
            FeasibilityBand::LiquidationPreferable
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FeasibilityBand::ClearlyPreferable => {
                "Settlement clearly preferable: creditors recover significantly more than in liquidation"
            }
            FeasibilityBand::Preferable => "Settlement preferable: creditors recover more than in liquidation",
            FeasibilityBand::Marginal => "Marginal: the plan recovers slightly less than liquidation",
            FeasibilityBand::LiquidationPreferable => "Liquidation preferable: creditors recover more in liquidation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityTest {
    /// Resources available under business continuity
    pub continuity_value: Decimal,
    /// Net realizable value in liquidation
    pub liquidation_value: Decimal,
    pub ratio: Decimal,
    pub band: FeasibilityBand,
}

/// Ratio of continuity-realizable value to liquidation net value
pub fn feasibility_test(assets: &[AssetItem], liquidation: &LiquidationResult) -> FeasibilityTest {
    let continuity_value: Decimal = assets.iter().map(|a| a.continuity_realizable()).sum();
    let liquidation_value = liquidation.net_realizable();
    let ratio = if liquidation_value > Decimal::ZERO {
        (continuity_value / liquidation_value).round_dp(4)
    } else {
        Decimal::ZERO
    };
    FeasibilityTest {
        continuity_value,
        liquidation_value,
        ratio,
        band: FeasibilityBand::from_ratio(ratio),
    }
}

/// Traffic light, declared from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SustainabilityStatus {
    /// No treasury data
    Grey,
    Green,
    Yellow,
    Red,
}

/// Thin-margin threshold on surplus over treasury balance
const THIN_MARGIN: Decimal = dec!(0.05);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityMonth {
    pub period: u32,
    pub treasury_balance: Decimal,
    pub payments: Decimal,
    pub cumulative_payments: Decimal,
    pub surplus: Decimal,
    pub status: SustainabilityStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityReport {
    pub months: Vec<SustainabilityMonth>,
    pub overall: SustainabilityStatus,
    pub first_red: Option<u32>,
    pub min_surplus: Option<Decimal>,
}

fn month_status(balance: Decimal, surplus: Decimal) -> SustainabilityStatus {
    if surplus < Decimal::ZERO {
        SustainabilityStatus::Red
    } else if balance > Decimal::ZERO && surplus / balance < THIN_MARGIN {
        SustainabilityStatus::Yellow
    } else {
        SustainabilityStatus::Green
    }
}

/// Surplus of the treasury balance over cumulative settlement payments
pub fn sustainability(treasury_balance: &[Decimal], settlement: &[SettlementLine]) -> SustainabilityReport {
    let cumulative = cumulative_payments(settlement, treasury_balance.len());
    let mut previous = Decimal::ZERO;
    let months: Vec<SustainabilityMonth> = treasury_balance
        .iter()
        .zip(cumulative)
        .enumerate()
        .map(|(period, (&balance, paid))| {
            let surplus = balance - paid;
            let month = SustainabilityMonth {
                period: period as u32,
                treasury_balance: balance,
                payments: paid - previous,
                cumulative_payments: paid,
                surplus,
                status: month_status(balance, surplus),
            };
            previous = paid;
            month
        })
        .collect();

    SustainabilityReport {
        overall: months
            .iter()
            .map(|m| m.status)
            .max()
            .unwrap_or(SustainabilityStatus::Grey),
        first_red: months
            .iter()
            .find(|m| m.status == SustainabilityStatus::Red)
            .map(|m| m.period),
        min_surplus: months.iter().map(|m| m.surplus).min(),
        months,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOutcome {
    SettlementPreferable,
    LiquidationPreferable,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassComparison {
    pub class: CreditorClass,
    pub credit: Decimal,
    pub liquidation_paid: Decimal,
    pub liquidation_pct: Decimal,
    pub settlement_paid: Decimal,
    pub settlement_pct: Decimal,
    pub delta_paid: Decimal,
    pub delta_pct: Decimal,
    pub settlement_better: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub classes: Vec<ClassComparison>,
    pub outcome: ComparisonOutcome,
}

/// Per-class recovery under liquidation versus the settlement plan
pub fn compare(liquidation: &LiquidationResult, settlement: &[SettlementLine]) -> Comparison {
    let outcomes = class_outcomes(settlement);
    let classes: Vec<ClassComparison> = CreditorClass::ALL
        .iter()
        .map(|&class| {
            let (credit, liquidation_paid, liquidation_pct) = liquidation
                .class(class)
                .map(|d| (d.credit, d.paid.total(), d.satisfaction_pct))
                .unwrap_or_default();
            let settlement_paid = outcomes
                .iter()
                .find(|o| o.class == class)
                .map(|o| o.paid)
                .unwrap_or(Decimal::ZERO);
            let settlement_pct = pct_of(settlement_paid, credit);
            ClassComparison {
                class,
                credit,
                liquidation_paid,
                liquidation_pct,
                settlement_paid,
                settlement_pct,
                delta_paid: settlement_paid - liquidation_paid,
                delta_pct: settlement_pct - liquidation_pct,
                settlement_better: settlement_paid >= liquidation_paid,
            }
        })
        .collect();

    let with_credit: Vec<&ClassComparison> = classes.iter().filter(|c| c.credit > Decimal::ZERO).collect();
    let outcome = if !with_credit.is_empty() && with_credit.iter().all(|c| c.settlement_better) {
        ComparisonOutcome::SettlementPreferable
    } else if with_credit.iter().all(|c| !c.settlement_better) {
        ComparisonOutcome::LiquidationPreferable
    } else {
        ComparisonOutcome::Mixed
    };
    Comparison { classes, outcome }
}
