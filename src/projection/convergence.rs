//! SP↔Banca convergence loop
//!
//! Runs CE→SP→CFlow→Banca, compares the balance-sheet cash with the treasury
//! balance and, while they disagree beyond the threshold, re-runs the chain
//! with interest recomputed on the projected long-term debt. The loop is
//! bounded and reports non-convergence instead of failing.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::banca::{project_banca, BancaTable};
use super::ce::{project_ce, CeTable, InterestOverride};
use super::cflow::{project_cflow, CflowTable};
use super::lines::{BancaLine, SpLine};
use super::opening::OpeningPosition;
use super::sp::{project_sp, SpTable};
use crate::assumptions::Assumptions;
use crate::auxiliary::AuxiliaryTable;
use crate::balances::OpeningBalances;
use crate::money::{monthly_rate, round2};
use crate::timeline::Timeline;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvergenceConfig {
    /// Largest tolerated |SP cash − Banca balance| in any period
    pub threshold: Decimal,
    pub max_iterations: u32,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            threshold: dec!(100),
            max_iterations: 5,
        }
    }
}

/// Diagnostic outcome of the loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceResult {
    pub iterations: u32,
    pub max_delta: Decimal,
    pub converged: bool,
    pub threshold: Decimal,
    /// Max delta observed after each iteration
    pub delta_history: Vec<Decimal>,
}

/// The four statements of one projection pass
#[derive(Debug, Clone, PartialEq)]
pub struct Projections {
    pub ce: CeTable,
    pub sp: SpTable,
    pub cflow: CflowTable,
    pub banca: BancaTable,
}

impl Projections {
    /// Run CE→SP→CFlow→Banca once
    pub fn project(
        timeline: &Timeline,
        opening: &OpeningBalances,
        assumptions: &Assumptions,
        aux: &AuxiliaryTable,
        interest_override: Option<&InterestOverride>,
    ) -> Self {
        let position = OpeningPosition::from_balances(opening, &assumptions.balance_drivers);
        let ce = project_ce(timeline, opening, assumptions, aux, interest_override);
        let sp = project_sp(timeline, opening, assumptions, &ce, aux);
        let cflow = project_cflow(&position, &ce, &sp);
        let banca = project_banca(&position, assumptions, &ce, aux);
        Self { ce, sp, cflow, banca }
    }

    /// Per-period |SP cash − Banca running balance|
    pub fn cash_deltas(&self) -> Vec<Decimal> {
        (0..self.sp.len())
            .map(|p| (self.sp.get(p, SpLine::Cash) - self.banca.get(p, BancaLine::RunningBalance)).abs())
            .collect()
    }

    pub fn max_delta(&self) -> Decimal {
        self.cash_deltas().into_iter().max().unwrap_or(Decimal::ZERO)
    }

    /// Monthly interest on the projected long-term debt
    pub fn interest_override(&self, annual_rate: Decimal) -> InterestOverride {
        (0..self.sp.len())
            .map(|p| {
                let debt = self.sp.get(p, SpLine::LongTermDebt).abs();
                (p as u32, round2(debt * monthly_rate(annual_rate)))
            })
            .collect()
    }
}

/// Iterate until SP cash and Banca balance agree or the cap is reached
pub fn converge(
    timeline: &Timeline,
    opening: &OpeningBalances,
    assumptions: &Assumptions,
    aux: &AuxiliaryTable,
    config: &ConvergenceConfig,
) -> (Projections, ConvergenceResult) {
    let max_iterations = config.max_iterations.max(1);
    let mut projections = Projections::project(timeline, opening, assumptions, aux, None);
    let mut history = vec![projections.max_delta()];
    debug!("Convergence iteration 1: max delta {}", history[0]);

    while history.len() < max_iterations as usize && history[history.len() - 1] > config.threshold {
        let interest = projections.interest_override(assumptions.balance_drivers.debt_interest_rate);
        let next = Projections::project(timeline, opening, assumptions, aux, Some(&interest));
        let delta = next.max_delta();
        history.push(delta);
        debug!("Convergence iteration {}: max delta {}", history.len(), delta);
        if next == projections {
            debug!("Convergence reached a fixed point, stopping");
            break;
        }
        projections = next;
    }

    let max_delta = history.last().copied().unwrap_or(Decimal::ZERO);
    let converged = max_delta <= config.threshold;
    if !converged {
        warn!(
            "SP and Banca did not converge after {} iterations: max delta {} above {}",
            history.len(),
            max_delta,
            config.threshold
        );
    }
    let result = ConvergenceResult {
        iterations: history.len() as u32,
        max_delta,
        converged,
        threshold: config.threshold,
        delta_history: history,
    };
    (projections, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::TaxDebt;
    use crate::auxiliary::build_auxiliary;
    use crate::balances::{BalanceRecord, StatementKind};
    use crate::projection::lines::CeLine;

    fn record(statement: StatementKind, code: &str, amount: Decimal) -> BalanceRecord {
        BalanceRecord { statement, code: code.to_string(), description: String::new(), amount }
    }

    fn opening() -> OpeningBalances {
        OpeningBalances::new(vec![
            record(StatementKind::Ce, "REVENUE", dec!(600000)),
            record(StatementKind::Ce, "PERSONNEL", dec!(360000)),
            record(StatementKind::Sp, "CASH", dec!(80000)),
            record(StatementKind::Sp, "SHARE_CAPITAL", dec!(50000)),
            record(StatementKind::Sp, "RESERVES", dec!(30000)),
        ])
    }

    /// No VAT and no working capital: both ledgers see the same cash
    fn cash_basis_plan() -> Assumptions {
        let mut a = Assumptions::default();
        a.plan.duration_months = 24;
        a.plan.sales_vat_rate = Decimal::ZERO;
        a.plan.purchase_vat_rate = Decimal::ZERO;
        a.balance_drivers.dso = Decimal::ZERO;
        a.balance_drivers.dpo = Decimal::ZERO;
        a.balance_drivers.dio = Decimal::ZERO;
        a
    }

    fn run(a: &Assumptions, opening: &OpeningBalances, config: &ConvergenceConfig) -> (Projections, ConvergenceResult) {
        let timeline = a.timeline().unwrap();
        let aux = build_auxiliary(a);
        converge(&timeline, opening, a, &aux, config)
    }

    #[test]
    fn test_converges_first_pass_on_cash_basis() {
        let (projections, result) = run(&cash_basis_plan(), &opening(), &ConvergenceConfig::default());
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.max_delta, Decimal::ZERO);
        assert_eq!(
            projections.sp.get(23, SpLine::Cash),
            projections.banca.get(23, BancaLine::RunningBalance)
        );
    }

    #[test]
    fn test_stops_at_iteration_cap() {
        let mut a = Assumptions::default();
        a.plan.duration_months = 24;
        let mut records = opening().records().to_vec();
        records.push(record(StatementKind::Ce, "FINANCIAL_CHARGES", dec!(12000)));
        records.push(record(StatementKind::Sp, "DEBTS", dec!(-100000)));
        let opening = OpeningBalances::new(records);
        let config = ConvergenceConfig { threshold: dec!(100), max_iterations: 2 };
        let (_, result) = run(&a, &opening, &config);
        // receivables of 100,000 tie up cash the treasury never sees
        assert!(!result.converged);
        assert_eq!(result.iterations, 2);
        assert_eq!(result.delta_history.len(), 2);
        assert!(result.max_delta > dec!(100));
    }

    #[test]
    fn test_stops_when_pass_repeats() {
        let mut a = Assumptions::default();
        a.plan.duration_months = 24;
        // no debt: the recomputed interest equals the driven one
        let (_, result) = run(&a, &opening(), &ConvergenceConfig::default());
        assert!(!result.converged);
        assert_eq!(result.iterations, 2);
        assert_eq!(result.delta_history[0], result.delta_history[1]);
    }

    #[test]
    fn test_tax_debt_charges_survive_iterations() {
        let mut a = Assumptions::default();
        a.plan.duration_months = 12;
        a.balance_drivers.debt_interest_rate = Decimal::ZERO;
        a.tax_debts.push(TaxDebt {
            id: "IRES-2022".to_string(),
            description: String::new(),
            principal: dec!(12000),
            annual_rate: dec!(0.06),
            penalties: dec!(1200),
            installments: 12,
            start_period: 0,
        });
        let (projections, result) = run(&a, &opening(), &ConvergenceConfig::default());
        assert!(result.iterations >= 2);
        assert_eq!(projections.ce.get(0, CeLine::FinancialCharges), dec!(-160));
        let paid: Decimal = projections.banca.series(BancaLine::FinancialChargePayments).iter().copied().sum();
        // 390 interest on the declining balance plus 1,200 penalties
        assert_eq!(paid, dec!(1590));
    }

    #[test]
    fn test_override_follows_long_term_debt() {
        let mut a = cash_basis_plan();
        a.balance_drivers.debt_interest_rate = dec!(0.06);
        let mut records = opening().records().to_vec();
        records.push(record(StatementKind::Sp, "DEBTS", dec!(-100000)));
        records.push(record(StatementKind::Sp, "TANGIBLE_ASSETS", dec!(100000)));
        let opening = OpeningBalances::new(records);
        let timeline = a.timeline().unwrap();
        let aux = build_auxiliary(&a);
        let first = Projections::project(&timeline, &opening, &a, &aux, None);
        let interest = first.interest_override(dec!(0.06));
        // 60% of 100,000 long-term at 0.5% a month
        assert_eq!(interest.get(&0), Some(&dec!(300)));
        let second = Projections::project(&timeline, &opening, &a, &aux, Some(&interest));
        assert_eq!(second.ce.get(0, CeLine::FinancialCharges), dec!(-300));
    }

    #[test]
    fn test_zero_cap_still_runs_once() {
        let config = ConvergenceConfig { threshold: dec!(100), max_iterations: 0 };
        let (_, result) = run(&cash_basis_plan(), &opening(), &config);
        assert_eq!(result.iterations, 1);
    }
}
