//! Orchestration of a (case, scenario) run
//!
//! Every stage is an idempotent entry point: it loads its inputs, reads the
//! persisted output of the stages it depends on, recomputes and replaces its
//! own rows. `run_full_pipeline` chains them in dependency order.

use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::amortization::instrument_rows;
use crate::auxiliary::{build_auxiliary, AuxiliaryTable};
use crate::balances::claims_by_class;
use crate::error::PlanResult;
use crate::feasibility::{
    compare, feasibility_test, sustainability, Comparison, FeasibilityTest, SustainabilityReport,
};
use crate::inputs::{InputSource, ResolvedInputs};
use crate::liquidation::{liquidate, LiquidationResult};
use crate::projection::{
    converge, net_financial_position, project_banca, project_ce, project_cflow, project_sp, BancaLine,
    BancaTable, CeTable, ConvergenceConfig, ConvergenceResult, OpeningPosition, SpTable,
};
use crate::settlement::{distribute, SettlementLine};
use crate::statement::{StatementLine, StatementTable};
use crate::store::{ProjectionStore, Scope, Statement};
use crate::timeline::Timeline;

/// Engine-wide settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub convergence: ConvergenceConfig,
}

/// Checks run on a computed plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAssessment {
    pub feasibility: FeasibilityTest,
    pub sustainability: SustainabilityReport,
    pub comparison: Comparison,
    /// Net financial position per period
    pub net_financial_position: Vec<Decimal>,
}

/// Outcome of a full pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub scope: Scope,
    pub convergence: ConvergenceResult,
    pub assessment: PlanAssessment,
}

/// Runs the plan stages against an input source and a store
#[derive(Clone)]
pub struct PlanEngine {
    inputs: Arc<dyn InputSource>,
    store: Arc<dyn ProjectionStore>,
    config: EngineConfig,
}

impl PlanEngine {
    pub fn new(inputs: Arc<dyn InputSource>, store: Arc<dyn ProjectionStore>, config: EngineConfig) -> Self {
        Self { inputs, store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn ProjectionStore> {
        &self.store
    }

    fn load(&self, scope: &Scope) -> PlanResult<(ResolvedInputs, Timeline)> {
        let inputs = ResolvedInputs::resolve(scope, self.inputs.inputs(scope)?);
        let timeline = inputs.assumptions.timeline()?;
        Ok((inputs, timeline))
    }

    fn read_table<L: StatementLine>(
        &self,
        scope: &Scope,
        statement: Statement,
        duration: usize,
    ) -> PlanResult<StatementTable<L>> {
        let rows = self.store.rows(scope, statement)?;
        Ok(StatementTable::from_rows(&rows, duration))
    }

    fn write_table<L: StatementLine>(
        &self,
        scope: &Scope,
        statement: Statement,
        table: &StatementTable<L>,
    ) -> PlanResult<usize> {
        let rows = table.to_rows();
        let count = rows.len();
        self.store.replace_rows(scope, statement, rows)?;
        info!("{}: wrote {} {} rows", scope, count, statement.name());
        Ok(count)
    }

    /// Auxiliary series and per-instrument schedules
    pub fn compute_auxiliary(&self, scope: &Scope) -> PlanResult<usize> {
        let (inputs, _) = self.load(scope)?;
        let assumptions = &inputs.assumptions;
        let table = build_auxiliary(assumptions);
        let instruments = instrument_rows(&assumptions.financings, &assumptions.tax_debts);
        self.store.replace_instruments(scope, instruments)?;
        self.write_table(scope, Statement::Auxiliary, &table)
    }

    pub fn compute_ce(&self, scope: &Scope) -> PlanResult<usize> {
        let (inputs, timeline) = self.load(scope)?;
        let aux: AuxiliaryTable = self.read_table(scope, Statement::Auxiliary, timeline.len())?;
        let ce = project_ce(&timeline, &inputs.opening, &inputs.assumptions, &aux, None);
        self.write_table(scope, Statement::Ce, &ce)
    }

    pub fn compute_sp(&self, scope: &Scope) -> PlanResult<usize> {
        let (inputs, timeline) = self.load(scope)?;
        let aux: AuxiliaryTable = self.read_table(scope, Statement::Auxiliary, timeline.len())?;
        let ce: CeTable = self.read_table(scope, Statement::Ce, timeline.len())?;
        let sp = project_sp(&timeline, &inputs.opening, &inputs.assumptions, &ce, &aux);
        self.write_table(scope, Statement::Sp, &sp)
    }

    pub fn compute_cflow(&self, scope: &Scope) -> PlanResult<usize> {
        let (inputs, timeline) = self.load(scope)?;
        let ce: CeTable = self.read_table(scope, Statement::Ce, timeline.len())?;
        let sp: SpTable = self.read_table(scope, Statement::Sp, timeline.len())?;
        let position = OpeningPosition::from_balances(&inputs.opening, &inputs.assumptions.balance_drivers);
        let cflow = project_cflow(&position, &ce, &sp);
        self.write_table(scope, Statement::Cflow, &cflow)
    }

    pub fn compute_banca(&self, scope: &Scope) -> PlanResult<usize> {
        let (inputs, timeline) = self.load(scope)?;
        let aux: AuxiliaryTable = self.read_table(scope, Statement::Auxiliary, timeline.len())?;
        let ce: CeTable = self.read_table(scope, Statement::Ce, timeline.len())?;
        let position = OpeningPosition::from_balances(&inputs.opening, &inputs.assumptions.balance_drivers);
        let banca = project_banca(&position, &inputs.assumptions, &ce, &aux);
        self.write_table(scope, Statement::Banca, &banca)
    }

    /// CE→SP→CFlow→Banca until SP cash and Banca balance agree; persists the final pass
    pub fn run_convergence(&self, scope: &Scope) -> PlanResult<ConvergenceResult> {
        let (inputs, timeline) = self.load(scope)?;
        let aux: AuxiliaryTable = self.read_table(scope, Statement::Auxiliary, timeline.len())?;
        let (projections, result) = converge(
            &timeline,
            &inputs.opening,
            &inputs.assumptions,
            &aux,
            &self.config.convergence,
        );
        self.write_table(scope, Statement::Ce, &projections.ce)?;
        self.write_table(scope, Statement::Sp, &projections.sp)?;
        self.write_table(scope, Statement::Cflow, &projections.cflow)?;
        self.write_table(scope, Statement::Banca, &projections.banca)?;
        info!(
            "{}: convergence {} after {} iterations, max delta {}",
            scope,
            if result.converged { "reached" } else { "not reached" },
            result.iterations,
            result.max_delta
        );
        Ok(result)
    }

    pub fn compute_liquidation(&self, scope: &Scope) -> PlanResult<LiquidationResult> {
        let (inputs, _) = self.load(scope)?;
        let result = liquidate(
            &inputs.assets,
            &claims_by_class(&inputs.liabilities),
            &inputs.assumptions.liquidation,
        );
        self.store.replace_liquidation(scope, result.to_lines())?;
        Ok(result)
    }

    /// Monthly distribution out of the persisted treasury balance
    pub fn compute_settlement(&self, scope: &Scope) -> PlanResult<Vec<SettlementLine>> {
        let (inputs, timeline) = self.load(scope)?;
        let banca: BancaTable = self.read_table(scope, Statement::Banca, timeline.len())?;
        let lines = distribute(
            &claims_by_class(&inputs.liabilities),
            &inputs.assumptions.settlement,
            &banca.series(BancaLine::RunningBalance),
            timeline.len(),
        );
        self.store.replace_settlement(scope, lines.clone())?;
        info!("{}: wrote {} settlement rows", scope, lines.len());
        Ok(lines)
    }

    /// Feasibility, sustainability, comparison and PFN from persisted results
    pub fn assess(&self, scope: &Scope) -> PlanResult<PlanAssessment> {
        let (inputs, timeline) = self.load(scope)?;
        let liquidation = liquidate(
            &inputs.assets,
            &claims_by_class(&inputs.liabilities),
            &inputs.assumptions.liquidation,
        );
        let settlement = self.store.settlement(scope)?;
        let banca: BancaTable = self.read_table(scope, Statement::Banca, timeline.len())?;
        let sp: SpTable = self.read_table(scope, Statement::Sp, timeline.len())?;

        let assessment = PlanAssessment {
            feasibility: feasibility_test(&inputs.assets, &liquidation),
            sustainability: sustainability(&banca.series(BancaLine::RunningBalance), &settlement),
            comparison: compare(&liquidation, &settlement),
            net_financial_position: net_financial_position(&sp),
        };
        info!(
            "{}: feasibility ratio {} ({:?}), sustainability {:?}",
            scope, assessment.feasibility.ratio, assessment.feasibility.band, assessment.sustainability.overall
        );
        Ok(assessment)
    }

    /// Every stage in dependency order
    pub fn run_full_pipeline(&self, scope: &Scope) -> PlanResult<PipelineReport> {
        info!("{}: running full pipeline", scope);
        self.compute_auxiliary(scope)?;
        let convergence = self.run_convergence(scope)?;
        self.compute_liquidation(scope)?;
        self.compute_settlement(scope)?;
        let assessment = self.assess(scope)?;
        Ok(PipelineReport {
            scope: scope.clone(),
            convergence,
            assessment,
        })
    }
}
