//! Scenario runner for batch plan runs
//!
//! Holds in-memory inputs and results for many (case, scenario) scopes and
//! runs the full pipeline for each of them in parallel. Scopes share
//! nothing, so they never contend for the same rows.

use rayon::prelude::*;
use std::sync::Arc;

use crate::assumptions::{Assumptions, PlanInputs};
use crate::error::PlanResult;
use crate::inputs::{InputSource, MemoryInputs};
use crate::pipeline::{EngineConfig, PipelineReport, PlanEngine};
use crate::store::{MemoryStore, Scope};

/// In-memory batch runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(EngineConfig::default());
/// runner.add_scope(Scope::base("case-1"), inputs)?;
/// runner.add_variant(&Scope::base("case-1"), "no-rent", |a| a.rent.annual_fee = Decimal::ZERO)?;
/// let reports = runner.run_all()?;
/// ```
pub struct ScenarioRunner {
    inputs: Arc<MemoryInputs>,
    store: Arc<MemoryStore>,
    engine: PlanEngine,
}

impl ScenarioRunner {
    pub fn new(config: EngineConfig) -> Self {
        let inputs = Arc::new(MemoryInputs::new());
        let store = Arc::new(MemoryStore::new());
        let engine = PlanEngine::new(inputs.clone(), store.clone(), config);
        Self { inputs, store, engine }
    }

    pub fn add_scope(&self, scope: Scope, inputs: PlanInputs) -> PlanResult<()> {
        self.inputs.insert(scope, inputs)
    }

    /// Copy the inputs of `base` into a new scenario of the same case with adjusted assumptions
    pub fn add_variant(
        &self,
        base: &Scope,
        scenario_id: &str,
        adjust: impl FnOnce(&mut Assumptions),
    ) -> PlanResult<Scope> {
        let mut inputs = self.inputs.inputs(base)?;
        let mut assumptions = inputs.assumptions.take().unwrap_or_default();
        adjust(&mut assumptions);
        inputs.assumptions = Some(assumptions);
        let scope = Scope::new(base.case_id.clone(), scenario_id);
        self.inputs.insert(scope.clone(), inputs)?;
        Ok(scope)
    }

    pub fn run(&self, scope: &Scope) -> PlanResult<PipelineReport> {
        self.engine.run_full_pipeline(scope)
    }

    /// Run the given scopes in parallel; results keep the order of `scopes`
    pub fn run_batch(&self, scopes: &[Scope]) -> Vec<PlanResult<PipelineReport>> {
        scopes
            .par_iter()
            .map(|scope| self.engine.run_full_pipeline(scope))
            .collect()
    }

    /// Run every registered scope
    pub fn run_all(&self) -> PlanResult<Vec<PlanResult<PipelineReport>>> {
        let scopes = self.inputs.scopes()?;
        Ok(self.run_batch(&scopes))
    }

    pub fn engine(&self) -> &PlanEngine {
        &self.engine
    }

    /// Results of every run so far
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
