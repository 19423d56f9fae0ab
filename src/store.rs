//! Persistence seam for computed rows
//!
//! Every write replaces the whole row set of a (scope, statement) pair. The
//! in-memory store swaps the new set in under a write lock, so readers see
//! either the previous set or the new one, never a mix.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::amortization::InstrumentRow;
use crate::error::{PlanError, PlanResult};
use crate::liquidation::LiquidationLine;
use crate::settlement::SettlementLine;
use crate::statement::ProjectionRow;

/// A (case, scenario) pair; runs on different scopes share nothing
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub case_id: String,
    pub scenario_id: String,
}

impl Scope {
    pub fn new(case_id: impl Into<String>, scenario_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            scenario_id: scenario_id.into(),
        }
    }

    /// The base scenario of a case
    pub fn base(case_id: impl Into<String>) -> Self {
        Self::new(case_id, "base")
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.case_id, self.scenario_id)
    }
}

/// Period-indexed statements persisted as projection rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Statement {
    Auxiliary,
    Ce,
    Sp,
    Cflow,
    Banca,
}

impl Statement {
    pub const ALL: [Statement; 5] = [
        Statement::Auxiliary,
        Statement::Ce,
        Statement::Sp,
        Statement::Cflow,
        Statement::Banca,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Statement::Auxiliary => "auxiliary",
            Statement::Ce => "ce",
            Statement::Sp => "sp",
            Statement::Cflow => "cflow",
            Statement::Banca => "banca",
        }
    }
}

/// Write and read contract for computed results
pub trait ProjectionStore: Send + Sync {
    /// Replace every row of `statement` for `scope`
    fn replace_rows(&self, scope: &Scope, statement: Statement, rows: Vec<ProjectionRow>) -> PlanResult<()>;
    fn rows(&self, scope: &Scope, statement: Statement) -> PlanResult<Vec<ProjectionRow>>;

    fn replace_liquidation(&self, scope: &Scope, lines: Vec<LiquidationLine>) -> PlanResult<()>;
    fn liquidation(&self, scope: &Scope) -> PlanResult<Vec<LiquidationLine>>;

    fn replace_settlement(&self, scope: &Scope, lines: Vec<SettlementLine>) -> PlanResult<()>;
    fn settlement(&self, scope: &Scope) -> PlanResult<Vec<SettlementLine>>;

    fn replace_instruments(&self, scope: &Scope, rows: Vec<InstrumentRow>) -> PlanResult<()>;
    fn instruments(&self, scope: &Scope) -> PlanResult<Vec<InstrumentRow>>;
}

/// Row sets keyed by `K`, each swapped in whole
struct Table<K, T> {
    sets: RwLock<HashMap<K, Arc<Vec<T>>>>,
}

impl<K: Eq + Hash, T: Clone> Table<K, T> {
    fn new() -> Self {
        Self {
            sets: RwLock::new(HashMap::new()),
        }
    }

    fn replace(&self, key: K, rows: Vec<T>) -> PlanResult<()> {
        let mut sets = self
            .sets
            .write()
            .map_err(|_| PlanError::Store("row table lock poisoned".to_string()))?;
        sets.insert(key, Arc::new(rows));
        Ok(())
    }

    fn get(&self, key: &K) -> PlanResult<Vec<T>> {
        let sets = self
            .sets
            .read()
            .map_err(|_| PlanError::Store("row table lock poisoned".to_string()))?;
        Ok(sets.get(key).map(|rows| rows.as_ref().clone()).unwrap_or_default())
    }
}

/// Thread-safe in-memory store
pub struct MemoryStore {
    projections: Table<(Scope, Statement), ProjectionRow>,
    liquidation: Table<Scope, LiquidationLine>,
    settlement: Table<Scope, SettlementLine>,
    instruments: Table<Scope, InstrumentRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            projections: Table::new(),
            liquidation: Table::new(),
            settlement: Table::new(),
            instruments: Table::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A row set must hold at most one amount per (period, line)
fn check_unique(scope: &Scope, statement: Statement, rows: &[ProjectionRow]) -> PlanResult<()> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        if !seen.insert((row.period, row.line_code.as_str())) {
            return Err(PlanError::Store(format!(
                "duplicate {} row for {} period {} line {}",
                statement.name(),
                scope,
                row.period,
                row.line_code
            )));
        }
    }
    Ok(())
}

impl ProjectionStore for MemoryStore {
    fn replace_rows(&self, scope: &Scope, statement: Statement, rows: Vec<ProjectionRow>) -> PlanResult<()> {
        check_unique(scope, statement, &rows)?;
        self.projections.replace((scope.clone(), statement), rows)
    }

    fn rows(&self, scope: &Scope, statement: Statement) -> PlanResult<Vec<ProjectionRow>> {
        self.projections.get(&(scope.clone(), statement))
    }

    fn replace_liquidation(&self, scope: &Scope, lines: Vec<LiquidationLine>) -> PlanResult<()> {
        self.liquidation.replace(scope.clone(), lines)
    }

    fn liquidation(&self, scope: &Scope) -> PlanResult<Vec<LiquidationLine>> {
        self.liquidation.get(scope)
    }

    fn replace_settlement(&self, scope: &Scope, lines: Vec<SettlementLine>) -> PlanResult<()> {
        self.settlement.replace(scope.clone(), lines)
    }

    fn settlement(&self, scope: &Scope) -> PlanResult<Vec<SettlementLine>> {
        self.settlement.get(scope)
    }

    fn replace_instruments(&self, scope: &Scope, rows: Vec<InstrumentRow>) -> PlanResult<()> {
        self.instruments.replace(scope.clone(), rows)
    }

    fn instruments(&self, scope: &Scope) -> PlanResult<Vec<InstrumentRow>> {
        self.instruments.get(scope)
    }
}

/// Write any row set as CSV with a header row
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> PlanResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
