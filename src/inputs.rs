//! Read contract for the inputs of a (case, scenario)

use log::warn;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::assumptions::{Assumptions, PlanInputs};
use crate::balances::{seed_asset_items, seed_liability_items, AssetItem, LiabilityItem, OpeningBalances};
use crate::error::{PlanError, PlanResult};
use crate::store::Scope;

/// Source of opening balances, registers and assumptions
pub trait InputSource: Send + Sync {
    /// Whatever is on record for `scope`; absent parts are `None` or empty
    fn inputs(&self, scope: &Scope) -> PlanResult<PlanInputs>;
}

/// Inputs of one run with every gap filled.
///
/// Missing assumptions and balances fall back to defaults so a plan can be
/// explored before its data is complete; registers are seeded from the
/// opening balance sheet when none were supplied.
#[derive(Debug, Clone, Default)]
pub struct ResolvedInputs {
    pub assumptions: Assumptions,
    pub opening: OpeningBalances,
    pub assets: Vec<AssetItem>,
    pub liabilities: Vec<LiabilityItem>,
}

impl ResolvedInputs {
    pub fn resolve(scope: &Scope, inputs: PlanInputs) -> Self {
        let assumptions = inputs.assumptions.unwrap_or_else(|| {
            warn!("No assumptions for {}, using defaults", scope);
            Assumptions::default()
        });
        let opening = inputs.opening.unwrap_or_else(|| {
            warn!("No opening balances for {}, projecting from zero", scope);
            OpeningBalances::default()
        });
        let assets = if inputs.assets.is_empty() {
            seed_asset_items(&opening)
        } else {
            inputs.assets
        };
        let liabilities = if inputs.liabilities.is_empty() {
            seed_liability_items(&opening)
        } else {
            inputs.liabilities
        };
        Self {
            assumptions,
            opening,
            assets,
            liabilities,
        }
    }
}

/// Inputs held in memory, keyed by scope
#[derive(Default)]
pub struct MemoryInputs {
    scopes: RwLock<HashMap<Scope, PlanInputs>>,
}

impl MemoryInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, scope: Scope, inputs: PlanInputs) -> PlanResult<()> {
        self.scopes
            .write()
            .map_err(|_| PlanError::Store("input table lock poisoned".to_string()))?
            .insert(scope, inputs);
        Ok(())
    }

    pub fn scopes(&self) -> PlanResult<Vec<Scope>> {
        let scopes = self
            .scopes
            .read()
            .map_err(|_| PlanError::Store("input table lock poisoned".to_string()))?;
        let mut keys: Vec<Scope> = scopes.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl InputSource for MemoryInputs {
    fn inputs(&self, scope: &Scope) -> PlanResult<PlanInputs> {
        let scopes = self
            .scopes
            .read()
            .map_err(|_| PlanError::Store("input table lock poisoned".to_string()))?;
        Ok(scopes.get(scope).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balances::{BalanceRecord, CreditorClass, StatementKind};
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_scope_defaults() {
        let inputs = MemoryInputs::new();
        let scope = Scope::base("unknown");
        let resolved = ResolvedInputs::resolve(&scope, inputs.inputs(&scope).unwrap());
        assert_eq!(resolved.assumptions.plan.duration_months, 120);
        assert!(resolved.opening.is_empty());
        assert!(resolved.assets.is_empty());
    }

    #[test]
    fn test_registers_seeded_from_opening() {
        let opening = OpeningBalances::new(vec![
            BalanceRecord {
                statement: StatementKind::Sp,
                code: "CASH".to_string(),
                description: String::new(),
                amount: dec!(1000),
            },
            BalanceRecord {
                statement: StatementKind::Sp,
                code: "DEBTS".to_string(),
                description: String::new(),
                amount: dec!(-5000),
            },
        ]);
        let inputs = MemoryInputs::new();
        let scope = Scope::base("case-1");
        inputs
            .insert(scope.clone(), PlanInputs { opening: Some(opening), ..PlanInputs::default() })
            .unwrap();
        let resolved = ResolvedInputs::resolve(&scope, inputs.inputs(&scope).unwrap());
        assert_eq!(resolved.assets.len(), 1);
        assert_eq!(resolved.liabilities.len(), 1);
        assert_eq!(resolved.liabilities[0].creditor_class, CreditorClass::Unsecured);
        assert_eq!(inputs.scopes().unwrap(), vec![scope]);
    }
}
