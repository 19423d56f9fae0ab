//! Opening reclassified balances and the asset/liability registers seeded from them

pub mod assets;
pub mod liabilities;

pub use assets::{AssetCategory, AssetItem, seed_asset_items};
pub use liabilities::{claims_by_class, seed_liability_items, CreditorClass, LiabilityCategory, LiabilityItem};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which opening statement a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementKind {
    Ce,
    Sp,
}

/// One flat reclassified record `(code, description, amount)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub statement: StatementKind,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
}

/// Opening income statement and balance sheet, summed by code
#[derive(Debug, Clone, Default)]
pub struct OpeningBalances {
    records: Vec<BalanceRecord>,
    ce: HashMap<String, Decimal>,
    sp: HashMap<String, Decimal>,
}

impl OpeningBalances {
    pub fn new(records: Vec<BalanceRecord>) -> Self {
        let mut ce = HashMap::new();
        let mut sp = HashMap::new();
        for record in &records {
            let map = match record.statement {
                StatementKind::Ce => &mut ce,
                StatementKind::Sp => &mut sp,
            };
            *map.entry(normalize_code(&record.code)).or_insert(Decimal::ZERO) += record.amount;
        }
        Self { records, ce, sp }
    }

    /// Annual income-statement amount for a code (zero if absent)
    pub fn ce(&self, code: &str) -> Decimal {
        self.ce.get(code).copied().unwrap_or(Decimal::ZERO)
    }

    /// Balance-sheet amount for a code (zero if absent)
    pub fn sp(&self, code: &str) -> Decimal {
        self.sp.get(code).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn records(&self) -> &[BalanceRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Strip the `CE_`/`SP_` prefixes ingestion sometimes leaves on codes
fn normalize_code(code: &str) -> String {
    let code = code.trim();
    code.strip_prefix("CE_")
        .or_else(|| code.strip_prefix("SP_"))
        .unwrap_or(code)
        .to_string()
}
