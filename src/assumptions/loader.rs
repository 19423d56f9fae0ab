//! File-based loaders for plan inputs
//!
//! Assumptions come from JSON; opening balances and the asset/liability
//! registers come from CSV. Every file is optional when loading a whole
//! input directory: a missing file yields defaults.

use csv::Reader;
use log::{info, warn};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::Assumptions;
use crate::balances::{
    AssetCategory, AssetItem, BalanceRecord, CreditorClass, LiabilityCategory, LiabilityItem,
    OpeningBalances, StatementKind,
};
use crate::error::{PlanError, PlanResult};

pub const ASSUMPTIONS_FILE: &str = "assumptions.json";
pub const OPENING_BALANCES_FILE: &str = "opening_balances.csv";
pub const ASSETS_FILE: &str = "assets.csv";
pub const LIABILITIES_FILE: &str = "liabilities.csv";

/// Load assumptions from a JSON file
pub fn load_assumptions(path: &Path) -> PlanResult<Assumptions> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Raw CSV row of the opening balances file
#[derive(Debug, serde::Deserialize)]
struct BalanceCsvRow {
    #[serde(rename = "Statement")]
    statement: String,
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Amount")]
    amount: Decimal,
}

impl BalanceCsvRow {
    fn to_record(self) -> PlanResult<BalanceRecord> {
        let statement = match self.statement.trim().to_ascii_uppercase().as_str() {
            "CE" => StatementKind::Ce,
            "SP" => StatementKind::Sp,
            other => {
                return Err(PlanError::InvalidInput(format!("unknown statement: {}", other)))
            }
        };
        Ok(BalanceRecord {
            statement,
            code: self.code,
            description: self.description,
            amount: self.amount,
        })
    }
}

/// Load opening balances from any CSV reader
pub fn read_opening_balances<R: Read>(reader: R) -> PlanResult<OpeningBalances> {
    let mut reader = Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: BalanceCsvRow = result?;
        records.push(row.to_record()?);
    }
    Ok(OpeningBalances::new(records))
}

pub fn load_opening_balances(path: &Path) -> PlanResult<OpeningBalances> {
    read_opening_balances(File::open(path)?)
}

#[derive(Debug, serde::Deserialize)]
struct AssetCsvRow {
    #[serde(rename = "Category")]
    category: AssetCategory,
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "BookValue")]
    book_value: Decimal,
    #[serde(rename = "Adjustments", default)]
    adjustments: Option<Decimal>,
    #[serde(rename = "ContinuityValue", default)]
    continuity_value: Option<Decimal>,
}

pub fn read_asset_items<R: Read>(reader: R) -> PlanResult<Vec<AssetItem>> {
    let mut reader = Reader::from_reader(reader);
    let mut items = Vec::new();
    for result in reader.deserialize() {
        let row: AssetCsvRow = result?;
        items.push(AssetItem {
            category: row.category,
            code: row.code,
            description: row.description,
            book_value: row.book_value,
            adjustments: row.adjustments.unwrap_or(Decimal::ZERO),
            continuity_value: row.continuity_value,
        });
    }
    Ok(items)
}

#[derive(Debug, serde::Deserialize)]
struct LiabilityCsvRow {
    #[serde(rename = "Category")]
    category: LiabilityCategory,
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "BookValue")]
    book_value: Decimal,
    #[serde(rename = "Adjustments", default)]
    adjustments: Option<Decimal>,
    #[serde(rename = "CreditorClass", default)]
    creditor_class: Option<CreditorClass>,
}

pub fn read_liability_items<R: Read>(reader: R) -> PlanResult<Vec<LiabilityItem>> {
    let mut reader = Reader::from_reader(reader);
    let mut items = Vec::new();
    for result in reader.deserialize() {
        let row: LiabilityCsvRow = result?;
        items.push(LiabilityItem {
            category: row.category,
            code: row.code,
            description: row.description,
            book_value: row.book_value,
            adjustments: row.adjustments.unwrap_or(Decimal::ZERO),
            creditor_class: row.creditor_class.unwrap_or_default(),
        });
    }
    Ok(items)
}

/// Everything the engine reads for one (case, scenario)
#[derive(Debug, Clone, Default)]
pub struct PlanInputs {
    pub assumptions: Option<Assumptions>,
    pub opening: Option<OpeningBalances>,
    pub assets: Vec<AssetItem>,
    pub liabilities: Vec<LiabilityItem>,
}

impl PlanInputs {
    /// Load every input file present in `dir`
    pub fn load_from(dir: &Path) -> PlanResult<Self> {
        let assumptions = optional(dir, ASSUMPTIONS_FILE, load_assumptions)?;
        let opening = optional(dir, OPENING_BALANCES_FILE, load_opening_balances)?;
        let assets = optional(dir, ASSETS_FILE, |p| read_asset_items(File::open(p)?))?
            .unwrap_or_default();
        let liabilities = optional(dir, LIABILITIES_FILE, |p| read_liability_items(File::open(p)?))?
            .unwrap_or_default();

        info!(
            "Loaded inputs from {}: {} asset items, {} liability items",
            dir.display(),
            assets.len(),
            liabilities.len()
        );
        Ok(Self { assumptions, opening, assets, liabilities })
    }
}

fn optional<T>(
    dir: &Path,
    name: &str,
    load: impl FnOnce(&Path) -> PlanResult<T>,
) -> PlanResult<Option<T>> {
    let path = dir.join(name);
    if !path.exists() {
        warn!("{} not found, using defaults", path.display());
        return Ok(None);
    }
    load(&path).map(Some)
}
