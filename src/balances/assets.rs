//! Adjusted asset register

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OpeningBalances;

/// Standard asset categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCategory {
    IntangibleAssets,
    TangibleAssets,
    FinancialFixedAssets,
    Inventory,
    TradeReceivables,
    ReceivablesFromSubsidiaries,
    ReceivablesFromAssociates,
    ReceivablesFromParents,
    TaxReceivables,
    DeferredTaxAssets,
    OtherReceivables,
    CurrentFinancialAssets,
    LiquidFunds,
    AccruedIncome,
    CashOnHand,
    BankAccounts,
    Securities,
    Investments,
    Goodwill,
    OtherIntangibles,
    OtherAssets,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 21] = [
        AssetCategory::IntangibleAssets,
        AssetCategory::TangibleAssets,
        AssetCategory::FinancialFixedAssets,
        AssetCategory::Inventory,
        AssetCategory::TradeReceivables,
        AssetCategory::ReceivablesFromSubsidiaries,
        AssetCategory::ReceivablesFromAssociates,
        AssetCategory::ReceivablesFromParents,
        AssetCategory::TaxReceivables,
        AssetCategory::DeferredTaxAssets,
        AssetCategory::OtherReceivables,
        AssetCategory::CurrentFinancialAssets,
        AssetCategory::LiquidFunds,
        AssetCategory::AccruedIncome,
        AssetCategory::CashOnHand,
        AssetCategory::BankAccounts,
        AssetCategory::Securities,
        AssetCategory::Investments,
        AssetCategory::Goodwill,
        AssetCategory::OtherIntangibles,
        AssetCategory::OtherAssets,
    ];
}

/// Opening balance-sheet code → asset category
const CODE_TO_CATEGORY: &[(&str, AssetCategory)] = &[
    ("CASH", AssetCategory::LiquidFunds),
    ("RECEIVABLES", AssetCategory::TradeReceivables),
    ("INVENTORY", AssetCategory::Inventory),
    ("ACCRUED_INCOME", AssetCategory::AccruedIncome),
    ("INTANGIBLE_ASSETS", AssetCategory::IntangibleAssets),
    ("INTANGIBLE_DEPRECIATION_FUND", AssetCategory::IntangibleAssets),
    ("TANGIBLE_ASSETS", AssetCategory::TangibleAssets),
    ("TANGIBLE_DEPRECIATION_FUND", AssetCategory::TangibleAssets),
    ("FINANCIAL_ASSETS", AssetCategory::FinancialFixedAssets),
    ("LEASED_ASSETS", AssetCategory::TangibleAssets),
];

/// Contra-asset codes carried at their negative value
const CONTRA_CODES: &[&str] = &["INTANGIBLE_DEPRECIATION_FUND", "TANGIBLE_DEPRECIATION_FUND"];

/// Category for an opening balance-sheet code, if it is an asset code
pub fn category_for_code(code: &str) -> Option<AssetCategory> {
    CODE_TO_CATEGORY
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, category)| *category)
}

/// One asset line with its adjustments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetItem {
    pub category: AssetCategory,
    pub code: String,
    #[serde(default)]
    pub description: String,
    /// Book value from the opening balance sheet
    pub book_value: Decimal,
    /// Write-downs applied in the adjusted balance sheet
    #[serde(default)]
    pub adjustments: Decimal,
    /// Realizable value under business continuity; falls back to the adjusted value
    #[serde(default)]
    pub continuity_value: Option<Decimal>,
}

impl AssetItem {
    pub fn adjusted_value(&self) -> Decimal {
        self.book_value - self.adjustments
    }

    pub fn continuity_realizable(&self) -> Decimal {
        match self.continuity_value {
            Some(value) if !value.is_zero() => value,
            _ => self.adjusted_value(),
        }
    }
}

/// Build the asset register from the opening balance sheet
pub fn seed_asset_items(opening: &OpeningBalances) -> Vec<AssetItem> {
    opening
        .records()
        .iter()
        .filter(|r| r.statement == super::StatementKind::Sp)
        .filter_map(|r| {
            let code = super::normalize_code(&r.code);
            let category = category_for_code(&code)?;
            let book_value = if CONTRA_CODES.contains(&code.as_str()) {
                -r.amount.abs()
            } else {
                r.amount
            };
            Some(AssetItem {
                category,
                code,
                description: r.description.clone(),
                book_value,
                adjustments: Decimal::ZERO,
                continuity_value: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balances::{BalanceRecord, StatementKind};
    use rust_decimal_macros::dec;

    fn sp(code: &str, amount: Decimal) -> BalanceRecord {
        BalanceRecord {
            statement: StatementKind::Sp,
            code: code.to_string(),
            description: String::new(),
            amount,
        }
    }

    #[test]
    fn test_seed_skips_liabilities_and_nets_funds() {
        let opening = OpeningBalances::new(vec![
            sp("TANGIBLE_ASSETS", dec!(100000)),
            sp("TANGIBLE_DEPRECIATION_FUND", dec!(40000)),
            sp("DEBTS", dec!(-50000)),
            sp("SP_CASH", dec!(5000)),
        ]);
        let items = seed_asset_items(&opening);
        assert_eq!(items.len(), 3);
        let tangible: Decimal = items
            .iter()
            .filter(|i| i.category == AssetCategory::TangibleAssets)
            .map(|i| i.adjusted_value())
            .sum();
        assert_eq!(tangible, dec!(60000));
        assert!(items.iter().any(|i| i.category == AssetCategory::LiquidFunds));
    }

    #[test]
    fn test_continuity_value_fallback() {
        let mut item = AssetItem {
            category: AssetCategory::Inventory,
            code: "INVENTORY".to_string(),
            description: String::new(),
            book_value: dec!(1000),
            adjustments: dec!(300),
            continuity_value: None,
        };
        assert_eq!(item.continuity_realizable(), dec!(700));
        item.continuity_value = Some(dec!(900));
        assert_eq!(item.continuity_realizable(), dec!(900));
        item.continuity_value = Some(Decimal::ZERO);
        assert_eq!(item.continuity_realizable(), dec!(700));
    }
}
