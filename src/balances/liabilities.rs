//! Adjusted liability register and creditor classes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::OpeningBalances;

/// Statutory creditor classes, declared in payment priority order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditorClass {
    PreDeduction,
    MortgageSecured,
    Privileged,
    #[default]
    Unsecured,
}

impl CreditorClass {
    pub const ALL: [CreditorClass; 4] = [
        CreditorClass::PreDeduction,
        CreditorClass::MortgageSecured,
        CreditorClass::Privileged,
        CreditorClass::Unsecured,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CreditorClass::PreDeduction => "PRE_DEDUCTION",
            CreditorClass::MortgageSecured => "MORTGAGE_SECURED",
            CreditorClass::Privileged => "PRIVILEGED",
            CreditorClass::Unsecured => "UNSECURED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreditorClass::PreDeduction => "Pre-deduction claims",
            CreditorClass::MortgageSecured => "Mortgage-secured creditors",
            CreditorClass::Privileged => "Privileged creditors",
            CreditorClass::Unsecured => "Unsecured creditors",
        }
    }
}

/// Standard liability categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiabilityCategory {
    ShortTermBankDebt,
    LongTermBankDebt,
    TradePayables,
    TaxPayables,
    SocialSecurityPayables,
    EmployeePayables,
    PayablesToSubsidiaries,
    PayablesToAssociates,
    PayablesToParents,
    OtherPayables,
    SeveranceFund,
    RiskProvisions,
    AccruedExpenses,
    Equity,
    OtherLiabilities,
}

/// Opening balance-sheet code → liability category
const CODE_TO_CATEGORY: &[(&str, LiabilityCategory)] = &[
    ("DEBTS", LiabilityCategory::TradePayables),
    ("PROVISION_FUNDS", LiabilityCategory::RiskProvisions),
    ("SHARE_CAPITAL", LiabilityCategory::Equity),
    ("RESERVES", LiabilityCategory::Equity),
    ("RETAINED_EARNINGS", LiabilityCategory::Equity),
    ("CURRENT_RESULT", LiabilityCategory::Equity),
];

pub fn category_for_code(code: &str) -> Option<LiabilityCategory> {
    CODE_TO_CATEGORY
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, category)| *category)
}

/// One liability line with its adjustments and creditor class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityItem {
    pub category: LiabilityCategory,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub book_value: Decimal,
    /// Net adjustments (increases, penalties, accrued interest less offsets)
    #[serde(default)]
    pub adjustments: Decimal,
    #[serde(default)]
    pub creditor_class: CreditorClass,
}

impl LiabilityItem {
    /// Admitted claim, always positive
    pub fn adjusted_value(&self) -> Decimal {
        (self.book_value + self.adjustments).abs()
    }
}

/// Build the liability register from the opening balance sheet
pub fn seed_liability_items(opening: &OpeningBalances) -> Vec<LiabilityItem> {
    opening
        .records()
        .iter()
        .filter(|r| r.statement == super::StatementKind::Sp)
        .filter_map(|r| {
            let code = super::normalize_code(&r.code);
            let category = category_for_code(&code)?;
            Some(LiabilityItem {
                category,
                code,
                description: r.description.clone(),
                book_value: r.amount.abs(),
                adjustments: Decimal::ZERO,
                creditor_class: CreditorClass::Unsecured,
            })
        })
        .collect()
}

/// Admitted claims per creditor class, equity excluded
pub fn claims_by_class(items: &[LiabilityItem]) -> BTreeMap<CreditorClass, Decimal> {
    let mut claims = BTreeMap::new();
    for item in items.iter().filter(|i| i.category != LiabilityCategory::Equity) {
        *claims.entry(item.creditor_class).or_insert(Decimal::ZERO) += item.adjusted_value();
    }
    claims
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(category: LiabilityCategory, value: Decimal, class: CreditorClass) -> LiabilityItem {
        LiabilityItem {
            category,
            code: "X".to_string(),
            description: String::new(),
            book_value: value,
            adjustments: Decimal::ZERO,
            creditor_class: class,
        }
    }

    #[test]
    fn test_claims_exclude_equity() {
        let items = vec![
            item(LiabilityCategory::TradePayables, dec!(-30000), CreditorClass::Unsecured),
            item(LiabilityCategory::TaxPayables, dec!(20000), CreditorClass::Privileged),
            item(LiabilityCategory::OtherPayables, dec!(5000), CreditorClass::Unsecured),
            item(LiabilityCategory::Equity, dec!(100000), CreditorClass::Unsecured),
        ];
        let claims = claims_by_class(&items);
        assert_eq!(claims[&CreditorClass::Unsecured], dec!(35000));
        assert_eq!(claims[&CreditorClass::Privileged], dec!(20000));
        assert!(!claims.contains_key(&CreditorClass::MortgageSecured));
    }

    #[test]
    fn test_class_priority_order() {
        let mut classes = vec![CreditorClass::Unsecured, CreditorClass::PreDeduction, CreditorClass::Privileged];
        classes.sort();
        assert_eq!(classes[0], CreditorClass::PreDeduction);
        assert_eq!(classes[2], CreditorClass::Unsecured);
    }
}
