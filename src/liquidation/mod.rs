//! Judicial liquidation waterfall
//!
//! Adjusted assets are grouped into three masses, reduced by liquidation
//! expenses, then distributed to the creditor classes in statutory order.
//! Each class draws from the masses in its own order and the masses are
//! depleted as classes are served.

mod masses;

pub use masses::{draw_in_order, draw_pro_rata, Mass, MassAmounts};

use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::balances::{AssetCategory, AssetItem, CreditorClass};
use crate::money::pct_of;

/// Categories realized outside the movable mass by default
const DEFAULT_MASS_MAP: &[(AssetCategory, Mass)] = &[
    (AssetCategory::TangibleAssets, Mass::RealEstate),
    (AssetCategory::LiquidFunds, Mass::General),
    (AssetCategory::CashOnHand, Mass::General),
    (AssetCategory::BankAccounts, Mass::General),
];

/// Order in which a class draws from the masses; `None` means pro-rata
fn draw_order(class: CreditorClass) -> Option<[Mass; 3]> {
    match class {
        CreditorClass::PreDeduction => None,
        CreditorClass::MortgageSecured => Some([Mass::RealEstate, Mass::General, Mass::Movable]),
        CreditorClass::Privileged => Some([Mass::Movable, Mass::RealEstate, Mass::General]),
        CreditorClass::Unsecured => Some([Mass::General, Mass::Movable, Mass::RealEstate]),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidationParams {
    /// Liquidation expenses as a fraction of each mass
    pub expense_rate: Decimal,
    /// Asset category → mass; unlisted categories fall in the movable mass
    pub mass_map: BTreeMap<AssetCategory, Mass>,
}

impl Default for LiquidationParams {
    fn default() -> Self {
        Self {
            expense_rate: dec!(0.10),
            mass_map: DEFAULT_MASS_MAP.iter().copied().collect(),
        }
    }
}

impl LiquidationParams {
    pub fn mass_for(&self, category: AssetCategory) -> Mass {
        self.mass_map.get(&category).copied().unwrap_or(Mass::Movable)
    }

    /// Gross realizable value per mass; a mass netting to a negative value realizes nothing
    pub fn group_assets(&self, assets: &[AssetItem]) -> MassAmounts {
        let mut gross = MassAmounts::default();
        for item in assets {
            *gross.get_mut(self.mass_for(item.category)) += item.adjusted_value();
        }
        gross.floored()
    }
}

/// What one creditor class receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDistribution {
    pub class: CreditorClass,
    pub credit: Decimal,
    pub paid: MassAmounts,
    pub residual_credit: Decimal,
    /// Percent of the credit satisfied
    pub satisfaction_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidationResult {
    pub gross: MassAmounts,
    pub expenses: MassAmounts,
    pub net: MassAmounts,
    pub classes: Vec<ClassDistribution>,
    /// Left over after every class is served
    pub remaining: MassAmounts,
}

impl LiquidationResult {
    /// Net realizable value of all masses
    pub fn net_realizable(&self) -> Decimal {
        self.net.total()
    }

    pub fn total_paid(&self) -> Decimal {
        self.classes.iter().map(|c| c.paid.total()).sum()
    }

    pub fn class(&self, class: CreditorClass) -> Option<&ClassDistribution> {
        self.classes.iter().find(|c| c.class == class)
    }

    /// Flatten into persisted lines
    pub fn to_lines(&self) -> Vec<LiquidationLine> {
        let mut lines = vec![
            LiquidationLine::masses("ASSET_REALIZATION", "GROSS_REALIZATION", "Gross asset realization", &self.gross),
            LiquidationLine::masses(
                "ASSET_REALIZATION",
                "LIQUIDATION_EXPENSES",
                "Liquidation expenses",
                &self.expenses.negated(),
            ),
            LiquidationLine::masses("ASSET_REALIZATION", "NET_REALIZATION", "Net asset realization", &self.net),
        ];
        for dist in &self.classes {
            let section = dist.class.code();
            lines.push(LiquidationLine {
                section: section.to_string(),
                line_code: format!("CREDIT_{}", section),
                line_label: format!("{} - admitted credit", dist.class.label()),
                total: dist.credit,
                ..LiquidationLine::default()
            });
            lines.push(LiquidationLine {
                satisfaction_pct: Some(dist.satisfaction_pct),
                residual_credit: Some(dist.residual_credit),
                ..LiquidationLine::masses(
                    section,
                    &format!("DISTRIBUTION_{}", section),
                    &format!("{} - distribution", dist.class.label()),
                    &dist.paid,
                )
            });
        }
        lines.push(LiquidationLine::masses(
            "SUMMARY",
            "REMAINING_FUNDS",
            "Funds remaining after distribution",
            &self.remaining,
        ));
        lines
    }
}

/// Persisted shape of one waterfall line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquidationLine {
    pub section: String,
    pub line_code: String,
    pub line_label: String,
    pub total: Decimal,
    pub mass_1: Decimal,
    pub mass_2: Decimal,
    pub mass_3: Decimal,
    pub satisfaction_pct: Option<Decimal>,
    pub residual_credit: Option<Decimal>,
}

impl LiquidationLine {
    fn masses(section: &str, code: &str, label: &str, amounts: &MassAmounts) -> Self {
        Self {
            section: section.to_string(),
            line_code: code.to_string(),
            line_label: label.to_string(),
            total: amounts.total(),
            mass_1: amounts.mass_1,
            mass_2: amounts.mass_2,
            mass_3: amounts.mass_3,
            satisfaction_pct: None,
            residual_credit: None,
        }
    }
}

/// Run the waterfall for the given assets and admitted claims per class
pub fn liquidate(
    assets: &[AssetItem],
    claims: &BTreeMap<CreditorClass, Decimal>,
    params: &LiquidationParams,
) -> LiquidationResult {
    let gross = params.group_assets(assets);
    let expenses = gross.scaled(params.expense_rate);
    let net = gross.minus(&expenses);
    let mut available = net;

    let classes: Vec<ClassDistribution> = CreditorClass::ALL
        .iter()
        .map(|&class| {
            let credit = claims.get(&class).copied().unwrap_or(Decimal::ZERO).abs();
            let paid = match draw_order(class) {
                Some(order) => draw_in_order(credit, &mut available, &order),
                None => draw_pro_rata(credit, &mut available),
            };
            ClassDistribution {
                class,
                credit,
                paid,
                residual_credit: credit - paid.total(),
                satisfaction_pct: pct_of(paid.total(), credit),
            }
        })
        .collect();

    info!(
        "Liquidation: net realizable {} across masses, {} distributed",
        net.total(),
        classes.iter().map(|c| c.paid.total()).sum::<Decimal>()
    );

    LiquidationResult {
        gross,
        expenses,
        net,
        classes,
        remaining: available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(category: AssetCategory, value: Decimal) -> AssetItem {
        AssetItem {
            category,
            code: String::new(),
            description: String::new(),
            book_value: value,
            adjustments: Decimal::ZERO,
            continuity_value: None,
        }
    }

    fn claims(entries: &[(CreditorClass, Decimal)]) -> BTreeMap<CreditorClass, Decimal> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_mortgage_then_privileged_worked_example() {
        let assets = vec![
            asset(AssetCategory::TangibleAssets, dec!(100000)),
            asset(AssetCategory::Inventory, dec!(30000)),
            asset(AssetCategory::TradeReceivables, dec!(20000)),
        ];
        let claims = claims(&[
            (CreditorClass::MortgageSecured, dec!(80000)),
            (CreditorClass::Privileged, dec!(60000)),
        ]);
        let result = liquidate(&assets, &claims, &LiquidationParams::default());

        assert_eq!(result.net.mass_1, dec!(90000));
        assert_eq!(result.net.mass_2, dec!(45000));
        assert_eq!(result.net.mass_3, Decimal::ZERO);

        let mortgage = result.class(CreditorClass::MortgageSecured).unwrap();
        assert_eq!(mortgage.paid.mass_1, dec!(80000));
        assert_eq!(mortgage.residual_credit, Decimal::ZERO);
        assert_eq!(mortgage.satisfaction_pct, dec!(100));

        let privileged = result.class(CreditorClass::Privileged).unwrap();
        assert_eq!(privileged.paid.mass_2, dec!(45000));
        assert_eq!(privileged.paid.mass_1, dec!(10000));
        assert_eq!(privileged.paid.total(), dec!(55000));
        assert_eq!(privileged.residual_credit, dec!(5000));
        assert_eq!(privileged.satisfaction_pct, dec!(91.67));

        let unsecured = result.class(CreditorClass::Unsecured).unwrap();
        assert_eq!(unsecured.satisfaction_pct, Decimal::ZERO);
        assert_eq!(result.remaining.total(), Decimal::ZERO);
    }

    #[test]
    fn test_pre_deduction_pro_rata_then_unsecured() {
        let assets = vec![
            asset(AssetCategory::TangibleAssets, dec!(100000)),
            asset(AssetCategory::Inventory, dec!(50000)),
            asset(AssetCategory::LiquidFunds, dec!(20000)),
        ];
        let claims = claims(&[
            (CreditorClass::PreDeduction, dec!(30600)),
            (CreditorClass::Unsecured, dec!(200000)),
        ]);
        let result = liquidate(&assets, &claims, &LiquidationParams::default());
        let pre = result.class(CreditorClass::PreDeduction).unwrap();
        assert_eq!(pre.paid.mass_1, dec!(18000));
        assert_eq!(pre.paid.mass_2, dec!(9000));
        assert_eq!(pre.paid.mass_3, dec!(3600));

        let unsecured = result.class(CreditorClass::Unsecured).unwrap();
        assert_eq!(unsecured.paid.total(), dec!(122400));
        assert_eq!(unsecured.paid.mass_3, dec!(14400));
        assert_eq!(unsecured.residual_credit, dec!(77600));
        assert_eq!(unsecured.satisfaction_pct, dec!(61.20));
    }

    #[test]
    fn test_conservation_and_non_negative_masses() {
        let assets = vec![
            asset(AssetCategory::TangibleAssets, dec!(33333.33)),
            asset(AssetCategory::OtherReceivables, dec!(77777.77)),
            asset(AssetCategory::BankAccounts, dec!(11111.11)),
        ];
        let claims = claims(&[
            (CreditorClass::PreDeduction, dec!(12345.67)),
            (CreditorClass::MortgageSecured, dec!(25000)),
            (CreditorClass::Privileged, dec!(40000)),
            (CreditorClass::Unsecured, dec!(90000)),
        ]);
        let result = liquidate(&assets, &claims, &LiquidationParams::default());
        assert!(result.total_paid() <= result.net_realizable());
        for mass in Mass::ALL {
            assert!(result.remaining.get(mass) >= Decimal::ZERO);
        }
        assert_eq!(result.total_paid() + result.remaining.total(), result.net_realizable());
    }

    #[test]
    fn test_overdrawn_bank_account_realizes_nothing() {
        let assets = vec![
            asset(AssetCategory::TangibleAssets, dec!(100000)),
            asset(AssetCategory::BankAccounts, dec!(-50000)),
        ];
        let claims = claims(&[(CreditorClass::PreDeduction, dec!(45000))]);
        let result = liquidate(&assets, &claims, &LiquidationParams::default());
        assert_eq!(result.gross.mass_3, Decimal::ZERO);
        assert_eq!(result.net.mass_3, Decimal::ZERO);

        let pre = result.class(CreditorClass::PreDeduction).unwrap();
        assert_eq!(pre.paid.mass_1, dec!(45000));
        assert_eq!(pre.paid.mass_3, Decimal::ZERO);
        assert_eq!(pre.residual_credit, Decimal::ZERO);
        assert_eq!(result.remaining.mass_1, dec!(45000));
        for mass in Mass::ALL {
            assert!(result.remaining.get(mass) >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_unmapped_category_goes_to_movable_mass() {
        let mut params = LiquidationParams::default();
        params.mass_map.remove(&AssetCategory::TangibleAssets);
        let gross = params.group_assets(&[asset(AssetCategory::TangibleAssets, dec!(500))]);
        assert_eq!(gross.mass_2, dec!(500));
    }

    #[test]
    fn test_lines_layout() {
        let result = liquidate(&[], &BTreeMap::new(), &LiquidationParams::default());
        let lines = result.to_lines();
        assert_eq!(lines.len(), 3 + 2 * 4 + 1);
        assert_eq!(lines[8].line_code, "DISTRIBUTION_PRIVILEGED");
        assert_eq!(lines[8].satisfaction_pct, Some(Decimal::ZERO));
    }
}
