//! Opening balance-sheet position the projections roll forward from
//!
//! Input convention: assets positive, debts and funds taken in absolute
//! value, equity signed (profits positive). Depreciation funds are netted
//! against gross fixed assets whatever their sign.

use log::warn;
use rust_decimal::Decimal;

use crate::assumptions::BalanceDrivers;
use crate::balances::OpeningBalances;
use crate::money::round2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpeningPosition {
    pub cash: Decimal,
    pub receivables: Decimal,
    pub inventory: Decimal,
    pub accrued_income: Decimal,
    /// Net book value
    pub intangible_assets: Decimal,
    /// Net book value
    pub tangible_assets: Decimal,
    pub financial_assets: Decimal,
    pub leased_assets: Decimal,
    pub short_term_debt: Decimal,
    pub long_term_debt: Decimal,
    pub provision_funds: Decimal,
    pub share_capital: Decimal,
    pub reserves: Decimal,
    /// Prior retained earnings plus the last closed year's result
    pub retained_earnings: Decimal,
}

impl OpeningPosition {
    pub fn from_balances(opening: &OpeningBalances, drivers: &BalanceDrivers) -> Self {
        let total_debt = opening.sp("DEBTS").abs();
        let short_term_debt = round2(total_debt * drivers.short_term_debt_share);

        Self {
            cash: opening.sp("CASH"),
            receivables: opening.sp("RECEIVABLES"),
            inventory: opening.sp("INVENTORY"),
            accrued_income: opening.sp("ACCRUED_INCOME"),
            intangible_assets: net_book_value(
                opening.sp("INTANGIBLE_ASSETS"),
                opening.sp("INTANGIBLE_DEPRECIATION_FUND"),
            ),
            tangible_assets: net_book_value(
                opening.sp("TANGIBLE_ASSETS"),
                opening.sp("TANGIBLE_DEPRECIATION_FUND"),
            ),
            financial_assets: opening.sp("FINANCIAL_ASSETS"),
            leased_assets: opening.sp("LEASED_ASSETS"),
            short_term_debt,
            long_term_debt: total_debt - short_term_debt,
            provision_funds: opening.sp("PROVISION_FUNDS").abs(),
            share_capital: opening.sp("SHARE_CAPITAL"),
            reserves: opening.sp("RESERVES"),
            retained_earnings: opening.sp("RETAINED_EARNINGS") + opening.sp("CURRENT_RESULT"),
        }
    }

    /// Assets minus liabilities and equity; zero for a consistent opening balance sheet
    pub fn imbalance(&self) -> Decimal {
        let imbalance = self.total_assets() - self.total_liabilities_and_equity();
        if imbalance.abs() > Decimal::new(1, 2) {
            warn!("Opening balance sheet does not balance: assets exceed sources by {}", imbalance);
        }
        imbalance
    }

    pub fn fixed_assets(&self) -> Decimal {
        self.intangible_assets + self.tangible_assets + self.financial_assets + self.leased_assets
    }

    pub fn total_assets(&self) -> Decimal {
        self.cash + self.receivables + self.inventory + self.accrued_income + self.fixed_assets()
    }

    pub fn equity(&self) -> Decimal {
        self.share_capital + self.reserves + self.retained_earnings
    }

    pub fn total_liabilities_and_equity(&self) -> Decimal {
        self.short_term_debt + self.long_term_debt + self.provision_funds + self.equity()
    }
}

fn net_book_value(gross: Decimal, fund: Decimal) -> Decimal {
    (gross - fund.abs()).max(Decimal::ZERO)
}
