//! Indirect-method cash flow (CFlow), derived from CE and SP deltas

use rust_decimal::Decimal;

use super::ce::CeTable;
use super::lines::{CeLine, CflowLine, SpLine};
use super::opening::OpeningPosition;
use super::sp::SpTable;
use crate::statement::StatementTable;

pub type CflowTable = StatementTable<CflowLine>;

/// Balance-sheet levels a period is measured against
#[derive(Debug, Clone, Copy, Default)]
struct Levels {
    cash: Decimal,
    receivables: Decimal,
    inventory: Decimal,
    payables: Decimal,
    fixed_assets: Decimal,
    short_term_debt: Decimal,
    long_term_debt: Decimal,
    provision_funds: Decimal,
    equity: Decimal,
}

impl Levels {
    fn from_opening(position: &OpeningPosition) -> Self {
        Self {
            cash: position.cash,
            receivables: position.receivables,
            inventory: position.inventory,
            payables: Decimal::ZERO,
            fixed_assets: position.fixed_assets(),
            short_term_debt: position.short_term_debt,
            long_term_debt: position.long_term_debt,
            provision_funds: position.provision_funds,
            equity: position.equity(),
        }
    }

    fn from_sp(sp: &SpTable, p: usize) -> Self {
        Self {
            cash: sp.get(p, SpLine::Cash),
            receivables: sp.get(p, SpLine::Receivables),
            inventory: sp.get(p, SpLine::Inventory),
            payables: sp.get(p, SpLine::TradePayables),
            fixed_assets: sp.get(p, SpLine::TotalFixedAssets),
            short_term_debt: sp.get(p, SpLine::ShortTermDebt),
            long_term_debt: sp.get(p, SpLine::LongTermDebt),
            provision_funds: sp.get(p, SpLine::ProvisionFunds),
            equity: sp.get(p, SpLine::TotalEquity),
        }
    }
}

/// Derive the cash flow statement; period 0 is measured against the opening position
pub fn project_cflow(position: &OpeningPosition, ce: &CeTable, sp: &SpTable) -> CflowTable {
    let mut table = CflowTable::new(sp.len());
    let mut previous = Levels::from_opening(position);

    for p in 0..sp.len() {
        let current = Levels::from_sp(sp, p);
        let net_income = ce.get(p, CeLine::NetIncome);
        let depreciation = ce.sum(p, &CeLine::DEPRECIATION).abs();

        let receivables_change = previous.receivables - current.receivables;
        let inventory_change = previous.inventory - current.inventory;
        let payables_change = current.payables - previous.payables;
        let funds_change = current.provision_funds - previous.provision_funds;
        let operating =
            net_income + depreciation + receivables_change + inventory_change + payables_change + funds_change;

        let investment = -(current.fixed_assets - previous.fixed_assets + depreciation);

        let short_change = current.short_term_debt - previous.short_term_debt;
        let long_change = current.long_term_debt - previous.long_term_debt;
        let equity_change = current.equity - previous.equity - net_income;
        let financing = short_change + long_change + equity_change;

        let net = operating + investment + financing;

        table.set(p, CflowLine::NetIncome, net_income);
        table.set(p, CflowLine::DepreciationAddBack, depreciation);
        table.set(p, CflowLine::ReceivablesChange, receivables_change);
        table.set(p, CflowLine::InventoryChange, inventory_change);
        table.set(p, CflowLine::PayablesChange, payables_change);
        table.set(p, CflowLine::ProvisionFundsChange, funds_change);
        table.set(p, CflowLine::OperatingCashFlow, operating);
        table.set(p, CflowLine::FixedAssetInvestment, investment);
        table.set(p, CflowLine::InvestingCashFlow, investment);
        table.set(p, CflowLine::ShortTermDebtChange, short_change);
        table.set(p, CflowLine::LongTermDebtChange, long_change);
        table.set(p, CflowLine::EquityChange, equity_change);
        table.set(p, CflowLine::FinancingCashFlow, financing);
        table.set(p, CflowLine::NetCashFlow, net);
        table.set(p, CflowLine::OpeningCash, previous.cash);
        table.set(p, CflowLine::ClosingCash, previous.cash + net);

        previous = current;
    }
    table
}
