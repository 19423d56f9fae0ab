//! Balance sheet (SP) projector
//!
//! Rolls the opening position forward with the income statement: fixed
//! assets net of depreciation, working capital re-derived every period from
//! turnover days, debts reduced by scheduled repayments, equity accumulating
//! the result with a reclassification at each plan-year close. Cash is the
//! plug that balances the sheet.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ce::CeTable;
use super::lines::{CeLine, SpLine};
use super::opening::OpeningPosition;
use crate::assumptions::Assumptions;
use crate::auxiliary::{AuxLine, AuxiliaryTable};
use crate::balances::OpeningBalances;
use crate::money::round2;
use crate::statement::StatementTable;
use crate::timeline::Timeline;

pub type SpTable = StatementTable<SpLine>;

const DAYS_PER_MONTH: Decimal = dec!(30);

/// Working-capital level for a monthly flow and a turnover in days
fn turnover_level(monthly_flow: Decimal, days: Decimal) -> Decimal {
    round2(monthly_flow * days / DAYS_PER_MONTH)
}

pub fn project_sp(
    timeline: &Timeline,
    opening: &OpeningBalances,
    assumptions: &Assumptions,
    ce: &CeTable,
    aux: &AuxiliaryTable,
) -> SpTable {
    let drivers = &assumptions.balance_drivers;
    let position = OpeningPosition::from_balances(opening, drivers);
    position.imbalance();

    let mut table = SpTable::new(timeline.len());
    let mut intangible = position.intangible_assets;
    let mut tangible = position.tangible_assets;
    let mut short_term_debt = position.short_term_debt;
    let mut structural_long_debt = position.long_term_debt;
    let mut provision_funds = position.provision_funds;
    let mut retained = position.retained_earnings;
    let mut current_result = Decimal::ZERO;

    for period in timeline.iter() {
        let p = period.index as usize;

        let intangible_depreciation =
            ce.sum(p, &[CeLine::DepreciationIntangibleExisting, CeLine::DepreciationIntangibleNew]).abs();
        let tangible_depreciation =
            ce.sum(p, &[CeLine::DepreciationTangibleExisting, CeLine::DepreciationTangibleNew]).abs();
        intangible = (intangible - intangible_depreciation).max(Decimal::ZERO);
        tangible = (tangible - tangible_depreciation).max(Decimal::ZERO);

        let repaid_short = aux.get(p, AuxLine::PreDeductionTotal) + aux.get(p, AuxLine::TaxDebtPrincipal);
        short_term_debt = (short_term_debt - repaid_short).max(Decimal::ZERO);
        structural_long_debt =
            (structural_long_debt - aux.get(p, AuxLine::FinancingExistingPrincipal)).max(Decimal::ZERO);
        let long_term_debt = structural_long_debt + aux.get(p, AuxLine::FinancingNewResidual);
        provision_funds += ce.get(p, CeLine::Provisions).abs();

        let revenue = ce.get(p, CeLine::Revenue).abs();
        let raw_materials = ce.get(p, CeLine::RawMaterials).abs();
        let purchases = ce.sum(p, &CeLine::PURCHASES).abs();
        let receivables = if revenue > Decimal::ZERO {
            turnover_level(revenue, drivers.dso)
        } else if p == 0 {
            position.receivables
        } else {
            Decimal::ZERO
        };
        let inventory = if raw_materials > Decimal::ZERO {
            turnover_level(raw_materials, drivers.dio)
        } else if p == 0 {
            position.inventory
        } else {
            Decimal::ZERO
        };
        let trade_payables = turnover_level(purchases, drivers.dpo);

        current_result += ce.get(p, CeLine::NetIncome);
        if period.closes_plan_year() {
            retained += current_result;
            current_result = Decimal::ZERO;
        }

        let fixed = intangible + tangible + position.financial_assets + position.leased_assets;
        let current_liabilities = short_term_debt + trade_payables;
        let long_term_liabilities = long_term_debt + provision_funds;
        let equity = position.share_capital + position.reserves + retained + current_result;
        let sources = current_liabilities + long_term_liabilities + equity;
        let cash = sources - fixed - receivables - inventory - position.accrued_income;
        let current_assets = cash + receivables + inventory + position.accrued_income;

        table.set(p, SpLine::Cash, cash);
        table.set(p, SpLine::Receivables, receivables);
        table.set(p, SpLine::Inventory, inventory);
        table.set(p, SpLine::AccruedIncome, position.accrued_income);
        table.set(p, SpLine::TotalCurrentAssets, current_assets);
        table.set(p, SpLine::IntangibleAssets, intangible);
        table.set(p, SpLine::TangibleAssets, tangible);
        table.set(p, SpLine::FinancialAssets, position.financial_assets);
        table.set(p, SpLine::LeasedAssets, position.leased_assets);
        table.set(p, SpLine::TotalFixedAssets, fixed);
        table.set(p, SpLine::TotalAssets, current_assets + fixed);
        table.set(p, SpLine::ShortTermDebt, short_term_debt);
        table.set(p, SpLine::TradePayables, trade_payables);
        table.set(p, SpLine::TotalCurrentLiabilities, current_liabilities);
        table.set(p, SpLine::LongTermDebt, long_term_debt);
        table.set(p, SpLine::ProvisionFunds, provision_funds);
        table.set(p, SpLine::TotalLongTermLiabilities, long_term_liabilities);
        table.set(p, SpLine::ShareCapital, position.share_capital);
        table.set(p, SpLine::Reserves, position.reserves);
        table.set(p, SpLine::RetainedEarnings, retained);
        table.set(p, SpLine::CurrentResult, current_result);
        table.set(p, SpLine::TotalEquity, equity);
        table.set(p, SpLine::TotalLiabilitiesAndEquity, sources);
    }
    table
}

/// Net financial position per period: financial debt less cash
pub fn net_financial_position(sp: &SpTable) -> Vec<Decimal> {
    (0..sp.len())
        .map(|p| sp.get(p, SpLine::ShortTermDebt) + sp.get(p, SpLine::LongTermDebt) - sp.get(p, SpLine::Cash))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auxiliary::build_auxiliary;
    use crate::balances::{BalanceRecord, StatementKind};
    use crate::projection::ce::project_ce;
    use crate::auxiliary::ProcedureFee;

    fn record(statement: StatementKind, code: &str, amount: Decimal) -> BalanceRecord {
        BalanceRecord { statement, code: code.to_string(), description: String::new(), amount }
    }

    fn opening() -> OpeningBalances {
        OpeningBalances::new(vec![
            record(StatementKind::Ce, "REVENUE", dec!(1200000)),
            record(StatementKind::Ce, "RAW_MATERIALS", dec!(480000)),
            record(StatementKind::Ce, "SERVICES", dec!(120000)),
            record(StatementKind::Ce, "PERSONNEL", dec!(300000)),
            record(StatementKind::Ce, "PROVISIONS", dec!(12000)),
            record(StatementKind::Ce, "DEPRECIATION_TANGIBLE", dec!(24000)),
            record(StatementKind::Sp, "CASH", dec!(50000)),
            record(StatementKind::Sp, "RECEIVABLES", dec!(150000)),
            record(StatementKind::Sp, "INVENTORY", dec!(40000)),
            record(StatementKind::Sp, "TANGIBLE_ASSETS", dec!(300000)),
            record(StatementKind::Sp, "TANGIBLE_DEPRECIATION_FUND", dec!(-100000)),
            record(StatementKind::Sp, "DEBTS", dec!(-300000)),
            record(StatementKind::Sp, "PROVISION_FUNDS", dec!(-40000)),
            record(StatementKind::Sp, "SHARE_CAPITAL", dec!(50000)),
            record(StatementKind::Sp, "RESERVES", dec!(30000)),
            record(StatementKind::Sp, "RETAINED_EARNINGS", dec!(20000)),
        ])
    }

    fn project(a: &Assumptions) -> (CeTable, SpTable) {
        let timeline = a.timeline().unwrap();
        let aux = build_auxiliary(a);
        let opening = opening();
        let ce = project_ce(&timeline, &opening, a, &aux, None);
        let sp = project_sp(&timeline, &opening, a, &ce, &aux);
        (ce, sp)
    }

    fn plan(months: u32) -> Assumptions {
        let mut a = Assumptions::default();
        a.plan.duration_months = months;
        a.procedure_costs.fees.push(ProcedureFee {
            name: "Trustee".to_string(),
            taxable_amount: dec!(20000),
        });
        a
    }

    #[test]
    fn test_balance_sheet_identity_every_period() {
        let (_, sp) = project(&plan(36));
        for p in 0..sp.len() {
            assert_eq!(
                sp.get(p, SpLine::TotalAssets),
                sp.get(p, SpLine::TotalLiabilitiesAndEquity),
                "period {}",
                p
            );
        }
    }

    #[test]
    fn test_working_capital_from_turnover_days() {
        let (_, sp) = project(&plan(12));
        // 100,000 revenue × 60/30; 40,000 raw materials × 30/30; 50,000 purchases × 60/30
        assert_eq!(sp.get(0, SpLine::Receivables), dec!(200000));
        assert_eq!(sp.get(0, SpLine::Inventory), dec!(40000));
        assert_eq!(sp.get(0, SpLine::TradePayables), dec!(100000));
        assert_eq!(sp.get(5, SpLine::Receivables), dec!(200000));
    }

    #[test]
    fn test_year_end_reclassification() {
        let (ce, sp) = project(&plan(24));
        let first_year: Decimal = (0..12).map(|p| ce.get(p, CeLine::NetIncome)).sum();
        assert_eq!(sp.get(10, SpLine::RetainedEarnings), dec!(20000));
        assert_eq!(sp.get(11, SpLine::CurrentResult), Decimal::ZERO);
        assert_eq!(sp.get(11, SpLine::RetainedEarnings), dec!(20000) + first_year);
        assert_eq!(sp.get(12, SpLine::CurrentResult), ce.get(12, CeLine::NetIncome));
    }

    #[test]
    fn test_debt_and_fixed_asset_roll_forward() {
        let (_, sp) = project(&plan(12));
        // procedure fee 20,000 × 1.04 × 1.22 over 12 months reduces short-term debt
        assert_eq!(sp.get(0, SpLine::ShortTermDebt), dec!(120000) - dec!(2114.67));
        assert_eq!(sp.get(11, SpLine::ShortTermDebt), dec!(120000) - dec!(25376.00));
        assert_eq!(sp.get(0, SpLine::LongTermDebt), dec!(180000));
        assert_eq!(sp.get(0, SpLine::TangibleAssets), dec!(198000));
        assert_eq!(sp.get(0, SpLine::ProvisionFunds), dec!(41000));
    }

    #[test]
    fn test_net_financial_position() {
        let (_, sp) = project(&plan(3));
        let pfn = net_financial_position(&sp);
        assert_eq!(
            pfn[0],
            sp.get(0, SpLine::ShortTermDebt) + sp.get(0, SpLine::LongTermDebt) - sp.get(0, SpLine::Cash)
        );
    }
}
