//! Income statement (CE) projector

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::lines::CeLine;
use super::opening::OpeningPosition;
use crate::assumptions::{Assumptions, LineDriver};
use crate::auxiliary::{AuxLine, AuxiliaryTable};
use crate::balances::OpeningBalances;
use crate::money::{monthly_rate, round2, MONTHS_PER_YEAR};
use crate::statement::{StatementLine, StatementTable};
use crate::timeline::Timeline;

pub type CeTable = StatementTable<CeLine>;

/// Interest expense per period replacing the driven amount (absolute values)
pub type InterestOverride = BTreeMap<u32, Decimal>;

/// Opening codes of the driven depreciation totals
const DEPRECIATION_INTANGIBLE: &str = "DEPRECIATION_INTANGIBLE";
const DEPRECIATION_TANGIBLE: &str = "DEPRECIATION_TANGIBLE";

/// Monthly amount from an annual base: growth compounded over completed
/// plan years, split by twelve, weighted by seasonality
pub fn monthly_amount(
    annual_base: Decimal,
    period_index: u32,
    calendar_month: u32,
    driver: Option<&LineDriver>,
) -> Decimal {
    if annual_base.is_zero() {
        return Decimal::ZERO;
    }
    let mut grown = annual_base;
    let mut seasonality = Decimal::ONE;
    if let Some(driver) = driver {
        for year in 0..(period_index / 12) as usize {
            grown *= Decimal::ONE + driver.growth_for_year(year);
        }
        seasonality = driver.seasonality_factor(calendar_month);
    }
    round2(grown / MONTHS_PER_YEAR * seasonality)
}

/// Existing assets depreciate at a fixed monthly quota until their opening
/// book value runs out
struct ExistingDepreciation {
    quota: Decimal,
    remaining: Decimal,
}

impl ExistingDepreciation {
    fn new(net_book_value: Decimal, annual_rate: Decimal) -> Self {
        Self {
            quota: round2(net_book_value * monthly_rate(annual_rate)),
            remaining: net_book_value,
        }
    }

    fn next(&mut self) -> Decimal {
        let amount = self.quota.min(self.remaining).max(Decimal::ZERO);
        self.remaining -= amount;
        amount
    }
}

/// Project the income statement over the timeline
pub fn project_ce(
    timeline: &Timeline,
    opening: &OpeningBalances,
    assumptions: &Assumptions,
    aux: &AuxiliaryTable,
    interest_override: Option<&InterestOverride>,
) -> CeTable {
    let mut table = CeTable::new(timeline.len());
    let base = |code: &str| {
        assumptions
            .driver(code)
            .and_then(|d| d.base_override)
            .unwrap_or_else(|| opening.ce(code))
            .abs()
    };

    let position = OpeningPosition::from_balances(opening, &assumptions.balance_drivers);
    let drivers = &assumptions.balance_drivers;
    let mut intangible = ExistingDepreciation::new(
        position.intangible_assets,
        drivers.intangible_depreciation_rate,
    );
    let mut tangible =
        ExistingDepreciation::new(position.tangible_assets, drivers.tangible_depreciation_rate);

    for period in timeline.iter() {
        let p = period.index as usize;
        let monthly = |code: &str| {
            monthly_amount(base(code), period.index, period.month, assumptions.driver(code))
        };

        for (line, sign) in CeLine::BASE_LINES {
            let amount = monthly(line.code());
            table.set(p, line, if sign < 0 { -amount } else { amount });
        }

        table.set(p, CeLine::RentIncome, aux.get(p, AuxLine::RentFee));
        table.set(p, CeLine::ProcedureCosts, -aux.get(p, AuxLine::PreDeductionTotal));

        // the override only replaces interest on structural debt; scheduled
        // financing and tax-debt charges always apply
        let debt_interest = match interest_override.and_then(|o| o.get(&period.index)) {
            Some(amount) => amount.abs(),
            None => table.get(p, CeLine::FinancialCharges).abs(),
        };
        let scheduled_interest = aux.get(p, AuxLine::FinancingInterest)
            + aux.get(p, AuxLine::TaxDebtInterest)
            + aux.get(p, AuxLine::TaxDebtPenalty);
        table.set(p, CeLine::FinancialCharges, -(debt_interest + scheduled_interest));

        let existing_intangible = intangible.next();
        let existing_tangible = tangible.next();
        let new_intangible = (monthly(DEPRECIATION_INTANGIBLE) - existing_intangible).max(Decimal::ZERO);
        let new_tangible = (monthly(DEPRECIATION_TANGIBLE) - existing_tangible).max(Decimal::ZERO);
        table.set(p, CeLine::DepreciationIntangibleExisting, -existing_intangible);
        table.set(p, CeLine::DepreciationIntangibleNew, -new_intangible);
        table.set(p, CeLine::DepreciationTangibleExisting, -existing_tangible);
        table.set(p, CeLine::DepreciationTangibleNew, -new_tangible);

        compute_subtotals(&mut table, p, assumptions);
    }
    table
}

/// Subtotals bottom-up in statement order; taxes only on a positive result
fn compute_subtotals(table: &mut CeTable, p: usize, assumptions: &Assumptions) {
    use CeLine::*;

    let production_value = table.sum(
        p,
        &[Revenue, FinishedGoodsChange, RawMaterialsChange, CapitalizedCosts, RentIncome],
    );
    table.set(p, TotalProductionValue, production_value);

    let cash_costs = table.sum(p, &[RawMaterials, Services, ThirdPartyAssets, Personnel, OtherOperatingCosts]);
    let depreciation = table.sum(p, &CeLine::DEPRECIATION) + table.get(p, Provisions);
    table.set(p, TotalProductionCosts, cash_costs + depreciation);

    let ebitda = production_value + cash_costs;
    table.set(p, Ebitda, ebitda);
    table.set(p, TotalDepreciation, depreciation);
    let ebit = ebitda + depreciation;
    table.set(p, Ebit, ebit);

    let financial = table.sum(p, &[FinancialIncome, FinancialCharges]);
    table.set(p, FinancialResult, financial);
    let extraordinary = table.sum(p, &[ExtraordinaryIncome, ExtraordinaryCharges, ProcedureCosts]);
    table.set(p, ExtraordinaryResult, extraordinary);

    let ebt = ebit + financial + extraordinary;
    table.set(p, Ebt, ebt);

    let (corporate, regional) = if ebt > Decimal::ZERO {
        (
            round2(ebt * assumptions.plan.corporate_tax_rate),
            round2(ebt * assumptions.plan.regional_tax_rate),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };
    table.set(p, CorporateTax, -corporate);
    table.set(p, RegionalTax, -regional);
    table.set(p, TotalTaxes, -(corporate + regional));
    table.set(p, NetIncome, ebt - corporate - regional);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::TaxDebt;
    use crate::auxiliary::build_auxiliary;
    use crate::balances::{BalanceRecord, StatementKind};
    use rust_decimal_macros::dec;

    fn record(statement: StatementKind, code: &str, amount: Decimal) -> BalanceRecord {
        BalanceRecord { statement, code: code.to_string(), description: String::new(), amount }
    }

    fn small_plan(months: u32) -> Assumptions {
        let mut a = Assumptions::default();
        a.plan.duration_months = months;
        a
    }

    fn opening() -> OpeningBalances {
        OpeningBalances::new(vec![
            record(StatementKind::Ce, "REVENUE", dec!(1200000)),
            record(StatementKind::Ce, "RAW_MATERIALS", dec!(-480000)),
            record(StatementKind::Ce, "PERSONNEL", dec!(360000)),
            record(StatementKind::Ce, "FINANCIAL_CHARGES", dec!(24000)),
            record(StatementKind::Ce, "DEPRECIATION_TANGIBLE", dec!(36000)),
            record(StatementKind::Sp, "TANGIBLE_ASSETS", dec!(100000)),
            record(StatementKind::Sp, "TANGIBLE_DEPRECIATION_FUND", dec!(-88000)),
        ])
    }

    fn run(a: &Assumptions, opening: &OpeningBalances, over: Option<&InterestOverride>) -> CeTable {
        let timeline = a.timeline().unwrap();
        let aux = build_auxiliary(a);
        project_ce(&timeline, opening, a, &aux, over)
    }

    #[test]
    fn test_monthly_amount_growth_and_seasonality() {
        let driver = LineDriver {
            growth_rates: vec![dec!(0.10)],
            seasonality: vec![dec!(2), dec!(1), dec!(1), dec!(1), dec!(1), dec!(1), dec!(1), dec!(1), dec!(1), dec!(1), dec!(1), dec!(0)],
            base_override: None,
        };
        assert_eq!(monthly_amount(dec!(120000), 0, 1, Some(&driver)), dec!(20000.00));
        assert_eq!(monthly_amount(dec!(120000), 0, 12, Some(&driver)), Decimal::ZERO);
        assert_eq!(monthly_amount(dec!(120000), 12, 2, Some(&driver)), dec!(11000.00));
        assert_eq!(monthly_amount(dec!(120000), 24, 2, Some(&driver)), dec!(12100.00));
        assert_eq!(monthly_amount(dec!(120000), 30, 2, None), dec!(10000.00));
    }

    #[test]
    fn test_subtotals_and_taxes() {
        let a = small_plan(12);
        let ce = run(&a, &opening(), None);
        assert_eq!(ce.get(0, CeLine::Revenue), dec!(100000));
        assert_eq!(ce.get(0, CeLine::RawMaterials), dec!(-40000));
        assert_eq!(ce.get(0, CeLine::Personnel), dec!(-30000));
        assert_eq!(ce.get(0, CeLine::Ebitda), dec!(30000));
        // existing tangible NBV 12,000 at 10% → 100/month; driven 3,000 → 2,900 new
        assert_eq!(ce.get(0, CeLine::DepreciationTangibleExisting), dec!(-100));
        assert_eq!(ce.get(0, CeLine::DepreciationTangibleNew), dec!(-2900));
        assert_eq!(ce.get(0, CeLine::Ebit), dec!(27000));
        assert_eq!(ce.get(0, CeLine::FinancialCharges), dec!(-2000));
        assert_eq!(ce.get(0, CeLine::Ebt), dec!(25000));
        assert_eq!(ce.get(0, CeLine::CorporateTax), dec!(-6000));
        assert_eq!(ce.get(0, CeLine::RegionalTax), dec!(-975));
        assert_eq!(ce.get(0, CeLine::NetIncome), dec!(18025));
        assert_eq!(
            ce.get(0, CeLine::TotalProductionValue) + ce.get(0, CeLine::TotalProductionCosts),
            ce.get(0, CeLine::Ebit)
        );
    }

    #[test]
    fn test_no_tax_on_loss() {
        let mut a = small_plan(3);
        a.ce_drivers.insert(
            "REVENUE".to_string(),
            LineDriver { base_override: Some(dec!(120000)), ..LineDriver::default() },
        );
        let ce = run(&a, &opening(), None);
        assert!(ce.get(0, CeLine::Ebt) < Decimal::ZERO);
        assert_eq!(ce.get(0, CeLine::TotalTaxes), Decimal::ZERO);
        assert_eq!(ce.get(0, CeLine::NetIncome), ce.get(0, CeLine::Ebt));
    }

    #[test]
    fn test_existing_depreciation_exhausts() {
        let mut a = small_plan(24);
        a.balance_drivers.tangible_depreciation_rate = dec!(1.00);
        let ce = run(&a, &opening(), None);
        // 12,000 NBV at 1,000/month is gone after twelve periods
        assert_eq!(ce.get(11, CeLine::DepreciationTangibleExisting), dec!(-1000));
        assert_eq!(ce.get(12, CeLine::DepreciationTangibleExisting), Decimal::ZERO);
        let existing: Decimal = ce.series(CeLine::DepreciationTangibleExisting).iter().copied().sum();
        assert_eq!(existing, dec!(-12000));
        assert_eq!(ce.get(12, CeLine::DepreciationTangibleNew), dec!(-3000));
    }

    #[test]
    fn test_interest_override() {
        let a = small_plan(3);
        let mut over = InterestOverride::new();
        over.insert(1, dec!(750));
        let ce = run(&a, &opening(), Some(&over));
        assert_eq!(ce.get(0, CeLine::FinancialCharges), dec!(-2000));
        assert_eq!(ce.get(1, CeLine::FinancialCharges), dec!(-750));
    }

    #[test]
    fn test_override_keeps_scheduled_charges() {
        let mut a = small_plan(12);
        a.tax_debts.push(TaxDebt {
            id: "VAT-2023".to_string(),
            description: String::new(),
            principal: dec!(12000),
            annual_rate: dec!(0.06),
            penalties: dec!(1200),
            installments: 12,
            start_period: 0,
        });
        let mut over = InterestOverride::new();
        over.insert(0, dec!(500));
        let ce = run(&a, &opening(), Some(&over));
        // 500 override + 60 tax interest + 100 penalty
        assert_eq!(ce.get(0, CeLine::FinancialCharges), dec!(-660));
        // 2,000 driven + 60 + 100
        assert_eq!(ce.get(1, CeLine::FinancialCharges), dec!(-2000) - dec!(55) - dec!(100));
    }

    #[test]
    fn test_zero_lines_are_not_negative_zero() {
        let a = small_plan(2);
        let ce = run(&a, &OpeningBalances::default(), None);
        for row in ce.to_rows() {
            assert!(!row.amount.is_sign_negative(), "{} is negative", row.line_code);
        }
    }

    #[test]
    fn test_empty_inputs_zero_filled() {
        let a = small_plan(6);
        let ce = run(&a, &OpeningBalances::default(), None);
        assert_eq!(ce.len(), 6);
        assert!(ce.series(CeLine::NetIncome).iter().all(|v| v.is_zero()));
        assert_eq!(ce.to_rows().len(), 6 * 32);
    }

    #[test]
    fn test_idempotent() {
        let a = small_plan(24);
        assert_eq!(run(&a, &opening(), None), run(&a, &opening(), None));
    }
}
