//! Treasury (Banca) projector: direct-method monthly ledger
//!
//! Customer and supplier flows are taken gross of VAT; the net VAT position
//! is settled after the configured lag. Loan and tax-debt lines carry
//! principal only, interest being paid through the financial charges line.

use rust_decimal::Decimal;

use super::ce::CeTable;
use super::lines::{BancaLine, CeLine};
use super::opening::OpeningPosition;
use crate::assumptions::Assumptions;
use crate::auxiliary::{settle_vat, AuxLine, AuxiliaryTable};
use crate::money::round2;
use crate::statement::StatementTable;

pub type BancaTable = StatementTable<BancaLine>;

const RECEIPTS: [BancaLine; 5] = [
    BancaLine::CustomerReceipts,
    BancaLine::RentReceipts,
    BancaLine::BusinessSaleReceipts,
    BancaLine::FinancingDisbursements,
    BancaLine::AssetCollections,
];

const PAYMENTS: [BancaLine; 9] = [
    BancaLine::SupplierPayments,
    BancaLine::PersonnelPayments,
    BancaLine::OtherOperatingPayments,
    BancaLine::PreDeductionPayments,
    BancaLine::TaxPayments,
    BancaLine::VatSettlement,
    BancaLine::FinancialChargePayments,
    BancaLine::LoanInstallments,
    BancaLine::TaxDebtInstallments,
];

/// Monthly VAT payments from CE revenue, purchases and rent
fn vat_payments(ce: &CeTable, aux: &AuxiliaryTable, assumptions: &Assumptions) -> Vec<Decimal> {
    let plan = &assumptions.plan;
    let output: Vec<Decimal> = (0..ce.len())
        .map(|p| ce.get(p, CeLine::Revenue).abs() * plan.sales_vat_rate + aux.get(p, AuxLine::RentVat))
        .collect();
    let input: Vec<Decimal> = (0..ce.len())
        .map(|p| ce.sum(p, &CeLine::PURCHASES).abs() * plan.purchase_vat_rate)
        .collect();
    settle_vat(&output, &input, plan.vat_settlement_lag as usize)
}

/// Project the treasury ledger; the running balance starts from opening cash
pub fn project_banca(
    position: &OpeningPosition,
    assumptions: &Assumptions,
    ce: &CeTable,
    aux: &AuxiliaryTable,
) -> BancaTable {
    let plan = &assumptions.plan;
    let vat = vat_payments(ce, aux, assumptions);
    let mut table = BancaTable::new(ce.len());
    let mut balance = position.cash;

    for p in 0..ce.len() {
        let revenue = ce.get(p, CeLine::Revenue).abs();
        let purchases = ce.sum(p, &CeLine::PURCHASES).abs();

        table.set(p, BancaLine::CustomerReceipts, round2(revenue * (Decimal::ONE + plan.sales_vat_rate)));
        table.set(p, BancaLine::RentReceipts, aux.get(p, AuxLine::RentCollection));
        table.set(p, BancaLine::BusinessSaleReceipts, aux.get(p, AuxLine::SaleNet).max(Decimal::ZERO));
        table.set(p, BancaLine::FinancingDisbursements, aux.get(p, AuxLine::FinancingDisbursement));
        table.set(p, BancaLine::AssetCollections, aux.get(p, AuxLine::AssetCollections));

        table.set(p, BancaLine::SupplierPayments, round2(purchases * (Decimal::ONE + plan.purchase_vat_rate)));
        table.set(p, BancaLine::PersonnelPayments, ce.get(p, CeLine::Personnel).abs());
        table.set(p, BancaLine::OtherOperatingPayments, ce.get(p, CeLine::OtherOperatingCosts).abs());
        table.set(p, BancaLine::PreDeductionPayments, aux.get(p, AuxLine::PreDeductionTotal));
        table.set(p, BancaLine::TaxPayments, ce.get(p, CeLine::TotalTaxes).abs());
        table.set(p, BancaLine::VatSettlement, vat.get(p).copied().unwrap_or(Decimal::ZERO).max(Decimal::ZERO));
        table.set(p, BancaLine::FinancialChargePayments, ce.get(p, CeLine::FinancialCharges).abs());
        table.set(p, BancaLine::LoanInstallments, aux.get(p, AuxLine::FinancingPrincipal));
        table.set(p, BancaLine::TaxDebtInstallments, aux.get(p, AuxLine::TaxDebtPrincipal));

        let receipts = table.sum(p, &RECEIPTS);
        let payments = table.sum(p, &PAYMENTS);
        let net = receipts - payments;
        balance += net;

        table.set(p, BancaLine::TotalReceipts, receipts);
        table.set(p, BancaLine::TotalPayments, payments);
        table.set(p, BancaLine::NetFlow, net);
        table.set(p, BancaLine::RunningBalance, balance);
    }
    table
}
