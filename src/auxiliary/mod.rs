//! Auxiliary monthly series feeding the statement projectors
//!
//! Rent, business sale, procedure costs, financings, tax debts and scheduled
//! asset collections are turned into one period-indexed table that the
//! income statement, balance sheet and treasury projectors read.

pub mod business_sale;
pub mod procedure_costs;
pub mod rent;
pub mod vat;

pub use business_sale::{sale_proceeds, SaleProceeds, SaleTerms};
pub use procedure_costs::{procedure_schedule, ProcedureCostTerms, ProcedureFee};
pub use rent::{rent_schedule, RentTerms};
pub use vat::settle_vat;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{aggregate_financings, aggregate_tax_debts};
use crate::assumptions::Assumptions;
use crate::statement::{statement_lines, StatementTable};

/// Collection of a pre-existing asset (e.g. an old receivable) in a given period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledCollection {
    pub period: u32,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

statement_lines! {
    /// Lines of the auxiliary schedule table
    pub enum AuxLine {
        RentFee => ("RENT_FEE", "Rent fee", "RENT", false),
        RentVat => ("RENT_VAT", "Rent VAT", "RENT", false),
        RentTotal => ("RENT_TOTAL", "Rent invoiced", "RENT", true),
        RentCollection => ("RENT_COLLECTION", "Rent collected", "RENT", false),
        SaleGross => ("SALE_GROSS", "Sale price", "BUSINESS_SALE", false),
        SaleAssumedSeverance => ("SALE_ASSUMED_SEVERANCE", "Severance assumed by buyer", "BUSINESS_SALE", false),
        SaleAssumedDebts => ("SALE_ASSUMED_DEBTS", "Debts assumed by buyer", "BUSINESS_SALE", false),
        SaleNet => ("SALE_NET", "Net sale proceeds", "BUSINESS_SALE", true),
        ProcedureFees => ("PROCEDURE_FEES", "Procedure fees", "PRE_DEDUCTION", false),
        OperatingFund => ("OPERATING_FUND", "Operating fund", "PRE_DEDUCTION", false),
        PreDeductionTotal => ("PRE_DEDUCTION_TOTAL", "Pre-deduction payments", "PRE_DEDUCTION", true),
        FinancingDisbursement => ("FIN_DISBURSEMENT", "Financing disbursed", "FINANCING", false),
        FinancingPrincipal => ("FIN_PRINCIPAL", "Financing principal", "FINANCING", false),
        FinancingInterest => ("FIN_INTEREST", "Financing interest", "FINANCING", false),
        FinancingInstallment => ("FIN_INSTALLMENT", "Financing installment", "FINANCING", true),
        FinancingExistingPrincipal => ("FIN_EXISTING_PRINCIPAL", "Principal repaid on existing financings", "FINANCING", false),
        FinancingNewResidual => ("FIN_NEW_RESIDUAL", "Outstanding new financings", "FINANCING", false),
        TaxDebtPrincipal => ("TAX_PRINCIPAL", "Tax debt principal", "TAX_DEBT", false),
        TaxDebtInterest => ("TAX_INTEREST", "Tax debt interest", "TAX_DEBT", false),
        TaxDebtPenalty => ("TAX_PENALTY", "Tax debt penalties", "TAX_DEBT", false),
        TaxDebtInstallment => ("TAX_INSTALLMENT", "Tax debt installment", "TAX_DEBT", true),
        AssetCollections => ("ASSET_COLLECTIONS", "Scheduled asset collections", "ASSET_COLLECTIONS", false),
    }
}

pub type AuxiliaryTable = StatementTable<AuxLine>;

/// Build every auxiliary series over the plan horizon
pub fn build_auxiliary(assumptions: &Assumptions) -> AuxiliaryTable {
    let duration = assumptions.duration();
    let mut table = AuxiliaryTable::new(duration);

    for (p, month) in rent_schedule(&assumptions.rent, duration).into_iter().enumerate() {
        table.set(p, AuxLine::RentFee, month.fee);
        table.set(p, AuxLine::RentVat, month.vat);
        table.set(p, AuxLine::RentTotal, month.total);
        table.set(p, AuxLine::RentCollection, month.collection);
    }

    if let Some(sale) = sale_proceeds(&assumptions.business_sale, duration) {
        let p = sale.period as usize;
        table.set(p, AuxLine::SaleGross, sale.gross);
        table.set(p, AuxLine::SaleAssumedSeverance, sale.assumed_severance);
        table.set(p, AuxLine::SaleAssumedDebts, sale.assumed_debts);
        table.set(p, AuxLine::SaleNet, sale.net);
    }

    for (p, month) in procedure_schedule(&assumptions.procedure_costs, duration)
        .into_iter()
        .enumerate()
    {
        table.set(p, AuxLine::ProcedureFees, month.fees);
        table.set(p, AuxLine::OperatingFund, month.operating_fund);
        table.set(p, AuxLine::PreDeductionTotal, month.total());
    }

    for (p, fin) in aggregate_financings(&assumptions.financings, duration)
        .into_iter()
        .enumerate()
    {
        table.set(p, AuxLine::FinancingDisbursement, fin.disbursement);
        table.set(p, AuxLine::FinancingPrincipal, fin.principal);
        table.set(p, AuxLine::FinancingInterest, fin.interest);
        table.set(p, AuxLine::FinancingInstallment, fin.installment);
        table.set(p, AuxLine::FinancingExistingPrincipal, fin.existing_principal);
        table.set(p, AuxLine::FinancingNewResidual, fin.new_residual);
    }

    for (p, tax) in aggregate_tax_debts(&assumptions.tax_debts, duration)
        .into_iter()
        .enumerate()
    {
        table.set(p, AuxLine::TaxDebtPrincipal, tax.principal);
        table.set(p, AuxLine::TaxDebtInterest, tax.interest);
        table.set(p, AuxLine::TaxDebtPenalty, tax.penalty);
        table.set(p, AuxLine::TaxDebtInstallment, tax.installment);
    }

    for collection in &assumptions.asset_collections {
        table.add(collection.period as usize, AuxLine::AssetCollections, collection.amount);
    }

    table
}
