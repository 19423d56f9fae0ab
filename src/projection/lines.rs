//! Line vocabularies of the projected statements

use crate::statement::statement_lines;

statement_lines! {
    /// Income statement (CE); costs are stored negative
    pub enum CeLine {
        Revenue => ("REVENUE", "Revenue from sales and services", "PRODUCTION_VALUE", false),
        FinishedGoodsChange => ("FINISHED_GOODS_CHANGE", "Change in finished goods", "PRODUCTION_VALUE", false),
        RawMaterialsChange => ("RAW_MATERIALS_CHANGE", "Change in raw materials", "PRODUCTION_VALUE", false),
        CapitalizedCosts => ("CAPITALIZED_COSTS", "Own work capitalized", "PRODUCTION_VALUE", false),
        RentIncome => ("RENT_INCOME", "Business lease rent", "PRODUCTION_VALUE", false),
        TotalProductionValue => ("TOTAL_PRODUCTION_VALUE", "Total value of production (A)", "PRODUCTION_VALUE", true),
        RawMaterials => ("RAW_MATERIALS", "Raw materials and goods", "PRODUCTION_COSTS", false),
        Services => ("SERVICES", "Services", "PRODUCTION_COSTS", false),
        ThirdPartyAssets => ("THIRD_PARTY_ASSETS", "Use of third-party assets", "PRODUCTION_COSTS", false),
        Personnel => ("PERSONNEL", "Personnel costs", "PRODUCTION_COSTS", false),
        DepreciationIntangibleExisting => ("DEPR_INTANGIBLE_EXISTING", "Amortization of existing intangibles", "PRODUCTION_COSTS", false),
        DepreciationIntangibleNew => ("DEPR_INTANGIBLE_NEW", "Amortization of new intangibles", "PRODUCTION_COSTS", false),
        DepreciationTangibleExisting => ("DEPR_TANGIBLE_EXISTING", "Depreciation of existing tangibles", "PRODUCTION_COSTS", false),
        DepreciationTangibleNew => ("DEPR_TANGIBLE_NEW", "Depreciation of new tangibles", "PRODUCTION_COSTS", false),
        Provisions => ("PROVISIONS", "Provisions for risks", "PRODUCTION_COSTS", false),
        OtherOperatingCosts => ("OTHER_OPERATING_COSTS", "Other operating costs", "PRODUCTION_COSTS", false),
        TotalProductionCosts => ("TOTAL_PRODUCTION_COSTS", "Total costs of production (B)", "PRODUCTION_COSTS", true),
        Ebitda => ("EBITDA", "EBITDA", "MARGINS", true),
        TotalDepreciation => ("TOTAL_DEPRECIATION", "Total depreciation and provisions", "MARGINS", true),
        Ebit => ("EBIT", "Operating result (A-B)", "MARGINS", true),
        FinancialIncome => ("FINANCIAL_INCOME", "Financial income", "FINANCIAL", false),
        FinancialCharges => ("FINANCIAL_CHARGES", "Financial charges", "FINANCIAL", false),
        FinancialResult => ("FINANCIAL_RESULT", "Financial result (C)", "FINANCIAL", true),
        ExtraordinaryIncome => ("EXTRAORDINARY_INCOME", "Extraordinary income", "EXTRAORDINARY", false),
        ExtraordinaryCharges => ("EXTRAORDINARY_CHARGES", "Extraordinary charges", "EXTRAORDINARY", false),
        ProcedureCosts => ("PROCEDURE_COSTS", "Procedure costs in pre-deduction", "EXTRAORDINARY", false),
        ExtraordinaryResult => ("EXTRAORDINARY_RESULT", "Extraordinary result (D)", "EXTRAORDINARY", true),
        Ebt => ("EBT", "Result before taxes", "RESULT", true),
        CorporateTax => ("CORPORATE_TAX", "Corporate income tax", "TAXES", false),
        RegionalTax => ("REGIONAL_TAX", "Regional production tax", "TAXES", false),
        TotalTaxes => ("TOTAL_TAXES", "Total taxes (E)", "TAXES", true),
        NetIncome => ("NET_INCOME", "Net income", "RESULT", true),
    }
}

impl CeLine {
    /// Lines projected from an opening annual amount, with the sign they are stored with
    pub const BASE_LINES: [(CeLine, i8); 14] = [
        (CeLine::Revenue, 1),
        (CeLine::FinishedGoodsChange, 1),
        (CeLine::RawMaterialsChange, 1),
        (CeLine::CapitalizedCosts, 1),
        (CeLine::RawMaterials, -1),
        (CeLine::Services, -1),
        (CeLine::ThirdPartyAssets, -1),
        (CeLine::Personnel, -1),
        (CeLine::Provisions, -1),
        (CeLine::OtherOperatingCosts, -1),
        (CeLine::FinancialIncome, 1),
        (CeLine::FinancialCharges, -1),
        (CeLine::ExtraordinaryIncome, 1),
        (CeLine::ExtraordinaryCharges, -1),
    ];

    pub const DEPRECIATION: [CeLine; 4] = [
        CeLine::DepreciationIntangibleExisting,
        CeLine::DepreciationIntangibleNew,
        CeLine::DepreciationTangibleExisting,
        CeLine::DepreciationTangibleNew,
    ];

    /// Costs paid to suppliers and subject to input VAT
    pub const PURCHASES: [CeLine; 3] = [CeLine::RawMaterials, CeLine::Services, CeLine::ThirdPartyAssets];
}

statement_lines! {
    /// Balance sheet (SP); every amount is stored positive
    pub enum SpLine {
        Cash => ("CASH", "Cash and bank", "CURRENT_ASSETS", false),
        Receivables => ("RECEIVABLES", "Trade receivables", "CURRENT_ASSETS", false),
        Inventory => ("INVENTORY", "Inventory", "CURRENT_ASSETS", false),
        AccruedIncome => ("ACCRUED_INCOME", "Accrued income and prepaid expenses", "CURRENT_ASSETS", false),
        TotalCurrentAssets => ("TOTAL_CURRENT_ASSETS", "Total current assets", "CURRENT_ASSETS", true),
        IntangibleAssets => ("INTANGIBLE_ASSETS", "Intangible assets", "FIXED_ASSETS", false),
        TangibleAssets => ("TANGIBLE_ASSETS", "Tangible assets", "FIXED_ASSETS", false),
        FinancialAssets => ("FINANCIAL_ASSETS", "Financial fixed assets", "FIXED_ASSETS", false),
        LeasedAssets => ("LEASED_ASSETS", "Leased assets", "FIXED_ASSETS", false),
        TotalFixedAssets => ("TOTAL_FIXED_ASSETS", "Total fixed assets", "FIXED_ASSETS", true),
        TotalAssets => ("TOTAL_ASSETS", "TOTAL ASSETS", "TOTAL", true),
        ShortTermDebt => ("SHORT_TERM_DEBT", "Short-term debt", "CURRENT_LIABILITIES", false),
        TradePayables => ("TRADE_PAYABLES", "Trade payables", "CURRENT_LIABILITIES", false),
        TotalCurrentLiabilities => ("TOTAL_CURRENT_LIABILITIES", "Total current liabilities", "CURRENT_LIABILITIES", true),
        LongTermDebt => ("LONG_TERM_DEBT", "Medium/long-term debt", "LONG_TERM_LIABILITIES", false),
        ProvisionFunds => ("PROVISION_FUNDS", "Severance and risk funds", "LONG_TERM_LIABILITIES", false),
        TotalLongTermLiabilities => ("TOTAL_LONG_TERM_LIABILITIES", "Total medium/long-term liabilities", "LONG_TERM_LIABILITIES", true),
        ShareCapital => ("SHARE_CAPITAL", "Share capital", "EQUITY", false),
        Reserves => ("RESERVES", "Reserves", "EQUITY", false),
        RetainedEarnings => ("RETAINED_EARNINGS", "Retained earnings", "EQUITY", false),
        CurrentResult => ("CURRENT_RESULT", "Result for the year", "EQUITY", false),
        TotalEquity => ("TOTAL_EQUITY", "Total equity", "EQUITY", true),
        TotalLiabilitiesAndEquity => ("TOTAL_LIABILITIES_AND_EQUITY", "TOTAL LIABILITIES AND EQUITY", "TOTAL", true),
    }
}

statement_lines! {
    /// Indirect-method cash flow (CFlow)
    pub enum CflowLine {
        NetIncome => ("NET_INCOME", "Net income", "OPERATING", false),
        DepreciationAddBack => ("DEPRECIATION", "Depreciation add-back", "OPERATING", false),
        ReceivablesChange => ("RECEIVABLES_CHANGE", "Change in receivables", "OPERATING", false),
        InventoryChange => ("INVENTORY_CHANGE", "Change in inventory", "OPERATING", false),
        PayablesChange => ("PAYABLES_CHANGE", "Change in trade payables", "OPERATING", false),
        ProvisionFundsChange => ("PROVISION_FUNDS_CHANGE", "Change in severance and risk funds", "OPERATING", false),
        OperatingCashFlow => ("OPERATING_CASH_FLOW", "Operating cash flow", "OPERATING", true),
        FixedAssetInvestment => ("FIXED_ASSET_INVESTMENT", "Net investment in fixed assets", "INVESTING", false),
        InvestingCashFlow => ("INVESTING_CASH_FLOW", "Investing cash flow", "INVESTING", true),
        ShortTermDebtChange => ("SHORT_TERM_DEBT_CHANGE", "Change in short-term debt", "FINANCING", false),
        LongTermDebtChange => ("LONG_TERM_DEBT_CHANGE", "Change in medium/long-term debt", "FINANCING", false),
        EquityChange => ("EQUITY_CHANGE", "Change in capital and reserves", "FINANCING", false),
        FinancingCashFlow => ("FINANCING_CASH_FLOW", "Financing cash flow", "FINANCING", true),
        NetCashFlow => ("NET_CASH_FLOW", "Net cash flow", "NET", true),
        OpeningCash => ("OPENING_CASH", "Opening cash", "NET", false),
        ClosingCash => ("CLOSING_CASH", "Closing cash", "NET", false),
    }
}

statement_lines! {
    /// Direct-method treasury ledger (Banca); receipts and payments stored positive
    pub enum BancaLine {
        CustomerReceipts => ("CUSTOMER_RECEIPTS", "Collections from customers", "RECEIPTS", false),
        RentReceipts => ("RENT_RECEIPTS", "Business lease rent collected", "RECEIPTS", false),
        BusinessSaleReceipts => ("BUSINESS_SALE_RECEIPTS", "Business sale proceeds", "RECEIPTS", false),
        FinancingDisbursements => ("FINANCING_DISBURSEMENTS", "New financing disbursed", "RECEIPTS", false),
        AssetCollections => ("ASSET_COLLECTIONS", "Scheduled asset collections", "RECEIPTS", false),
        TotalReceipts => ("TOTAL_RECEIPTS", "Total receipts", "RECEIPTS", true),
        SupplierPayments => ("SUPPLIER_PAYMENTS", "Payments to suppliers", "PAYMENTS", false),
        PersonnelPayments => ("PERSONNEL_PAYMENTS", "Personnel payments", "PAYMENTS", false),
        OtherOperatingPayments => ("OTHER_OPERATING_PAYMENTS", "Other operating payments", "PAYMENTS", false),
        PreDeductionPayments => ("PRE_DEDUCTION_PAYMENTS", "Pre-deduction payments", "PAYMENTS", false),
        TaxPayments => ("TAX_PAYMENTS", "Income tax payments", "PAYMENTS", false),
        VatSettlement => ("VAT_SETTLEMENT", "VAT settlement", "PAYMENTS", false),
        FinancialChargePayments => ("FINANCIAL_CHARGE_PAYMENTS", "Financial charges paid", "PAYMENTS", false),
        LoanInstallments => ("LOAN_INSTALLMENTS", "Loan principal repaid", "PAYMENTS", false),
        TaxDebtInstallments => ("TAX_DEBT_INSTALLMENTS", "Tax debt principal repaid", "PAYMENTS", false),
        TotalPayments => ("TOTAL_PAYMENTS", "Total payments", "PAYMENTS", true),
        NetFlow => ("NET_FLOW", "Net flow for the period", "BALANCES", true),
        RunningBalance => ("RUNNING_BALANCE", "Running balance", "BALANCES", true),
    }
}
