//! Business lease rent received by the company

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::{round2, MONTHS_PER_YEAR};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RentTerms {
    pub annual_fee: Decimal,
    pub vat_rate: Decimal,
    /// Months between invoicing and collection
    pub collection_lag: u32,
    /// First period invoiced (inclusive)
    pub start_period: u32,
    /// Last period invoiced (inclusive)
    pub end_period: u32,
}

impl Default for RentTerms {
    fn default() -> Self {
        Self {
            annual_fee: Decimal::ZERO,
            vat_rate: dec!(0.22),
            collection_lag: 1,
            start_period: 1,
            end_period: 120,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentMonth {
    pub fee: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
    pub collection: Decimal,
}

/// Monthly invoicing and lagged collections
pub fn rent_schedule(terms: &RentTerms, duration: usize) -> Vec<RentMonth> {
    let mut months = vec![RentMonth::default(); duration];
    if terms.annual_fee <= Decimal::ZERO {
        return months;
    }
    let fee = round2(terms.annual_fee / MONTHS_PER_YEAR);
    let vat = round2(fee * terms.vat_rate);

    for (period, month) in months.iter_mut().enumerate() {
        let period = period as u32;
        if (terms.start_period..=terms.end_period).contains(&period) {
            month.fee = fee;
            month.vat = vat;
            month.total = fee + vat;
        }
    }
    let lag = terms.collection_lag as usize;
    for period in lag..duration {
        months[period].collection = months[period - lag].total;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_window_and_lag() {
        let terms = RentTerms {
            annual_fee: dec!(60000),
            vat_rate: dec!(0.22),
            collection_lag: 2,
            start_period: 1,
            end_period: 3,
        };
        let months = rent_schedule(&terms, 8);
        assert_eq!(months[0].fee, Decimal::ZERO);
        assert_eq!(months[1].fee, dec!(5000.00));
        assert_eq!(months[1].vat, dec!(1100.00));
        assert_eq!(months[1].total, dec!(6100.00));
        assert_eq!(months[4].fee, Decimal::ZERO);
        assert_eq!(months[2].collection, Decimal::ZERO);
        assert_eq!(months[3].collection, dec!(6100.00));
        assert_eq!(months[5].collection, dec!(6100.00));
        assert_eq!(months[6].collection, Decimal::ZERO);
    }

    #[test]
    fn test_no_fee_no_rows() {
        let months = rent_schedule(&RentTerms::default(), 12);
        assert!(months.iter().all(|m| *m == RentMonth::default()));
    }
}
