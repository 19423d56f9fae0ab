//! Income-statement and balance-sheet drivers

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::MONTHS_PER_YEAR;

/// Growth and seasonality for one income-statement line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineDriver {
    /// Annual growth per plan year; the last rate repeats for later years
    pub growth_rates: Vec<Decimal>,
    /// Twelve monthly weights by calendar month, January first
    pub seasonality: Vec<Decimal>,
    /// Replaces the opening annual amount when set
    pub base_override: Option<Decimal>,
}

impl LineDriver {
    /// Growth rate applied to move from plan year `year` to the next
    pub fn growth_for_year(&self, year: usize) -> Decimal {
        match self.growth_rates.len() {
            0 => Decimal::ZERO,
            n => self.growth_rates[year.min(n - 1)],
        }
    }

    /// Weight for a calendar month (1-12), normalized so the year sums to 12
    pub fn seasonality_factor(&self, month: u32) -> Decimal {
        if self.seasonality.len() != 12 || !(1..=12).contains(&month) {
            return Decimal::ONE;
        }
        let total: Decimal = self.seasonality.iter().copied().sum();
        if total.is_zero() {
            return Decimal::ONE;
        }
        self.seasonality[(month - 1) as usize] * MONTHS_PER_YEAR / total
    }
}

/// Working-capital, debt and depreciation drivers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceDrivers {
    /// Days sales outstanding
    pub dso: Decimal,
    /// Days payable outstanding
    pub dpo: Decimal,
    /// Days inventory outstanding
    pub dio: Decimal,
    /// Share of opening debt classified short term
    pub short_term_debt_share: Decimal,
    /// Blended annual rate on medium/long-term debt
    pub debt_interest_rate: Decimal,
    /// Annual rate depleting the opening tangible net book value
    pub tangible_depreciation_rate: Decimal,
    /// Annual rate depleting the opening intangible net book value
    pub intangible_depreciation_rate: Decimal,
}

impl Default for BalanceDrivers {
    fn default() -> Self {
        Self {
            dso: dec!(60),
            dpo: dec!(60),
            dio: dec!(30),
            short_term_debt_share: dec!(0.40),
            debt_interest_rate: dec!(0.03),
            tangible_depreciation_rate: dec!(0.10),
            intangible_depreciation_rate: dec!(0.20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_repeats_last_rate() {
        let driver = LineDriver {
            growth_rates: vec![dec!(0.10), dec!(0.05)],
            ..LineDriver::default()
        };
        assert_eq!(driver.growth_for_year(0), dec!(0.10));
        assert_eq!(driver.growth_for_year(1), dec!(0.05));
        assert_eq!(driver.growth_for_year(7), dec!(0.05));
        assert_eq!(LineDriver::default().growth_for_year(3), Decimal::ZERO);
    }

    #[test]
    fn test_seasonality_normalized_to_twelve() {
        let mut weights = vec![dec!(1); 12];
        weights[11] = dec!(3);
        let driver = LineDriver { seasonality: weights, ..LineDriver::default() };
        let total: Decimal = (1..=12).map(|m| driver.seasonality_factor(m)).sum();
        assert_eq!(total.round_dp(10), dec!(12));
        assert_eq!(driver.seasonality_factor(1), dec!(12) / dec!(14));
    }

    #[test]
    fn test_seasonality_fallbacks() {
        let short = LineDriver { seasonality: vec![dec!(2); 6], ..LineDriver::default() };
        assert_eq!(short.seasonality_factor(3), Decimal::ONE);
        let zero = LineDriver { seasonality: vec![Decimal::ZERO; 12], ..LineDriver::default() };
        assert_eq!(zero.seasonality_factor(3), Decimal::ONE);
    }
}
