//! Fixed-point money helpers
//!
//! All amounts are `Decimal` rounded to the minor unit (cents).

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

/// Months in a plan year
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Round to the minor unit, half away from zero; never yields negative zero
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Monthly rate from an annual fractional rate (unrounded)
pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
    annual_rate / MONTHS_PER_YEAR
}

/// Percent of `part` over `whole`, rounded to 2 dp; zero when `whole` is not positive
pub fn pct_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round2(part / whole * dec!(100))
}

/// `(1 + r)^n`, `None` when it overflows `Decimal`
pub fn compound(rate: Decimal, periods: u32) -> Option<Decimal> {
    (Decimal::ONE + rate).checked_powu(u64::from(periods))
}

/// Split `total` evenly over `parts` cents-exact; the last part absorbs the remainder
pub fn split_even(total: Decimal, parts: usize) -> Vec<Decimal> {
    if parts == 0 {
        return Vec::new();
    }
    let quota = round2(total / Decimal::from(parts as u64));
    let mut out = vec![quota; parts];
    let assigned = quota * Decimal::from((parts - 1) as u64);
    out[parts - 1] = total - assigned;
    out
}
