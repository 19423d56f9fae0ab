//! Periodic VAT settlement

use rust_decimal::Decimal;

use crate::money::round2;

/// Net VAT payable per period, paid `lag` periods after accrual.
///
/// A negative net position is carried forward as credit against later
/// periods and never produces a payment. Payments falling past the horizon
/// are dropped.
pub fn settle_vat(output_vat: &[Decimal], input_vat: &[Decimal], lag: usize) -> Vec<Decimal> {
    let duration = output_vat.len().max(input_vat.len());
    let mut payments = vec![Decimal::ZERO; duration];
    let mut credit = Decimal::ZERO;

    for period in 0..duration {
        let output = output_vat.get(period).copied().unwrap_or(Decimal::ZERO);
        let input = input_vat.get(period).copied().unwrap_or(Decimal::ZERO);
        let net = output - input - credit;
        if net > Decimal::ZERO {
            credit = Decimal::ZERO;
            if let Some(payment) = payments.get_mut(period + lag) {
                *payment += round2(net);
            }
        } else {
            credit = -net;
        }
    }
    payments
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lagged_payment() {
        let payments = settle_vat(&[dec!(220), dec!(220), dec!(220)], &[dec!(20), dec!(20), dec!(20)], 1);
        assert_eq!(payments, vec![Decimal::ZERO, dec!(200), dec!(200)]);
    }

    #[test]
    fn test_credit_carries_forward() {
        let payments = settle_vat(
            &[dec!(100), dec!(100), dec!(100), dec!(100)],
            &[dec!(300), dec!(50), dec!(50), dec!(0)],
            0,
        );
        // the opening credit absorbs every later net debit
        assert_eq!(payments, vec![Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO]);
        let payments = settle_vat(&[dec!(100), dec!(300)], &[dec!(150), dec!(0)], 0);
        assert_eq!(payments, vec![Decimal::ZERO, dec!(250)]);
    }
}
