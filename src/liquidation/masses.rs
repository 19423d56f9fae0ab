//! Liquidation masses and the per-mass amounts drawn from them

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::round2;

/// Pools of realizable assets in a judicial liquidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mass {
    /// Mass 1: real estate
    #[serde(rename = "MASS_1", alias = "REAL_ESTATE")]
    RealEstate,
    /// Mass 2: movables, receivables, inventory
    #[serde(rename = "MASS_2", alias = "MOVABLE")]
    Movable,
    /// Mass 3: cash and liquid funds
    #[serde(rename = "MASS_3", alias = "GENERAL")]
    General,
}

impl Mass {
    pub const ALL: [Mass; 3] = [Mass::RealEstate, Mass::Movable, Mass::General];

    pub fn number(&self) -> u8 {
        match self {
            Mass::RealEstate => 1,
            Mass::Movable => 2,
            Mass::General => 3,
        }
    }
}

/// One amount per mass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassAmounts {
    pub mass_1: Decimal,
    pub mass_2: Decimal,
    pub mass_3: Decimal,
}

impl MassAmounts {
    pub fn get(&self, mass: Mass) -> Decimal {
        match mass {
            Mass::RealEstate => self.mass_1,
            Mass::Movable => self.mass_2,
            Mass::General => self.mass_3,
        }
    }

    pub fn get_mut(&mut self, mass: Mass) -> &mut Decimal {
        match mass {
            Mass::RealEstate => &mut self.mass_1,
            Mass::Movable => &mut self.mass_2,
            Mass::General => &mut self.mass_3,
        }
    }

    pub fn total(&self) -> Decimal {
        self.mass_1 + self.mass_2 + self.mass_3
    }

    /// Each mass scaled by `rate`, rounded per mass
    pub fn scaled(&self, rate: Decimal) -> Self {
        Self {
            mass_1: round2(self.mass_1 * rate),
            mass_2: round2(self.mass_2 * rate),
            mass_3: round2(self.mass_3 * rate),
        }
    }

    pub fn minus(&self, other: &Self) -> Self {
        Self {
            mass_1: self.mass_1 - other.mass_1,
            mass_2: self.mass_2 - other.mass_2,
            mass_3: self.mass_3 - other.mass_3,
        }
    }

    /// Each mass floored at zero
    pub fn floored(&self) -> Self {
        Self {
            mass_1: self.mass_1.max(Decimal::ZERO),
            mass_2: self.mass_2.max(Decimal::ZERO),
            mass_3: self.mass_3.max(Decimal::ZERO),
        }
    }

    pub fn negated(&self) -> Self {
        Self::default().minus(self)
    }
}

/// Pay up to `credit` from the masses in `order`, depleting `available` in place
pub fn draw_in_order(credit: Decimal, available: &mut MassAmounts, order: &[Mass]) -> MassAmounts {
    let mut paid = MassAmounts::default();
    let mut remaining = credit.max(Decimal::ZERO);
    for &mass in order {
        if remaining <= Decimal::ZERO {
            break;
        }
        let balance = available.get_mut(mass);
        let payment = remaining.min(*balance).max(Decimal::ZERO);
        *balance -= payment;
        *paid.get_mut(mass) += payment;
        remaining -= payment;
    }
    paid
}

/// Pay up to `credit` across all masses in proportion to their balances.
///
/// The first two shares are rounded to the cent, the third takes the
/// remainder. Every share stays within `[0, balance]`; a negative balance
/// counts as empty.
pub fn draw_pro_rata(credit: Decimal, available: &mut MassAmounts) -> MassAmounts {
    let balances = available.floored();
    let total = balances.total();
    if total <= Decimal::ZERO || credit <= Decimal::ZERO {
        return MassAmounts::default();
    }
    let amount = credit.min(total);
    let share = |balance: Decimal| round2(amount * balance / total).min(balance);
    let mass_1 = share(balances.mass_1);
    let mass_2 = share(balances.mass_2);
    let mass_3 = (amount - mass_1 - mass_2).max(Decimal::ZERO).min(balances.mass_3);
    let paid = MassAmounts { mass_1, mass_2, mass_3 };
    *available = available.minus(&paid);
    paid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn masses(m1: Decimal, m2: Decimal, m3: Decimal) -> MassAmounts {
        MassAmounts { mass_1: m1, mass_2: m2, mass_3: m3 }
    }

    #[test]
    fn test_draw_in_order_spills_over() {
        let mut available = masses(dec!(10000), dec!(45000), Decimal::ZERO);
        let paid = draw_in_order(
            dec!(60000),
            &mut available,
            &[Mass::Movable, Mass::RealEstate, Mass::General],
        );
        assert_eq!(paid, masses(dec!(10000), dec!(45000), Decimal::ZERO));
        assert_eq!(available.total(), Decimal::ZERO);
    }

    #[test]
    fn test_draw_pro_rata() {
        let mut available = masses(dec!(90000), dec!(45000), dec!(18000));
        let paid = draw_pro_rata(dec!(30600), &mut available);
        assert_eq!(paid, masses(dec!(18000), dec!(9000), dec!(3600)));
        assert_eq!(available, masses(dec!(72000), dec!(36000), dec!(14400)));
    }

    #[test]
    fn test_pro_rata_capped_at_total() {
        let mut available = masses(dec!(100), dec!(100), dec!(100));
        let paid = draw_pro_rata(dec!(1000), &mut available);
        assert_eq!(paid.total(), dec!(300));
        assert_eq!(available.total(), Decimal::ZERO);
    }

    #[test]
    fn test_pro_rata_ignores_negative_mass() {
        let mut available = masses(dec!(90000), Decimal::ZERO, dec!(-45000));
        let paid = draw_pro_rata(dec!(45000), &mut available);
        assert_eq!(paid, masses(dec!(45000), Decimal::ZERO, Decimal::ZERO));
        assert_eq!(available.mass_1, dec!(45000));
        assert_eq!(available.mass_3, dec!(-45000));
    }

    #[test]
    fn test_mass_serde_names() {
        assert_eq!(serde_json::to_string(&Mass::General).unwrap(), "\"MASS_3\"");
        let mass: Mass = serde_json::from_str("\"REAL_ESTATE\"").unwrap();
        assert_eq!(mass, Mass::RealEstate);
    }
}
