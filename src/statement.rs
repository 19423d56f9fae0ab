//! Line vocabularies and period-indexed tables shared by every statement

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::money::round2;

/// A fixed, enumerable line of a statement
pub trait StatementLine: Copy + Ord + Debug + Send + Sync + 'static {
    /// Every line in presentation order
    const ALL: &'static [Self];

    fn code(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn section(&self) -> &'static str;
    fn is_subtotal(&self) -> bool;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|line| line.code() == code)
    }
}

/// Declare a line enum together with its `StatementLine` table
macro_rules! statement_lines {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($code:literal, $label:literal, $section:literal, $subtotal:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $crate::statement::StatementLine for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn code(&self) -> &'static str {
                match self { $($name::$variant => $code),+ }
            }

            fn label(&self) -> &'static str {
                match self { $($name::$variant => $label),+ }
            }

            fn section(&self) -> &'static str {
                match self { $($name::$variant => $section),+ }
            }

            fn is_subtotal(&self) -> bool {
                match self { $($name::$variant => $subtotal),+ }
            }
        }
    };
}

pub(crate) use statement_lines;

/// Persisted shape of one statement line for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub period: u32,
    pub line_code: String,
    pub line_label: String,
    pub section: String,
    pub amount: Decimal,
    pub is_subtotal: bool,
}

/// Amounts per period and line; absent lines read as zero
#[derive(Debug, Clone, PartialEq)]
pub struct StatementTable<L: StatementLine> {
    periods: Vec<BTreeMap<L, Decimal>>,
}

impl<L: StatementLine> StatementTable<L> {
    pub fn new(duration: usize) -> Self {
        Self {
            periods: vec![BTreeMap::new(); duration],
        }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, period: usize, line: L) -> Decimal {
        self.periods
            .get(period)
            .and_then(|p| p.get(&line))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Store an amount rounded to the cent; out-of-range periods are ignored
    pub fn set(&mut self, period: usize, line: L, amount: Decimal) {
        if let Some(p) = self.periods.get_mut(period) {
            p.insert(line, round2(amount));
        }
    }

    pub fn add(&mut self, period: usize, line: L, amount: Decimal) {
        let current = self.get(period, line);
        self.set(period, line, current + amount);
    }

    /// Sum of several lines in one period
    pub fn sum(&self, period: usize, lines: &[L]) -> Decimal {
        lines.iter().map(|&l| self.get(period, l)).sum()
    }

    pub fn series(&self, line: L) -> Vec<Decimal> {
        (0..self.len()).map(|p| self.get(p, line)).collect()
    }

    /// Every line of every period, zero-filled, in presentation order
    pub fn to_rows(&self) -> Vec<ProjectionRow> {
        let mut rows = Vec::with_capacity(self.len() * L::ALL.len());
        for period in 0..self.len() {
            for &line in L::ALL {
                rows.push(ProjectionRow {
                    period: period as u32,
                    line_code: line.code().to_string(),
                    line_label: line.label().to_string(),
                    section: line.section().to_string(),
                    amount: self.get(period, line),
                    is_subtotal: line.is_subtotal(),
                });
            }
        }
        rows
    }

    /// Rebuild a table from persisted rows; unknown codes are skipped
    pub fn from_rows(rows: &[ProjectionRow], duration: usize) -> Self {
        let mut table = Self::new(duration);
        for row in rows {
            if let Some(line) = L::from_code(&row.line_code) {
                table.set(row.period as usize, line, row.amount);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    statement_lines! {
        pub enum TestLine {
            Alpha => ("ALPHA", "Alpha", "MAIN", false),
            Beta => ("BETA", "Beta", "MAIN", false),
            Total => ("TOTAL", "Total", "MAIN", true),
        }
    }

    #[test]
    fn test_set_rounds_and_defaults_zero() {
        let mut table = StatementTable::<TestLine>::new(2);
        table.set(0, TestLine::Alpha, dec!(10.005));
        assert_eq!(table.get(0, TestLine::Alpha), dec!(10.01));
        assert_eq!(table.get(1, TestLine::Beta), Decimal::ZERO);
        assert_eq!(table.get(5, TestLine::Beta), Decimal::ZERO);
    }

    #[test]
    fn test_rows_round_trip_through_codes() {
        let mut table = StatementTable::<TestLine>::new(2);
        table.set(0, TestLine::Alpha, dec!(1));
        table.set(1, TestLine::Total, dec!(3));
        let rows = table.to_rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[2].line_code, "TOTAL");
        assert!(rows[2].is_subtotal);
        assert_eq!(StatementTable::<TestLine>::from_rows(&rows, 2), table_with_zeros(&table));
        assert_eq!(TestLine::from_code("BETA"), Some(TestLine::Beta));
        assert_eq!(TestLine::from_code("GAMMA"), None);
    }

    fn table_with_zeros(table: &StatementTable<TestLine>) -> StatementTable<TestLine> {
        let mut full = StatementTable::new(table.len());
        for p in 0..table.len() {
            for &line in TestLine::ALL {
                full.set(p, line, table.get(p, line));
            }
        }
        full
    }
}
