//! Plan timeline: ordered monthly periods from a start month

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// Longest supported plan horizon in months
pub const MAX_DURATION: u32 = 120;

/// One month of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Zero-based period index
    pub index: u32,
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Display label such as `Jan-2025`
    pub label: String,
    /// Sortable key `YYYYMM`
    pub key: u32,
    /// Calendar quarter, 1-4
    pub quarter: u32,
    pub is_year_end: bool,
}

impl Period {
    /// Zero-based plan year this period falls in (periods 0-11 are year 0)
    pub fn plan_year(&self) -> u32 {
        self.index / 12
    }

    /// Closes a plan year (every 12th period)
    pub fn closes_plan_year(&self) -> bool {
        (self.index + 1) % 12 == 0
    }
}

/// Ordered list of plan periods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub periods: Vec<Period>,
}

impl Timeline {
    /// Build `duration` consecutive months starting at `start_year`/`start_month`
    pub fn build(start_year: i32, start_month: u32, duration: u32) -> PlanResult<Self> {
        if !(1..=12).contains(&start_month) {
            return Err(PlanError::InvalidTimeline(format!(
                "start month {} outside 1-12",
                start_month
            )));
        }
        if duration == 0 || duration > MAX_DURATION {
            return Err(PlanError::InvalidTimeline(format!(
                "duration {} outside 1-{}",
                duration, MAX_DURATION
            )));
        }
        let start = NaiveDate::from_ymd_opt(start_year, start_month, 1).ok_or_else(|| {
            PlanError::InvalidTimeline(format!("invalid start {}-{}", start_year, start_month))
        })?;

        let mut periods = Vec::with_capacity(duration as usize);
        for index in 0..duration {
            let date = start
                .checked_add_months(Months::new(index))
                .ok_or_else(|| PlanError::InvalidTimeline("date overflow".to_string()))?;
            let (year, month) = (date.year(), date.month());
            periods.push(Period {
                index,
                year,
                month,
                label: date.format("%b-%Y").to_string(),
                key: year as u32 * 100 + month,
                quarter: (month - 1) / 3 + 1,
                is_year_end: month == 12,
            });
        }
        Ok(Self { periods })
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Period> {
        self.periods.iter()
    }

    pub fn get(&self, index: u32) -> Option<&Period> {
        self.periods.get(index as usize)
    }
}
