use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::text::same_name;

/// Fraction of a collection goal that should be reached within a date range
///
/// # Invariants
/// - `period_start <= period_end`
/// - `percent_of_collection_goal` is a non-negative fraction (0.25 = 25%)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyGoalSchedule {
    pub collection: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub percent_of_collection_goal: Decimal,
}

impl WeeklyGoalSchedule {
    pub fn new(
        collection: impl Into<String>,
        period_start: NaiveDate,
        period_end: NaiveDate,
        percent_of_collection_goal: Decimal,
    ) -> Result<Self, String> {
        let collection = collection.into().trim().to_string();
        if collection.is_empty() {
            return Err("Collection cannot be empty".to_string());
        }
        if period_start > period_end {
            return Err(format!(
                "Week starts after it ends: {} > {}",
                period_start, period_end
            ));
        }
        if percent_of_collection_goal < Decimal::ZERO {
            return Err("Weekly percentage cannot be negative".to_string());
        }

        Ok(Self {
            collection,
            period_start,
            period_end,
            percent_of_collection_goal,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.period_start <= date && date <= self.period_end
    }

    pub fn is_for(&self, collection: &str) -> bool {
        same_name(&self.collection, collection)
    }
}

/// Reads a percentage cell: values above 1 are percent points (`25` is 25%),
/// values in `[0, 1]` are already fractions
pub fn normalize_percent(raw: Decimal) -> Decimal {
    if raw > Decimal::ONE {
        raw / Decimal::ONE_HUNDRED
    } else {
        raw
    }
}

/// Finds the schedule row of `collection` whose range contains `as_of`
///
/// Overlapping rows are not rejected by the data; the earliest
/// `period_start` wins.
pub fn active_week<'a>(
    schedule: &'a [WeeklyGoalSchedule],
    collection: &str,
    as_of: NaiveDate,
) -> Option<&'a WeeklyGoalSchedule> {
    schedule
        .iter()
        .filter(|week| week.is_for(collection) && week.contains(as_of))
        .min_by_key(|week| week.period_start)
}

/// Finds the schedule row of `collection` starting on `start`
pub fn week_starting<'a>(
    schedule: &'a [WeeklyGoalSchedule],
    collection: &str,
    start: NaiveDate,
) -> Option<&'a WeeklyGoalSchedule> {
    schedule
        .iter()
        .find(|week| week.is_for(collection) && week.period_start == start)
}
