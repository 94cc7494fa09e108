use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculator::{ratio, sales_for};
use crate::domain::goals::{CollectionGoal, WeeklyGoalSchedule};
use crate::domain::sales::money::display_percent;
use crate::domain::sales::SaleRecord;
use crate::domain::user::value_objects::RepresentativeId;

/// One line of the weekly summary page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub percent_of_collection_goal: Decimal,
    /// Absent when the representative has no goal for the collection
    pub target_amount: Option<Decimal>,
    pub sold_in_week: Decimal,
    pub sales_count: usize,
    pub attainment: Option<Decimal>,
    pub attainment_bar: Option<Decimal>,
}

/// Summarizes every schedule row of a collection, newest week first
pub fn summarize_weeks(
    representative_id: &RepresentativeId,
    collection: &str,
    sales: &[SaleRecord],
    goal: Option<&CollectionGoal>,
    schedule: &[WeeklyGoalSchedule],
) -> Vec<WeekSummary> {
    let mut weeks: Vec<&WeeklyGoalSchedule> =
        schedule.iter().filter(|week| week.is_for(collection)).collect();
    weeks.sort_by(|a, b| b.period_start.cmp(&a.period_start));

    weeks
        .into_iter()
        .map(|week| {
            let rows = sales_in_week(representative_id, collection, week, sales);
            let sold_in_week: Decimal = rows.iter().map(|sale| sale.amount).sum();
            let target_amount =
                goal.map(|goal| goal.sales_target_amount * week.percent_of_collection_goal);
            let attainment = target_amount.map(|target| ratio(sold_in_week, target));

            WeekSummary {
                period_start: week.period_start,
                period_end: week.period_end,
                percent_of_collection_goal: week.percent_of_collection_goal,
                target_amount,
                sold_in_week,
                sales_count: rows.len(),
                attainment,
                attainment_bar: attainment.map(display_percent),
            }
        })
        .collect()
}

/// Rows of the representative dated within a schedule row
pub fn sales_in_week<'a>(
    representative_id: &RepresentativeId,
    collection: &str,
    week: &WeeklyGoalSchedule,
    sales: &'a [SaleRecord],
) -> Vec<&'a SaleRecord> {
    sales_for(sales, representative_id, collection)
        .filter(|sale| sale.dated_within(week.period_start, week.period_end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep() -> RepresentativeId {
        RepresentativeId::new("R1").unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn sale(amount: i64, day: Option<u32>) -> SaleRecord {
        SaleRecord {
            representative_id: rep(),
            client_name: "Loja".to_string(),
            city: None,
            collection: "Verão".to_string(),
            brand: None,
            quantity: Decimal::ONE,
            amount: Decimal::from(amount),
            discount: Decimal::ZERO,
            term: None,
            date: day.map(date),
        }
    }

    fn schedule() -> Vec<WeeklyGoalSchedule> {
        vec![
            WeeklyGoalSchedule::new("Verão", date(1), date(7), Decimal::new(10, 2)).unwrap(),
            WeeklyGoalSchedule::new("Verão", date(8), date(14), Decimal::new(20, 2)).unwrap(),
            WeeklyGoalSchedule::new("Inverno", date(1), date(7), Decimal::new(50, 2)).unwrap(),
        ]
    }

    #[test]
    fn weeks_are_listed_newest_first() {
        let summary = summarize_weeks(&rep(), "Verão", &[], None, &schedule());

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].period_start, date(8));
        assert_eq!(summary[1].period_start, date(1));
    }

    #[test]
    fn week_totals_and_targets() {
        let sales = vec![sale(100, Some(2)), sale(300, Some(9)), sale(50, None)];
        let goal = CollectionGoal::new(rep(), "Verão", Decimal::from(1000), Decimal::ZERO).unwrap();

        let summary = summarize_weeks(&rep(), "Verão", &sales, Some(&goal), &schedule());

        let second = &summary[0];
        assert_eq!(second.sold_in_week, Decimal::from(300));
        assert_eq!(second.target_amount, Some(Decimal::from(200)));
        assert_eq!(second.attainment, Some(Decimal::new(15, 1)));
        assert_eq!(second.attainment_bar, Some(Decimal::from(100)));

        let first = &summary[1];
        assert_eq!(first.sold_in_week, Decimal::from(100));
        assert_eq!(first.sales_count, 1);
    }

    #[test]
    fn week_rows_outlive_lookup_keys() {
        let sales = vec![sale(100, Some(2)), sale(300, Some(9))];
        let schedule = schedule();

        let rows = {
            let collection = String::from("Verão");
            let representative_id = rep();
            sales_in_week(&representative_id, &collection, &schedule[0], &sales)
        };

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, Decimal::from(100));
    }

    #[test]
    fn without_goal_targets_are_absent() {
        let summary = summarize_weeks(&rep(), "Verão", &[sale(10, Some(2))], None, &schedule());

        assert!(summary.iter().all(|week| week.target_amount.is_none()));
        assert_eq!(summary[1].sold_in_week, Decimal::from(10));
    }
}
