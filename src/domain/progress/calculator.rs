use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::report::{
    GoalAttainment, ProgressReport, SalesTotals, StandingGoal, TicketAverage, TicketSource,
    WeeklyGoal, WeeklyTarget,
};
use crate::domain::goals::{active_week, CollectionGoal, WeeklyGoalSchedule};
use crate::domain::sales::SaleRecord;
use crate::domain::user::value_objects::RepresentativeId;

/// `numerator / denominator`, or zero when the denominator is not positive
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator / denominator
    } else {
        Decimal::ZERO
    }
}

/// `max(target - achieved, 0)`
pub fn remaining(target: Decimal, achieved: Decimal) -> Decimal {
    (target - achieved).max(Decimal::ZERO)
}

/// Rows of one representative for one collection
///
/// The yielded rows borrow only from `sales`, so they outlive the filter keys.
pub fn sales_for<'s, 'k>(
    sales: &'s [SaleRecord],
    representative_id: &'k RepresentativeId,
    collection: &'k str,
) -> impl Iterator<Item = &'s SaleRecord> + 'k
where
    's: 'k,
{
    sales
        .iter()
        .filter(move |sale| sale.belongs_to(representative_id, collection))
}

/// Total amount and distinct client count over a set of rows
pub fn totals<'a>(rows: impl IntoIterator<Item = &'a SaleRecord>) -> SalesTotals {
    let mut total_sold = Decimal::ZERO;
    let mut clients = HashSet::new();
    for sale in rows {
        total_sold += sale.amount;
        clients.insert(sale.client_key());
    }

    SalesTotals {
        total_sold,
        clients_served: clients.len() as u64,
    }
}

/// Attainment against a standing goal
pub fn attainment(goal: &CollectionGoal, totals: &SalesTotals) -> GoalAttainment {
    let served = Decimal::from(totals.clients_served);

    GoalAttainment {
        sales_target_amount: goal.sales_target_amount,
        client_count_target: goal.client_count_target,
        attainment: ratio(totals.total_sold, goal.sales_target_amount),
        client_attainment: ratio(served, goal.client_count_target),
        remaining_amount: remaining(goal.sales_target_amount, totals.total_sold),
        remaining_clients: remaining(goal.client_count_target, served),
    }
}

/// Expected deal size used to turn a remaining amount into a client count
///
/// The planned average (goal amount over client target) is preferred; it
/// falls back to the observed average (sold over clients served, at least
/// one) only when the goal has no client target.
pub fn ticket_average(goal: &CollectionGoal, totals: &SalesTotals) -> TicketAverage {
    if goal.client_count_target > Decimal::ZERO {
        TicketAverage {
            value: goal.sales_target_amount / goal.client_count_target,
            source: TicketSource::Planned,
        }
    } else {
        let served = Decimal::from(totals.clients_served.max(1));
        TicketAverage {
            value: totals.total_sold / served,
            source: TicketSource::Observed,
        }
    }
}

/// `ceil(remaining / ticket)`, undefined for a non-positive ticket
pub fn clients_needed(remaining_amount: Decimal, ticket: Decimal) -> Option<u64> {
    if ticket <= Decimal::ZERO {
        return None;
    }
    (remaining_amount.max(Decimal::ZERO) / ticket).ceil().to_u64()
}

/// Builds the weekly sub-goal for one schedule row
pub fn weekly_target(
    week: &WeeklyGoalSchedule,
    goal: &CollectionGoal,
    totals: &SalesTotals,
    scoped_sales: &[&SaleRecord],
) -> WeeklyTarget {
    let target_amount = goal.sales_target_amount * week.percent_of_collection_goal;
    let sold_in_week: Decimal = scoped_sales
        .iter()
        .filter(|sale| sale.dated_within(week.period_start, week.period_end))
        .map(|sale| sale.amount)
        .sum();
    let remaining_amount = remaining(target_amount, sold_in_week);
    let ticket = ticket_average(goal, totals);

    WeeklyTarget {
        period_start: week.period_start,
        period_end: week.period_end,
        percent_of_collection_goal: week.percent_of_collection_goal,
        target_amount,
        sold_in_week,
        attainment: ratio(sold_in_week, target_amount),
        remaining_amount,
        ticket_average: ticket,
        clients_needed: clients_needed(remaining_amount, ticket.value),
    }
}

/// Computes standing and weekly progress for a representative
///
/// Pure: works only on the rows it is given. Undated sales count for the
/// standing goal but never for a week.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use diario_bordo_api::domain::goals::CollectionGoal;
/// use diario_bordo_api::domain::progress::{compute_progress, StandingGoal};
/// use diario_bordo_api::domain::user::RepresentativeId;
/// use rust_decimal::Decimal;
///
/// let rep = RepresentativeId::new("R1").unwrap();
/// let goal = CollectionGoal::new(rep.clone(), "Verão", Decimal::from(1000), Decimal::ZERO).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
///
/// let report = compute_progress(&rep, "Verão", as_of, &[], Some(&goal), &[]);
/// match report.standing {
///     StandingGoal::Configured(g) => assert_eq!(g.remaining_amount, Decimal::from(1000)),
///     StandingGoal::NotConfigured => unreachable!(),
/// }
/// ```
pub fn compute_progress(
    representative_id: &RepresentativeId,
    collection: &str,
    as_of: NaiveDate,
    sales: &[SaleRecord],
    goal: Option<&CollectionGoal>,
    schedule: &[WeeklyGoalSchedule],
) -> ProgressReport {
    let scoped: Vec<&SaleRecord> = sales_for(sales, representative_id, collection).collect();
    let totals = totals(scoped.iter().copied());

    let standing = match goal {
        Some(goal) => StandingGoal::Configured(attainment(goal, &totals)),
        None => StandingGoal::NotConfigured,
    };

    let weekly = match (active_week(schedule, collection, as_of), goal) {
        (None, _) => WeeklyGoal::NoActiveWeek,
        (Some(week), None) => WeeklyGoal::GoalNotConfigured {
            period_start: week.period_start,
            period_end: week.period_end,
        },
        (Some(week), Some(goal)) => {
            WeeklyGoal::Active(weekly_target(week, goal, &totals, &scoped))
        }
    };

    ProgressReport {
        representative_id: representative_id.clone(),
        collection: collection.trim().to_string(),
        as_of,
        totals,
        standing,
        weekly,
    }
}
