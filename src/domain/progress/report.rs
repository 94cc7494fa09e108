use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::sales::money::{display_percent, format_currency, format_percent};
use crate::domain::user::value_objects::RepresentativeId;

/// Everything a dashboard page shows for one representative and collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub representative_id: RepresentativeId,
    pub collection: String,
    pub as_of: NaiveDate,
    pub totals: SalesTotals,
    pub standing: StandingGoal,
    pub weekly: WeeklyGoal,
}

/// Sums over the representative's rows of the collection, dated or not
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesTotals {
    pub total_sold: Decimal,
    pub clients_served: u64,
}

/// Standing-goal state
///
/// `NotConfigured` means no goal row exists. It is distinct from a zero
/// target, which is configured and yields 0%.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StandingGoal {
    NotConfigured,
    Configured(GoalAttainment),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalAttainment {
    pub sales_target_amount: Decimal,
    pub client_count_target: Decimal,
    /// `total_sold / sales_target_amount`, unclamped; 0 for a zero target
    pub attainment: Decimal,
    /// `clients_served / client_count_target`, unclamped; 0 for a zero target
    pub client_attainment: Decimal,
    pub remaining_amount: Decimal,
    pub remaining_clients: Decimal,
}

/// Weekly sub-goal state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WeeklyGoal {
    /// `as_of` is outside every schedule row of the collection
    NoActiveWeek,
    /// A week is active but there is no standing goal to take a share of
    GoalNotConfigured {
        period_start: NaiveDate,
        period_end: NaiveDate,
    },
    Active(WeeklyTarget),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTarget {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub percent_of_collection_goal: Decimal,
    pub target_amount: Decimal,
    pub sold_in_week: Decimal,
    pub attainment: Decimal,
    pub remaining_amount: Decimal,
    pub ticket_average: TicketAverage,
    /// `None` when the ticket average is zero: the client count is unknown,
    /// not zero
    pub clients_needed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketSource {
    /// Goal amount divided by the client target
    Planned,
    /// Sold amount divided by clients served
    Observed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TicketAverage {
    pub value: Decimal,
    pub source: TicketSource,
}

/// Pre-rendered strings for the dashboard cards and progress bars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressDisplay {
    pub total_sold: String,
    pub sales_target: Option<String>,
    pub remaining_amount: Option<String>,
    pub attainment: Option<String>,
    /// Progress-bar fill in `[0, 100]`
    pub attainment_bar: Option<Decimal>,
    pub client_attainment: Option<String>,
    pub client_attainment_bar: Option<Decimal>,
    pub weekly_target: Option<String>,
    pub sold_in_week: Option<String>,
    pub weekly_attainment: Option<String>,
    pub weekly_attainment_bar: Option<Decimal>,
    pub week_period: Option<String>,
}

impl ProgressReport {
    pub fn display(&self) -> ProgressDisplay {
        let standing = match &self.standing {
            StandingGoal::Configured(goal) => Some(goal),
            StandingGoal::NotConfigured => None,
        };
        let weekly = match &self.weekly {
            WeeklyGoal::Active(target) => Some(target),
            _ => None,
        };
        let week_period = match &self.weekly {
            WeeklyGoal::Active(WeeklyTarget {
                period_start,
                period_end,
                ..
            })
            | WeeklyGoal::GoalNotConfigured {
                period_start,
                period_end,
            } => Some(format!("{} → {}", period_start, period_end)),
            WeeklyGoal::NoActiveWeek => None,
        };

        ProgressDisplay {
            total_sold: format_currency(self.totals.total_sold),
            sales_target: standing.map(|g| format_currency(g.sales_target_amount)),
            remaining_amount: standing.map(|g| format_currency(g.remaining_amount)),
            attainment: standing.map(|g| format_percent(g.attainment)),
            attainment_bar: standing.map(|g| display_percent(g.attainment)),
            client_attainment: standing.map(|g| format_percent(g.client_attainment)),
            client_attainment_bar: standing.map(|g| display_percent(g.client_attainment)),
            weekly_target: weekly.map(|w| format_currency(w.target_amount)),
            sold_in_week: weekly.map(|w| format_currency(w.sold_in_week)),
            weekly_attainment: weekly.map(|w| format_percent(w.attainment)),
            weekly_attainment_bar: weekly.map(|w| display_percent(w.attainment)),
            week_period,
        }
    }
}
