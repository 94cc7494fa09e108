// Goal progress module
// Pure computations over loaded tables; no I/O happens here

pub mod calculator;
pub mod coverage;
pub mod report;
pub mod weekly_summary;

pub use calculator::compute_progress;
pub use coverage::{client_coverage, ClientCoverage};
pub use report::{
    GoalAttainment, ProgressDisplay, ProgressReport, SalesTotals, StandingGoal, TicketAverage,
    TicketSource, WeeklyGoal, WeeklyTarget,
};
pub use weekly_summary::{sales_in_week, summarize_weeks, WeekSummary};
