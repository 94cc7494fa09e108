// Goals domain module
// Standing collection goals, weekly percentage schedules and the catalog

pub mod collection;
pub mod collection_goal;
pub mod weekly_schedule;

pub use collection::{available_collections, default_collection, resolve_collection, Collection};
pub use collection_goal::{find_goal, CollectionGoal};
pub use weekly_schedule::{active_week, normalize_percent, week_starting, WeeklyGoalSchedule};
