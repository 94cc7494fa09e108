use async_trait::async_trait;

use super::Loaded;
use crate::domain::errors::DiarioResult;
use crate::domain::goals::{Collection, CollectionGoal, WeeklyGoalSchedule};

/// Read access to goal definitions
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Load the standing goal of every representative and collection
    async fn load_goals(&self) -> DiarioResult<Loaded<CollectionGoal>>;

    /// Load the weekly percentage schedule
    async fn load_schedule(&self) -> DiarioResult<Loaded<WeeklyGoalSchedule>>;

    /// Load the collections catalog; empty when no catalog file exists
    async fn load_collections(&self) -> DiarioResult<Loaded<Collection>>;
}
