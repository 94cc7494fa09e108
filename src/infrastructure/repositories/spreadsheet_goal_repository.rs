use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::{DiarioError, DiarioResult};
use crate::domain::goals::{normalize_percent, Collection, CollectionGoal, WeeklyGoalSchedule};
use crate::domain::repositories::{GoalRepository, Loaded};
use crate::domain::user::RepresentativeId;
use crate::infrastructure::spreadsheet::cells::RowReader;
use crate::infrastructure::spreadsheet::{load_rows, run_blocking, schema};

/// Goal tables stored in spreadsheets
///
/// The collections catalog is optional; the other two files are required.
pub struct SpreadsheetGoalRepository {
    goals_path: PathBuf,
    schedule_path: PathBuf,
    collections_path: PathBuf,
}

impl SpreadsheetGoalRepository {
    pub fn new(
        goals_path: impl Into<PathBuf>,
        schedule_path: impl Into<PathBuf>,
        collections_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            goals_path: goals_path.into(),
            schedule_path: schedule_path.into(),
            collections_path: collections_path.into(),
        }
    }
}

#[async_trait]
impl GoalRepository for SpreadsheetGoalRepository {
    async fn load_goals(&self) -> DiarioResult<Loaded<CollectionGoal>> {
        let path = self.goals_path.clone();
        run_blocking(move || load_rows(&path, &schema::GOALS, parse_goal)).await
    }

    async fn load_schedule(&self) -> DiarioResult<Loaded<WeeklyGoalSchedule>> {
        let path = self.schedule_path.clone();
        run_blocking(move || load_rows(&path, &schema::WEEKLY_SCHEDULE, parse_week)).await
    }

    async fn load_collections(&self) -> DiarioResult<Loaded<Collection>> {
        let path = self.collections_path.clone();
        match run_blocking(move || load_rows(&path, &schema::COLLECTIONS, parse_collection)).await
        {
            Err(DiarioError::MissingFile { file }) => {
                tracing::debug!("No collections catalog ({}), continuing without it", file);
                Ok(Loaded::empty())
            }
            other => other,
        }
    }
}

fn parse_goal(row: &mut RowReader<'_>) -> Option<CollectionGoal> {
    let representative_id = row
        .text("representative_id")
        .and_then(|raw| RepresentativeId::new(raw).ok());
    let collection = row.text("collection");
    let (Some(representative_id), Some(collection)) = (representative_id, collection) else {
        row.warn(
            "representative_id",
            String::new(),
            "goal lacks representative or collection; skipped",
        );
        return None;
    };
    row.attribute_to(&representative_id);

    let sales_target = row.decimal_or_zero("sales_target_amount", true);
    let client_target = row.decimal_or_zero("client_count_target", true);

    match CollectionGoal::new(representative_id, collection, sales_target, client_target) {
        Ok(goal) => Some(goal),
        Err(e) => {
            row.warn("collection", String::new(), format!("{}; skipped", e));
            None
        }
    }
}

fn parse_week(row: &mut RowReader<'_>) -> Option<WeeklyGoalSchedule> {
    let Some(collection) = row.text("collection") else {
        row.warn("collection", String::new(), "week lacks a collection; skipped");
        return None;
    };
    let (Some(start), Some(end)) = (row.date("period_start"), row.date("period_end")) else {
        row.warn("period_start", String::new(), "week lacks a valid range; skipped");
        return None;
    };
    let percent = normalize_percent(row.decimal_or_zero("percent_of_collection_goal", true));

    match WeeklyGoalSchedule::new(collection, start, end, percent) {
        Ok(week) => Some(week),
        Err(e) => {
            row.warn("period_start", start.to_string(), format!("{}; skipped", e));
            None
        }
    }
}

fn parse_collection(row: &mut RowReader<'_>) -> Option<Collection> {
    let name = row.text("collection")?;
    let active = row.flag("active", true);
    Some(Collection { name, active })
}
