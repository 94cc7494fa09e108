use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{enter_page, visible_warnings};
use crate::api::errors::ApiError;
use crate::api::middleware::auth::SessionAuth;
use crate::api::state::AppState;
use crate::domain::errors::DataQualityWarning;
use crate::domain::goals::{find_goal, resolve_collection};
use crate::domain::progress::{compute_progress, ProgressDisplay, ProgressReport};
use crate::session::Page;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub collection: Option<String>,
    /// Reference date for the active week; today when absent
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub report: ProgressReport,
    pub display: ProgressDisplay,
    pub warnings: Vec<DataQualityWarning>,
}

/// Goal progress of the logged-in representative
///
/// GET /api/dashboard?collection=&as_of=
pub async fn dashboard(
    State(state): State<AppState>,
    auth: SessionAuth,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let representative_id = enter_page(&auth, Page::Dashboard).await;
    let store = &state.store;
    let (sales, goals, schedule, catalog) = tokio::try_join!(
        store.sales(),
        store.goals(),
        store.schedule(),
        store.collections(),
    )?;
    let collection = resolve_collection(&catalog.rows, query.collection.as_deref())?;
    let as_of = query.as_of.unwrap_or_else(|| Local::now().date_naive());

    let goal = find_goal(&goals.rows, &representative_id, &collection);
    if goal.is_none() {
        tracing::debug!("No goal for {} in {}", representative_id, collection);
    }

    let report = compute_progress(
        &representative_id,
        &collection,
        as_of,
        &sales.rows,
        goal,
        &schedule.rows,
    );
    let display = report.display();
    let warnings = visible_warnings(
        &representative_id,
        [
            sales.warnings.as_slice(),
            goals.warnings.as_slice(),
            schedule.warnings.as_slice(),
        ],
    );

    Ok(Json(DashboardResponse {
        report,
        display,
        warnings,
    }))
}
