use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;

use super::{enter_page, CollectionQuery};
use crate::api::errors::ApiError;
use crate::api::middleware::auth::SessionAuth;
use crate::api::state::AppState;
use crate::domain::errors::DiarioError;
use crate::domain::goals::{find_goal, resolve_collection, week_starting};
use crate::domain::progress::{sales_in_week, summarize_weeks, WeekSummary};
use crate::domain::sales::SaleRecord;
use crate::session::Page;

#[derive(Debug, Serialize)]
pub struct WeeksResponse {
    pub collection: String,
    pub weeks: Vec<WeekSummary>,
}

#[derive(Debug, Serialize)]
pub struct WeekSalesResponse {
    pub collection: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub sales: Vec<SaleRecord>,
}

/// Every scheduled week of a collection, newest first
///
/// GET /api/weeks?collection=
pub async fn list_weeks(
    State(state): State<AppState>,
    auth: SessionAuth,
    Query(query): Query<CollectionQuery>,
) -> Result<Json<WeeksResponse>, ApiError> {
    let representative_id = enter_page(&auth, Page::WeeklySummary).await;
    let store = &state.store;
    let (sales, goals, schedule, catalog) = tokio::try_join!(
        store.sales(),
        store.goals(),
        store.schedule(),
        store.collections(),
    )?;
    let collection = resolve_collection(&catalog.rows, query.collection.as_deref())?;

    let goal = find_goal(&goals.rows, &representative_id, &collection);
    let weeks = summarize_weeks(
        &representative_id,
        &collection,
        &sales.rows,
        goal,
        &schedule.rows,
    );

    Ok(Json(WeeksResponse { collection, weeks }))
}

/// Sales of the representative within one scheduled week
///
/// GET /api/weeks/:start/sales?collection=
pub async fn week_sales(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(start): Path<NaiveDate>,
    Query(query): Query<CollectionQuery>,
) -> Result<Json<WeekSalesResponse>, ApiError> {
    let representative_id = enter_page(&auth, Page::WeeklySummary).await;
    let store = &state.store;
    let (sales, schedule, catalog) =
        tokio::try_join!(store.sales(), store.schedule(), store.collections())?;
    let collection = resolve_collection(&catalog.rows, query.collection.as_deref())?;

    let week = week_starting(&schedule.rows, &collection, start).ok_or_else(|| {
        DiarioError::NotFound(format!("Week starting {} for {}", start, collection))
    })?;
    let sales = sales_in_week(&representative_id, &collection, week, &sales.rows)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(WeekSalesResponse {
        period_start: week.period_start,
        period_end: week.period_end,
        collection,
        sales,
    }))
}
