use axum::{extract::State, http::StatusCode, Json};
use chrono::Local;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::SessionAuth;
use crate::api::state::AppState;
use crate::domain::sales::{NewSaleRecord, SaleRecord};
use crate::session::Page;

/// Records a visit or sale for the logged-in representative
///
/// POST /api/sales
pub async fn create_sale(
    State(state): State<AppState>,
    auth: SessionAuth,
    Json(req): Json<NewSaleRecord>,
) -> Result<(StatusCode, Json<SaleRecord>), ApiError> {
    let representative_id = {
        let mut session = auth.session.lock().await;
        session.current_page = Page::NewVisit;
        session.identity.representative_id.clone()
    };

    let sale = req
        .validate(representative_id, Local::now().date_naive())
        .map_err(ApiError::bad_request)?;

    state.store.append_sale(&sale).await?;

    Ok((StatusCode::CREATED, Json(sale)))
}
