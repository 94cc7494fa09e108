// HTTP handlers, one module per page of the application

pub mod auth;
pub mod clients;
pub mod collections;
pub mod dashboard;
pub mod kanban;
pub mod sales;
pub mod weeks;

use serde::Deserialize;

use crate::api::middleware::auth::SessionAuth;
use crate::domain::errors::DataQualityWarning;
use crate::domain::user::RepresentativeId;
use crate::session::Page;

/// `?collection=` filter shared by the report pages
#[derive(Debug, Default, Deserialize)]
pub struct CollectionQuery {
    pub collection: Option<String>,
}

/// Records the page a session moved to and returns who is on it
pub(crate) async fn enter_page(auth: &SessionAuth, page: Page) -> RepresentativeId {
    let mut session = auth.session.lock().await;
    session.current_page = page;
    session.identity.representative_id.clone()
}

/// Warnings of the given tables that the representative may see
pub(crate) fn visible_warnings<'a>(
    representative_id: &RepresentativeId,
    tables: impl IntoIterator<Item = &'a [DataQualityWarning]>,
) -> Vec<DataQualityWarning> {
    tables
        .into_iter()
        .flatten()
        .filter(|warning| warning.visible_to(representative_id.as_str()))
        .cloned()
        .collect()
}
