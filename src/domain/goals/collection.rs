use serde::Serialize;

use super::CollectionGoal;
use crate::domain::errors::{DiarioError, DiarioResult};
use crate::domain::text::same_name;
use crate::domain::user::value_objects::RepresentativeId;

/// Entry of the optional collections catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub name: String,
    pub active: bool,
}

/// Picks the collection a request falls back to when it names none:
/// the first active catalog entry
pub fn default_collection(catalog: &[Collection]) -> Option<&Collection> {
    catalog.iter().find(|collection| collection.active)
}

/// The requested collection, or the default one when none was given
pub fn resolve_collection(catalog: &[Collection], requested: Option<&str>) -> DiarioResult<String> {
    match requested.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => Ok(name.to_string()),
        None => default_collection(catalog)
            .map(|c| c.name.clone())
            .ok_or_else(|| DiarioError::not_configured("default collection", "catalog")),
    }
}

/// Collections a representative can pick from
///
/// The catalog when there is one, otherwise the distinct collections of the
/// representative's goals in table order.
pub fn available_collections(
    catalog: &[Collection],
    goals: &[CollectionGoal],
    representative_id: &RepresentativeId,
) -> Vec<Collection> {
    if !catalog.is_empty() {
        return catalog.to_vec();
    }

    let mut names: Vec<Collection> = Vec::new();
    for goal in goals
        .iter()
        .filter(|goal| &goal.representative_id == representative_id)
    {
        if !names.iter().any(|c| same_name(&c.name, &goal.collection)) {
            names.push(Collection {
                name: goal.collection.clone(),
                active: true,
            });
        }
    }
    names
}
