use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::text::same_name;
use crate::domain::user::value_objects::RepresentativeId;

/// Standing goal of one representative for one collection
///
/// # Invariants
/// - Both targets are non-negative
/// - A zero target is valid and yields 0% attainment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionGoal {
    pub representative_id: RepresentativeId,
    pub collection: String,
    pub sales_target_amount: Decimal,
    pub client_count_target: Decimal,
}

impl CollectionGoal {
    pub fn new(
        representative_id: RepresentativeId,
        collection: impl Into<String>,
        sales_target_amount: Decimal,
        client_count_target: Decimal,
    ) -> Result<Self, String> {
        let collection = collection.into().trim().to_string();
        if collection.is_empty() {
            return Err("Collection cannot be empty".to_string());
        }
        if sales_target_amount < Decimal::ZERO {
            return Err("Sales target cannot be negative".to_string());
        }
        if client_count_target < Decimal::ZERO {
            return Err("Client target cannot be negative".to_string());
        }

        Ok(Self {
            representative_id,
            collection,
            sales_target_amount,
            client_count_target,
        })
    }

    pub fn applies_to(&self, representative_id: &RepresentativeId, collection: &str) -> bool {
        self.representative_id == *representative_id && same_name(&self.collection, collection)
    }
}

/// Looks up the goal row of a representative for a collection
///
/// When the sheet repeats a pair, the first row wins.
pub fn find_goal<'a>(
    goals: &'a [CollectionGoal],
    representative_id: &RepresentativeId,
    collection: &str,
) -> Option<&'a CollectionGoal> {
    goals
        .iter()
        .find(|goal| goal.applies_to(representative_id, collection))
}
