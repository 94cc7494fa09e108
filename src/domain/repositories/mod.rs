// Repository interfaces (ports)
// Infrastructure adapters implement these over spreadsheet files

pub mod action_item_repository;
pub mod goal_repository;
pub mod sales_repository;
pub mod user_repository;

pub use action_item_repository::{ActionItemRepository, TableVersion};
pub use goal_repository::GoalRepository;
pub use sales_repository::SalesRepository;
pub use user_repository::UserRepository;

use crate::domain::errors::DataQualityWarning;

/// Rows read from a table plus the cells that had to be coerced
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub rows: Vec<T>,
    pub warnings: Vec<DataQualityWarning>,
}

impl<T> Loaded<T> {
    pub fn new(rows: Vec<T>, warnings: Vec<DataQualityWarning>) -> Self {
        Self { rows, warnings }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}
