// Infrastructure layer module
// Contains spreadsheet adapters and the cached table store
// Follows Hexagonal Architecture

pub mod data_store;
pub mod repositories;
pub mod spreadsheet;
