// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod goals;
pub mod kanban;
pub mod progress;
pub mod repositories;
pub mod sales;
pub mod text;
pub mod user;
