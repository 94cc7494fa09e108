//! Diário de Bordo API Library
//!
//! Sales-goal tracking for field representatives over spreadsheet tables:
//! login against the users sheet, goal progress and weekly targets, client
//! coverage, visit entry and a per-representative action board.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod session;
