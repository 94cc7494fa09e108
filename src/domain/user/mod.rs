// User domain module
// Credentials table rows and the identity resolver

#![allow(clippy::module_inception)]

pub mod identity;
pub mod user;
pub mod value_objects;

pub use identity::{resolve, AuthFailure, Identity};
pub use user::User;
pub use value_objects::{Email, RepresentativeId};
