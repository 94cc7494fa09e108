use serde::Serialize;

use super::user::User;
use super::value_objects::{Email, RepresentativeId};
use crate::auth::password::credential_matches;

/// The logged-in representative, as resolved from the credentials table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub representative_id: RepresentativeId,
    pub email: String,
    pub display_name: String,
}

/// Why a credential pair did not resolve to exactly one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No row matched the pair
    NoMatch,
    /// Several rows carry the same credentials; the table must be fixed
    Ambiguous(usize),
}

/// Resolves a submitted credential pair against the users table
///
/// The email is trimmed and lower-cased, the password only trimmed.
/// Exactly one matching row is required: duplicated credentials are
/// rejected rather than resolved by row order. The resolver has no side
/// effects and does not log.
///
/// # Example
/// ```
/// use diario_bordo_api::domain::user::{resolve, RepresentativeId, User};
///
/// let users = vec![User::new(
///     "ana@example.com",
///     "segredo",
///     Some("Ana".to_string()),
///     RepresentativeId::new("R1").unwrap(),
/// )];
///
/// let identity = resolve(" ANA@example.com", "segredo ", &users).unwrap();
/// assert_eq!(identity.representative_id.as_str(), "R1");
/// ```
pub fn resolve(email: &str, password: &str, users: &[User]) -> Result<Identity, AuthFailure> {
    let email = Email::normalize(email);
    let password = password.trim();

    let mut matches = users
        .iter()
        .filter(|user| user.email == email && credential_matches(&user.password, password));

    let first = matches.next().ok_or(AuthFailure::NoMatch)?;
    let extra = matches.count();
    if extra > 0 {
        return Err(AuthFailure::Ambiguous(extra + 1));
    }

    Ok(Identity {
        representative_id: first.representative_id.clone(),
        email: first.email.clone(),
        display_name: first.name().to_string(),
    })
}
