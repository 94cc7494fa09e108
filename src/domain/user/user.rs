use super::value_objects::{Email, RepresentativeId};

/// A row of the credentials table
///
/// Created by an administrator editing the users spreadsheet; never modified
/// by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Normalized (trimmed, lower-cased) login
    pub email: String,
    /// Trimmed stored password; either plaintext or a bcrypt hash
    pub password: String,
    pub display_name: Option<String>,
    pub representative_id: RepresentativeId,
}

impl User {
    pub fn new(
        email: &str,
        password: &str,
        display_name: Option<String>,
        representative_id: RepresentativeId,
    ) -> Self {
        Self {
            email: Email::normalize(email),
            password: password.trim().to_string(),
            display_name: display_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            representative_id,
        }
    }

    /// Display name, falling back to the login
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}
