use serde::{Deserialize, Serialize};
use std::fmt;

/// Email value object
///
/// # Invariants
/// - Stored trimmed and lower-cased
/// - Must contain '@' character
/// - Must be at least 3 characters long
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use diario_bordo_api::domain::user::value_objects::Email;
    ///
    /// let email = Email::new("  Ana@Example.com ").expect("valid email");
    /// assert_eq!(email.as_str(), "ana@example.com");
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, String> {
        let email = Self::normalize(email.as_ref());
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err(format!("Invalid email: {}", email))
        }
    }

    /// Trims and lower-cases an address the way credentials are compared
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    fn is_valid(email: &str) -> bool {
        email.contains('@') && email.len() >= 3
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of a sales representative
///
/// Every table cross-references representatives by this value. Email and
/// display name are presentation attributes only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepresentativeId(String);

impl RepresentativeId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, String> {
        let id = raw.as_ref().trim();
        if id.is_empty() {
            return Err("Representative id cannot be empty".to_string());
        }
        Ok(RepresentativeId(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against a raw cell value, ignoring surrounding whitespace
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim()
    }
}

impl fmt::Display for RepresentativeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
