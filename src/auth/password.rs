// Password comparison for the credentials spreadsheet
// Stored passwords are plaintext unless they carry a bcrypt prefix

use bcrypt::{hash, verify, DEFAULT_COST};

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Hashes a password using bcrypt
///
/// Administrators can paste the result into the users sheet in place of a
/// plaintext password.
///
/// # Example
/// ```
/// use diario_bordo_api::auth::password::hash_password;
///
/// let hash = hash_password("my_password").expect("valid hash");
/// assert!(hash.starts_with("$2"));
/// ```
pub fn hash_password(password: &str) -> Result<String, String> {
    hash(password, DEFAULT_COST).map_err(|e| e.to_string())
}

/// Verifies a password against a bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| e.to_string())
}

/// Returns true when the stored value looks like a bcrypt hash
pub fn is_bcrypt_hash(stored: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|prefix| stored.starts_with(prefix))
}

/// Compares a supplied (already trimmed) password with a stored one
///
/// Hashes are verified with bcrypt; a malformed hash never matches.
/// Anything else is compared verbatim.
pub fn credential_matches(stored: &str, supplied: &str) -> bool {
    if is_bcrypt_hash(stored) {
        verify_password(supplied, stored).unwrap_or(false)
    } else {
        stored == supplied
    }
}
