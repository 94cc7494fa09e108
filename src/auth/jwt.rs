// Session token creation and verification
// Tokens carry the representative id and the server-side session id

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hours a session token stays valid
pub const TOKEN_TTL_HOURS: i64 = 8;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Representative id (subject)
    pub sub: String,
    /// Server-side session id
    pub sid: Uuid,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Creates an HS256 token for a session
///
/// # Example
/// ```
/// use diario_bordo_api::auth::jwt::{create_token, verify_token};
/// use uuid::Uuid;
///
/// let session_id = Uuid::new_v4();
/// let token = create_token("R1", session_id, "secret").expect("valid token");
/// let claims = verify_token(&token, "secret").expect("valid token");
/// assert_eq!(claims.sub, "R1");
/// assert_eq!(claims.sid, session_id);
/// ```
pub fn create_token(representative_id: &str, session_id: Uuid, secret: &str) -> Result<String, String> {
    let expiry = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
    let claims = Claims {
        sub: representative_id.to_string(),
        sid: session_id,
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a token
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
