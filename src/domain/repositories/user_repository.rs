use async_trait::async_trait;

use super::Loaded;
use crate::domain::errors::DiarioResult;
use crate::domain::user::User;

/// Read access to the credentials table
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load every user row
    async fn load_all(&self) -> DiarioResult<Loaded<User>>;
}
