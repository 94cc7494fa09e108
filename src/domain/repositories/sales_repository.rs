use async_trait::async_trait;

use super::Loaded;
use crate::domain::errors::DiarioResult;
use crate::domain::sales::SaleRecord;

/// Access to the sales table
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Load every sale row
    async fn load_all(&self) -> DiarioResult<Loaded<SaleRecord>>;

    /// Append one validated row at the end of the table
    async fn append(&self, sale: &SaleRecord) -> DiarioResult<()>;
}
