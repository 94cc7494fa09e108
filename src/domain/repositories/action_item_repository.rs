use std::time::SystemTime;

use async_trait::async_trait;

use super::Loaded;
use crate::domain::errors::DiarioResult;
use crate::domain::kanban::ActionItem;

/// Identifies the state of a table file at load time
///
/// Two versions are equal when the file has the same modification time and
/// length, or when it is missing both times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableVersion {
    modified: Option<SystemTime>,
    len: u64,
}

impl TableVersion {
    pub fn new(modified: SystemTime, len: u64) -> Self {
        Self {
            modified: Some(modified),
            len,
        }
    }

    /// Version of a file that does not exist yet
    pub fn missing() -> Self {
        Self {
            modified: None,
            len: 0,
        }
    }
}

/// Access to the action items table
#[async_trait]
pub trait ActionItemRepository: Send + Sync {
    /// Load every action item and the version of the file read
    async fn load(&self) -> DiarioResult<(Loaded<ActionItem>, TableVersion)>;

    /// Write the items back into the table
    ///
    /// Rows and columns the items do not cover are kept as they are.
    ///
    /// Fails with `DiarioError::Conflict` when the file no longer has the
    /// `expected` version. Returns the version of the file just written.
    async fn save_all(
        &self,
        items: &[ActionItem],
        expected: &TableVersion,
    ) -> DiarioResult<TableVersion>;
}
