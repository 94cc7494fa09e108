use uuid::Uuid;

use super::value_objects::ActionStatus;
use crate::domain::user::value_objects::RepresentativeId;

/// Edits applied to a draft board
///
/// Handlers log them; nothing is persisted until the board is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    ItemAdded {
        item_id: Uuid,
        representative_id: RepresentativeId,
        client_name: String,
    },
    StatusChanged {
        item_id: Uuid,
        from: ActionStatus,
        to: ActionStatus,
    },
    CommentChanged {
        item_id: Uuid,
    },
}

impl BoardEvent {
    pub fn item_id(&self) -> Uuid {
        match self {
            BoardEvent::ItemAdded { item_id, .. } => *item_id,
            BoardEvent::StatusChanged { item_id, .. } => *item_id,
            BoardEvent::CommentChanged { item_id } => *item_id,
        }
    }
}
