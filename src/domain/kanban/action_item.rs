use serde::Serialize;
use uuid::Uuid;

use super::events::BoardEvent;
use super::value_objects::ActionStatus;
use crate::domain::user::value_objects::RepresentativeId;

/// A suggested follow-up with a client, tracked on the action board
///
/// # Invariants
/// - `id` is a stable surrogate key; updates never address items by name
/// - Client name and suggested action are not blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    id: Uuid,
    representative_id: RepresentativeId,
    client_name: String,
    suggested_action: String,
    status: ActionStatus,
    comment: Option<String>,
}

impl ActionItem {
    /// Creates a new item in the `ToDo` column
    ///
    /// # Example
    /// ```
    /// use diario_bordo_api::domain::kanban::{ActionItem, ActionStatus};
    /// use diario_bordo_api::domain::user::RepresentativeId;
    ///
    /// let (item, _event) = ActionItem::new(
    ///     RepresentativeId::new("R1").unwrap(),
    ///     "Loja Azul",
    ///     "Apresentar coleção de verão",
    /// ).expect("valid item");
    ///
    /// assert_eq!(item.status(), ActionStatus::ToDo);
    /// ```
    pub fn new(
        representative_id: RepresentativeId,
        client_name: &str,
        suggested_action: &str,
    ) -> Result<(Self, BoardEvent), String> {
        let client_name = client_name.trim();
        if client_name.is_empty() {
            return Err("Client name cannot be empty".to_string());
        }
        let suggested_action = suggested_action.trim();
        if suggested_action.is_empty() {
            return Err("Suggested action cannot be empty".to_string());
        }

        let item = Self {
            id: Uuid::new_v4(),
            representative_id,
            client_name: client_name.to_string(),
            suggested_action: suggested_action.to_string(),
            status: ActionStatus::ToDo,
            comment: None,
        };

        let event = BoardEvent::ItemAdded {
            item_id: item.id,
            representative_id: item.representative_id.clone(),
            client_name: item.client_name.clone(),
        };

        Ok((item, event))
    }

    /// Moves the item to another column
    pub fn change_status(&mut self, next: ActionStatus) -> Result<BoardEvent, String> {
        if !self.status.can_transition_to(next) {
            return Err(format!("Cannot move item from {} to {}", self.status, next));
        }

        let from = self.status;
        self.status = next;

        Ok(BoardEvent::StatusChanged {
            item_id: self.id,
            from,
            to: next,
        })
    }

    /// Replaces the comment; a blank comment clears it
    pub fn change_comment(&mut self, comment: &str) -> BoardEvent {
        let comment = comment.trim();
        self.comment = if comment.is_empty() {
            None
        } else {
            Some(comment.to_string())
        };

        BoardEvent::CommentChanged { item_id: self.id }
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn representative_id(&self) -> &RepresentativeId {
        &self.representative_id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn suggested_action(&self) -> &str {
        &self.suggested_action
    }

    pub fn status(&self) -> ActionStatus {
        self.status
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Reconstructs an item from a spreadsheet row
    ///
    /// Bypasses validation: the row is taken as stored.
    pub fn from_persistence(
        id: Uuid,
        representative_id: RepresentativeId,
        client_name: String,
        suggested_action: String,
        status: ActionStatus,
        comment: Option<String>,
    ) -> Self {
        Self {
            id,
            representative_id,
            client_name,
            suggested_action,
            status,
            comment,
        }
    }
}
