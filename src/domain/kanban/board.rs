use uuid::Uuid;

use super::action_item::ActionItem;
use super::events::BoardEvent;
use super::value_objects::ActionStatus;
use crate::domain::errors::{DiarioError, DiarioResult};
use crate::domain::repositories::TableVersion;
use crate::domain::user::value_objects::RepresentativeId;

/// In-memory copy of the actions table being edited in a session
///
/// Edits accumulate here across requests. Saving writes the whole table at
/// once, and only if the file still has the version the draft was taken
/// from.
#[derive(Debug, Clone)]
pub struct ActionBoard {
    items: Vec<ActionItem>,
    version: TableVersion,
    dirty: bool,
}

impl ActionBoard {
    pub fn new(items: Vec<ActionItem>, version: TableVersion) -> Self {
        Self {
            items,
            version,
            dirty: false,
        }
    }

    /// Items belonging to a representative, in table order
    pub fn for_representative<'a>(
        &'a self,
        representative_id: &'a RepresentativeId,
    ) -> impl Iterator<Item = &'a ActionItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.representative_id() == representative_id)
    }

    pub fn add_item(
        &mut self,
        representative_id: RepresentativeId,
        client_name: &str,
        suggested_action: &str,
    ) -> DiarioResult<BoardEvent> {
        let (item, event) = ActionItem::new(representative_id, client_name, suggested_action)
            .map_err(DiarioError::Validation)?;
        self.items.push(item);
        self.dirty = true;
        Ok(event)
    }

    pub fn set_status(
        &mut self,
        representative_id: &RepresentativeId,
        item_id: Uuid,
        status: ActionStatus,
    ) -> DiarioResult<BoardEvent> {
        let item = self.owned_item_mut(representative_id, item_id)?;
        let event = item.change_status(status).map_err(DiarioError::Validation)?;
        self.dirty = true;
        Ok(event)
    }

    pub fn set_comment(
        &mut self,
        representative_id: &RepresentativeId,
        item_id: Uuid,
        comment: &str,
    ) -> DiarioResult<BoardEvent> {
        let item = self.owned_item_mut(representative_id, item_id)?;
        let event = item.change_comment(comment);
        self.dirty = true;
        Ok(event)
    }

    /// Representatives may only touch their own items; other items are
    /// reported as missing
    fn owned_item_mut(
        &mut self,
        representative_id: &RepresentativeId,
        item_id: Uuid,
    ) -> DiarioResult<&mut ActionItem> {
        self.items
            .iter_mut()
            .find(|item| item.id() == item_id && item.representative_id() == representative_id)
            .ok_or_else(|| DiarioError::NotFound(format!("Action item {}", item_id)))
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn version(&self) -> &TableVersion {
        &self.version
    }

    /// True when the draft holds edits not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the draft as saved under a new file version
    pub fn mark_saved(&mut self, version: TableVersion) {
        self.version = version;
        self.dirty = false;
    }
}
