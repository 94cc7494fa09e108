// Action board domain module
// Action items, their status column and the per-session draft board

pub mod action_item;
pub mod board;
pub mod events;
pub mod value_objects;

pub use action_item::ActionItem;
pub use board::ActionBoard;
pub use events::BoardEvent;
pub use value_objects::ActionStatus;
