use serde::{Deserialize, Serialize};

/// Column of the action board
///
/// # Status Transitions
/// ```text
/// ToDo <-> InProgress <-> Done
///   ^----------------------^
/// ```
/// Every status is reachable from every other; changes are user-driven only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    ToDo,
    InProgress,
    Done,
}

impl ActionStatus {
    /// Any move is allowed, including staying in place
    pub fn can_transition_to(&self, _next: ActionStatus) -> bool {
        true
    }

    /// Parses the status text found in the actions sheet
    ///
    /// Accepts the English labels and the Portuguese ones used by the board
    /// (`A Fazer`, `Em andamento`, `Concluído`). Returns `None` for anything
    /// else.
    ///
    /// # Example
    /// ```
    /// use diario_bordo_api::domain::kanban::ActionStatus;
    ///
    /// assert_eq!(ActionStatus::parse(" Em Andamento "), Some(ActionStatus::InProgress));
    /// assert_eq!(ActionStatus::parse("???"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let folded = raw.trim().to_lowercase().replace(['_', '-'], " ");
        match folded.as_str() {
            "todo" | "to do" | "a fazer" | "pendente" => Some(ActionStatus::ToDo),
            "in progress" | "inprogress" | "doing" | "em andamento" | "fazendo" => {
                Some(ActionStatus::InProgress)
            }
            "done" | "concluído" | "concluido" | "feito" => Some(ActionStatus::Done),
            _ => None,
        }
    }

    /// Label written back to the sheet
    pub fn label(&self) -> &'static str {
        match self {
            ActionStatus::ToDo => "A Fazer",
            ActionStatus::InProgress => "Em andamento",
            ActionStatus::Done => "Concluído",
        }
    }
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::ToDo => write!(f, "to_do"),
            ActionStatus::InProgress => write!(f, "in_progress"),
            ActionStatus::Done => write!(f, "done"),
        }
    }
}
