use serde::Serialize;
use thiserror::Error;

/// Errors raised while loading, resolving or persisting Diário de Bordo data
#[derive(Debug, Error)]
pub enum DiarioError {
    #[error("Data file not found: {file}")]
    MissingFile { file: String },

    #[error("Missing columns in {file}: expected {missing:?}, found {found:?}")]
    MissingColumns {
        file: String,
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("Spreadsheet error in {file}: {message}")]
    Spreadsheet { file: String, message: String },

    #[error("Invalid credentials")]
    AuthFailure,

    #[error("No {what} configured for {key}")]
    NotConfigured { what: String, key: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{file} changed on disk since it was loaded; reload and reapply your edits")]
    Conflict { file: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiarioError {
    /// True for the configuration kind: missing file, missing columns or an
    /// unreadable workbook
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DiarioError::MissingFile { .. }
                | DiarioError::MissingColumns { .. }
                | DiarioError::Spreadsheet { .. }
        )
    }

    pub fn not_configured(what: impl Into<String>, key: impl Into<String>) -> Self {
        DiarioError::NotConfigured {
            what: what.into(),
            key: key.into(),
        }
    }
}

pub type DiarioResult<T> = Result<T, DiarioError>;

/// A cell that could not be read as the expected type and was coerced
///
/// Spreadsheets routinely contain blank or free-text cells where numbers are
/// expected. These never abort a load; they are collected and surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataQualityWarning {
    pub file: String,
    /// 1-based spreadsheet row (the header is row 1)
    pub row: usize,
    pub column: String,
    pub value: String,
    pub message: String,
    /// Representative the row belongs to, when it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative_id: Option<String>,
}

impl DataQualityWarning {
    /// Whether a representative may see this warning: rows of their own, or
    /// rows that belong to nobody
    pub fn visible_to(&self, representative_id: &str) -> bool {
        self.representative_id
            .as_deref()
            .map_or(true, |owner| owner == representative_id)
    }
}

impl std::fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} row {} column '{}': {} (value: {:?})",
            self.file, self.row, self.column, self.message, self.value
        )
    }
}
