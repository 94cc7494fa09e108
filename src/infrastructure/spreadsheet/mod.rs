// Spreadsheet access
// calamine reads workbooks, umya-spreadsheet writes them

pub mod cells;
pub mod reader;
pub mod schema;
pub mod writer;

use std::path::Path;

use crate::domain::errors::{DiarioError, DiarioResult};
use crate::domain::repositories::Loaded;
use cells::{Cell, RowReader};

pub use reader::read_table;
pub use writer::write_table;

/// Header plus data rows of a worksheet
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// 1-based sheet row number and the row's cells
    pub rows: Vec<(usize, Vec<Cell>)>,
}

/// File name used in messages and warnings
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Runs blocking spreadsheet I/O off the async executor
pub async fn run_blocking<T, F>(task: F) -> DiarioResult<T>
where
    F: FnOnce() -> DiarioResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        DiarioError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Spreadsheet task failed: {}", e),
        ))
    })?
}

/// Reads a table, resolves its columns and parses each data row
///
/// `parse` returns `None` to skip a row it cannot use; it is expected to
/// record a warning through the reader when it does.
pub fn load_rows<T>(
    path: &Path,
    schema: &schema::TableSchema,
    mut parse: impl FnMut(&mut RowReader<'_>) -> Option<T>,
) -> DiarioResult<Loaded<T>> {
    let file = file_label(path);
    let table = read_table(path)?;
    let columns = schema.resolve(&file, &table.headers)?;

    let mut warnings = Vec::new();
    let mut rows = Vec::with_capacity(table.rows.len());
    for (row_number, row_cells) in &table.rows {
        let mut reader = RowReader::new(&file, *row_number, row_cells, &columns, &mut warnings);
        if let Some(row) = parse(&mut reader) {
            rows.push(row);
        }
    }

    tracing::debug!(
        "Loaded {} rows from {} ({} warnings)",
        rows.len(),
        file,
        warnings.len()
    );
    Ok(Loaded::new(rows, warnings))
}
