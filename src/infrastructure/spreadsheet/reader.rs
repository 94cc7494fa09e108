use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::cells::{parse_date, Cell};
use super::{file_label, RawTable};
use crate::domain::errors::{DiarioError, DiarioResult};

/// Reads the first worksheet of a workbook (xlsx, xls, ods)
///
/// The first non-empty row is the header. Fully blank rows are skipped.
pub fn read_table(path: &Path) -> DiarioResult<RawTable> {
    let file = file_label(path);
    if !path.exists() {
        return Err(DiarioError::MissingFile { file });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| DiarioError::Spreadsheet {
        file: file.clone(),
        message: format!("Failed to open workbook: {}", e),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DiarioError::Spreadsheet {
            file: file.clone(),
            message: "Workbook has no worksheets".to_string(),
        })?
        .map_err(|e| DiarioError::Spreadsheet {
            file: file.clone(),
            message: format!("Failed to read worksheet: {}", e),
        })?;

    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range
        .rows()
        .enumerate()
        .map(|(i, row)| (first_row + i + 1, row.iter().map(to_cell).collect::<Vec<_>>()))
        .filter(|(_, cells)| !cells.iter().all(Cell::is_empty));

    let headers = match rows.next() {
        Some((_, cells)) => cells.iter().map(Cell::as_text).collect(),
        None => Vec::new(),
    };

    Ok(RawTable {
        headers,
        rows: rows.collect(),
    })
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|dt| Cell::Date(dt.date()))
            .unwrap_or_else(|| Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_date(s).map_or_else(|| Cell::text(s.as_str()), Cell::Date),
        Data::DurationIso(s) => Cell::text(s.as_str()),
        Data::Error(e) => Cell::Text(format!("#ERROR:{:?}", e)),
    }
}
