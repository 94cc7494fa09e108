use std::fs;
use std::path::Path;

use super::cells::Cell;
use super::file_label;
use crate::domain::errors::{DiarioError, DiarioResult};

/// Writes a whole table to a new xlsx workbook, replacing the file
///
/// The workbook is serialized in memory, written next to the target and
/// renamed over it, so readers never see a half-written file.
pub fn write_table(path: &Path, headers: &[String], rows: &[Vec<Cell>]) -> DiarioResult<()> {
    let file = file_label(path);
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or_else(|| DiarioError::Spreadsheet {
            file: file.clone(),
            message: "Failed to create worksheet".to_string(),
        })?;

    for (col, header) in headers.iter().enumerate() {
        sheet
            .get_cell_mut((col as u32 + 1, 1))
            .set_value(header.clone());
    }

    for (row_index, row) in rows.iter().enumerate() {
        let row_number = row_index as u32 + 2;
        for (col, cell) in row.iter().enumerate() {
            let target = sheet.get_cell_mut((col as u32 + 1, row_number));
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    target.set_value(text.clone());
                }
                Cell::Number(n) => {
                    target.set_value_number(*n);
                }
                Cell::Bool(b) => {
                    target.set_value_bool(*b);
                }
                Cell::Date(d) => {
                    target.set_value(d.format("%Y-%m-%d").to_string());
                }
            }
        }
    }

    let mut out: Vec<u8> = Vec::new();
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out).map_err(|e| {
        DiarioError::Spreadsheet {
            file: file.clone(),
            message: format!("Failed to serialize workbook: {}", e),
        }
    })?;

    let tmp = path.with_extension("xlsx.tmp");
    fs::write(&tmp, &out)?;
    fs::rename(&tmp, path)?;

    tracing::debug!("Wrote {} rows to {}", rows.len(), file);
    Ok(())
}
