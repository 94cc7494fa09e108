use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::errors::{DiarioError, DiarioResult};
use crate::domain::kanban::{ActionItem, ActionStatus};
use crate::domain::repositories::{ActionItemRepository, Loaded, TableVersion};
use crate::domain::user::RepresentativeId;
use crate::infrastructure::spreadsheet::cells::{Cell, RowReader};
use crate::infrastructure::spreadsheet::{
    file_label, load_rows, read_table, run_blocking, schema, write_table,
};

/// Action items table stored in a spreadsheet
///
/// Saves are serialized through an in-process lock and rejected when the
/// file changed since the caller loaded it.
pub struct SpreadsheetActionItemRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SpreadsheetActionItemRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl ActionItemRepository for SpreadsheetActionItemRepository {
    async fn load(&self) -> DiarioResult<(Loaded<ActionItem>, TableVersion)> {
        let path = self.path.clone();
        run_blocking(move || {
            let version = current_version(&path)?;
            if version == TableVersion::missing() {
                return Ok((Loaded::empty(), version));
            }
            let loaded = load_rows(&path, &schema::ACTION_ITEMS, |row| parse_item(row, &version))?;
            Ok((loaded, version))
        })
        .await
    }

    async fn save_all(
        &self,
        items: &[ActionItem],
        expected: &TableVersion,
    ) -> DiarioResult<TableVersion> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        let items = items.to_vec();
        let expected = expected.clone();

        let version = run_blocking(move || {
            if current_version(&path)? != expected {
                return Err(DiarioError::Conflict {
                    file: file_label(&path),
                });
            }
            let (headers, rows) = merge_items(&path, &expected, items)?;
            write_table(&path, &headers, &rows)?;
            current_version(&path)
        })
        .await?;

        tracing::info!("Saved action board to {}", file_label(&self.path));
        Ok(version)
    }
}

fn current_version(path: &Path) -> DiarioResult<TableVersion> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(TableVersion::new(meta.modified()?, meta.len())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(TableVersion::missing()),
        Err(e) => Err(e.into()),
    }
}

/// Key of a row as seen by a load of `version`
///
/// Rows without a usable key get one derived from the file version and the
/// row number, so a save against the same version finds the same row.
fn row_key(raw: Option<&str>, version: &TableVersion, row_number: usize) -> Uuid {
    raw.and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_else(|| {
            let seed = format!("{:?}#{}", version, row_number);
            Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes())
        })
}

/// Writes the board into the table as it is on disk
///
/// Rows keep their position and every cell outside the schema. Rows the
/// board does not hold, including rows skipped on load, are left as they
/// are. Items new to the table go at the end. Fields the sheet has no
/// column for get one appended under the canonical name.
fn merge_items(
    path: &Path,
    version: &TableVersion,
    items: Vec<ActionItem>,
) -> DiarioResult<(Vec<String>, Vec<Vec<Cell>>)> {
    let (mut headers, existing) = if *version == TableVersion::missing() {
        (Vec::new(), Vec::new())
    } else {
        let table = read_table(path)?;
        (table.headers, table.rows)
    };

    let resolved = if headers.is_empty() {
        None
    } else {
        Some(schema::ACTION_ITEMS.resolve(&file_label(path), &headers)?)
    };
    let columns: Vec<usize> = schema::ACTION_ITEMS
        .fields()
        .map(|field| {
            match resolved.as_ref().and_then(|columns| columns.index(field)) {
                Some(index) => index,
                None => {
                    headers.push(field.to_string());
                    headers.len() - 1
                }
            }
        })
        .collect();

    let mut pending: HashMap<Uuid, ActionItem> =
        items.iter().map(|item| (item.id(), item.clone())).collect();
    let id_column = columns[0];

    let mut rows = Vec::with_capacity(existing.len() + pending.len());
    for (row_number, mut cells) in existing {
        let raw_id = cells.get(id_column).filter(|c| !c.is_empty()).map(Cell::as_text);
        if let Some(item) = pending.remove(&row_key(raw_id.as_deref(), version, row_number)) {
            cells.resize(headers.len(), Cell::Empty);
            fill_item(&mut cells, &columns, &item);
        }
        rows.push(cells);
    }

    for item in items.iter().filter(|item| pending.contains_key(&item.id())) {
        let mut cells = vec![Cell::Empty; headers.len()];
        fill_item(&mut cells, &columns, item);
        rows.push(cells);
    }

    Ok((headers, rows))
}

/// Schema cells of an item, in field order: id, representative, client,
/// action, status, comment
fn fill_item(cells: &mut [Cell], columns: &[usize], item: &ActionItem) {
    let values = [
        Cell::text(item.id().to_string()),
        Cell::text(item.representative_id().as_str()),
        Cell::text(item.client_name()),
        Cell::text(item.suggested_action()),
        Cell::text(item.status().label()),
        Cell::optional_text(item.comment()),
    ];
    for (&column, value) in columns.iter().zip(values) {
        cells[column] = value;
    }
}

fn parse_item(row: &mut RowReader<'_>, version: &TableVersion) -> Option<ActionItem> {
    let representative_id = row
        .text("representative_id")
        .and_then(|raw| RepresentativeId::new(raw).ok());
    let client_name = row.text("client_name");
    let (Some(representative_id), Some(client_name)) = (representative_id, client_name) else {
        row.warn(
            "representative_id",
            String::new(),
            "action lacks representative or client; skipped",
        );
        return None;
    };
    row.attribute_to(&representative_id);

    let raw_id = row.text("id");
    match &raw_id {
        Some(raw) if Uuid::parse_str(raw).is_err() => {
            row.warn("id", raw.clone(), "not a valid key, assigning a new one");
        }
        None => tracing::debug!("Action row {} has no key, assigning one", row.row_number()),
        Some(_) => {}
    }
    let id = row_key(raw_id.as_deref(), version, row.row_number());

    let status = match row.text("status") {
        None => ActionStatus::ToDo,
        Some(raw) => ActionStatus::parse(&raw).unwrap_or_else(|| {
            row.warn("status", raw, "unknown status, using To Do");
            ActionStatus::ToDo
        }),
    };

    Some(ActionItem::from_persistence(
        id,
        representative_id,
        client_name,
        row.text("suggested_action").unwrap_or_default(),
        status,
        row.text("comment"),
    ))
}
