use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::{DiarioError, DiarioResult};
use crate::domain::repositories::{Loaded, SalesRepository};
use crate::domain::sales::SaleRecord;
use crate::domain::user::RepresentativeId;
use crate::infrastructure::spreadsheet::cells::{Cell, RowReader};
use crate::infrastructure::spreadsheet::{
    file_label, load_rows, read_table, run_blocking, schema, write_table, RawTable,
};

/// Sales table stored in a spreadsheet
///
/// Appends are serialized through an in-process lock; the file is rewritten
/// with its original headers and columns plus the new row.
pub struct SpreadsheetSalesRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SpreadsheetSalesRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl SalesRepository for SpreadsheetSalesRepository {
    async fn load_all(&self) -> DiarioResult<Loaded<SaleRecord>> {
        let path = self.path.clone();
        run_blocking(move || load_rows(&path, &schema::SALES, parse_sale)).await
    }

    async fn append(&self, sale: &SaleRecord) -> DiarioResult<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        let row = sale.clone();
        run_blocking(move || append_row(&path, &row)).await?;

        tracing::info!(
            "Appended sale of {} for {} to {}",
            sale.amount,
            sale.representative_id,
            file_label(&self.path)
        );
        Ok(())
    }
}

fn append_row(path: &Path, sale: &SaleRecord) -> DiarioResult<()> {
    let file = file_label(path);
    let mut table = match read_table(path) {
        Ok(table) => table,
        Err(DiarioError::MissingFile { .. }) => RawTable {
            headers: schema::SALES.fields().map(str::to_string).collect(),
            rows: Vec::new(),
        },
        Err(e) => return Err(e),
    };
    let columns = schema::SALES.resolve(&file, &table.headers)?;

    let mut cells = vec![Cell::Empty; table.headers.len()];
    let mut put = |field: &str, cell: Cell| {
        if let Some(index) = columns.index(field) {
            cells[index] = cell;
        }
    };
    put("representative_id", Cell::text(sale.representative_id.as_str()));
    put("client_name", Cell::text(sale.client_name.as_str()));
    put("city", Cell::optional_text(sale.city.as_deref()));
    put("collection", Cell::text(sale.collection.as_str()));
    put("brand", Cell::optional_text(sale.brand.as_deref()));
    put("quantity", Cell::decimal(sale.quantity));
    put("amount", Cell::decimal(sale.amount));
    put("discount", Cell::decimal(sale.discount));
    put("term", Cell::optional_text(sale.term.as_deref()));
    put("date", sale.date.map_or(Cell::Empty, Cell::Date));

    let next_row = table.rows.last().map_or(2, |(row, _)| row + 1);
    table.rows.push((next_row, cells));

    let rows: Vec<Vec<Cell>> = table.rows.into_iter().map(|(_, cells)| cells).collect();
    write_table(path, &table.headers, &rows)
}

/// Rows without representative, client or collection cannot be attributed
/// and are skipped
fn parse_sale(row: &mut RowReader<'_>) -> Option<SaleRecord> {
    let representative_id = row
        .text("representative_id")
        .and_then(|raw| RepresentativeId::new(raw).ok());
    let client_name = row.text("client_name");
    let collection = row.text("collection");

    let (Some(representative_id), Some(client_name), Some(collection)) =
        (representative_id, client_name, collection)
    else {
        row.warn(
            "representative_id",
            String::new(),
            "row lacks representative, client or collection; skipped",
        );
        return None;
    };
    row.attribute_to(&representative_id);

    Some(SaleRecord {
        representative_id,
        client_name,
        city: row.text("city"),
        collection,
        brand: row.text("brand"),
        quantity: row.decimal_or_zero("quantity", false),
        amount: row.decimal_or_zero("amount", true),
        discount: row.decimal_or_zero("discount", false),
        term: row.text("term"),
        date: row.date("date"),
    })
}
