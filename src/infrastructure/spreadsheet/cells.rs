// Cell values and lenient typed access to table rows
// Bad cells are coerced and recorded; they never abort a load

use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::schema::ResolvedColumns;
use crate::domain::errors::DataQualityWarning;
use crate::domain::user::RepresentativeId;

/// A spreadsheet cell, independent of the library that read it
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, Cell::text)
    }

    pub fn decimal(value: Decimal) -> Self {
        value.to_f64().map_or(Cell::Empty, Cell::Number)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering used for warnings and text fields
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    format!("{:.0}", n)
                } else {
                    n.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Parses a numeric text cell
///
/// Accepts currency prefixes, percent suffixes and both `1,234.56` and
/// `1.234,56` grouping.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .trim_end_matches('%')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind('.'), cleaned.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, Some(_)) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    normalized.parse::<Decimal>().ok()
}

/// Parses a date cell written as text
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y"];
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Converts an Excel serial day number (1900 system) to a date
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}

static EMPTY: Cell = Cell::Empty;

/// Typed, warning-collecting view over one data row
pub struct RowReader<'a> {
    file: &'a str,
    row_number: usize,
    cells: &'a [Cell],
    columns: &'a ResolvedColumns,
    warnings: &'a mut Vec<DataQualityWarning>,
    owner: Option<String>,
}

impl<'a> RowReader<'a> {
    /// `row_number` is the 1-based sheet row, header being row 1
    pub fn new(
        file: &'a str,
        row_number: usize,
        cells: &'a [Cell],
        columns: &'a ResolvedColumns,
        warnings: &'a mut Vec<DataQualityWarning>,
    ) -> Self {
        Self {
            file,
            row_number,
            cells,
            columns,
            warnings,
            owner: None,
        }
    }

    /// Tags later warnings of this row with the representative it belongs to
    pub fn attribute_to(&mut self, representative_id: &RepresentativeId) {
        self.owner = Some(representative_id.as_str().to_string());
    }

    pub fn row_number(&self) -> usize {
        self.row_number
    }

    fn cell(&self, field: &str) -> &Cell {
        self.columns
            .index(field)
            .and_then(|i| self.cells.get(i))
            .unwrap_or(&EMPTY)
    }

    pub fn warn(&mut self, field: &str, value: String, message: impl Into<String>) {
        let warning = DataQualityWarning {
            file: self.file.to_string(),
            row: self.row_number,
            column: field.to_string(),
            value,
            message: message.into(),
            representative_id: self.owner.clone(),
        };
        tracing::warn!("Data quality: {}", warning);
        self.warnings.push(warning);
    }

    /// Trimmed text, `None` for blank cells
    pub fn text(&self, field: &str) -> Option<String> {
        let cell = self.cell(field);
        if cell.is_empty() {
            None
        } else {
            Some(cell.as_text())
        }
    }

    /// Numeric value, `None` for blank cells; unparsable text is recorded
    pub fn decimal(&mut self, field: &str) -> Option<Decimal> {
        let cell = self.cell(field).clone();
        match cell {
            Cell::Empty => None,
            Cell::Number(n) => {
                let value = Decimal::from_f64(n);
                if value.is_none() {
                    self.warn(field, n.to_string(), "number out of range");
                }
                value
            }
            Cell::Text(ref s) if s.trim().is_empty() => None,
            Cell::Text(ref s) => {
                let value = parse_decimal(s);
                if value.is_none() {
                    self.warn(field, s.clone(), "not a number");
                }
                value
            }
            other => {
                self.warn(field, other.as_text(), "not a number");
                None
            }
        }
    }

    /// Numeric value coerced to zero when blank, invalid or negative
    ///
    /// Blank cells are only recorded when `required` is set.
    pub fn decimal_or_zero(&mut self, field: &str, required: bool) -> Decimal {
        let blank = self.cell(field).is_empty();
        match self.decimal(field) {
            Some(value) if value < Decimal::ZERO => {
                self.warn(field, value.to_string(), "negative value, using 0");
                Decimal::ZERO
            }
            Some(value) => value,
            None => {
                if blank && required {
                    self.warn(field, String::new(), "blank value, using 0");
                }
                Decimal::ZERO
            }
        }
    }

    /// Date value, `None` for blank cells; unparsable values are recorded
    pub fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let cell = self.cell(field).clone();
        let parsed = match &cell {
            Cell::Empty => return None,
            Cell::Date(d) => Some(*d),
            Cell::Number(n) => excel_serial_to_date(*n),
            Cell::Text(s) => parse_date(s),
            Cell::Bool(_) => None,
        };
        if parsed.is_none() {
            self.warn(field, cell.as_text(), "not a date");
        }
        parsed
    }

    /// Boolean flag; blank cells read as `default`
    pub fn flag(&mut self, field: &str, default: bool) -> bool {
        let cell = self.cell(field).clone();
        match cell {
            Cell::Empty => default,
            Cell::Bool(b) => b,
            Cell::Number(n) => n != 0.0,
            Cell::Text(ref s) => match s.trim().to_lowercase().as_str() {
                "" => default,
                "sim" | "s" | "yes" | "y" | "true" | "x" | "1" => true,
                "não" | "nao" | "n" | "no" | "false" | "0" => false,
                _ => {
                    self.warn(field, s.clone(), "not a yes/no value");
                    default
                }
            },
            Cell::Date(_) => {
                self.warn(field, cell.as_text(), "not a yes/no value");
                default
            }
        }
    }
}
