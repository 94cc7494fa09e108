// Text normalization shared by the domain
// Spreadsheet cells are typed by hand; compare names after folding

/// Trims and lower-cases a free-text value for comparison
pub fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case- and whitespace-insensitive equality
pub fn same_name(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}
