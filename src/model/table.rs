//! Table types.

use serde::{Deserialize, Serialize};

/// A table recognized from aligned text rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of header rows (0 = no header)
    pub header_rows: u8,

    /// Whether an accessible role marker has been attached.
    ///
    /// Newly inferred tables carry no marker; the remediation pass (or a
    /// downstream tag writer) attaches one. The scorer penalizes tables
    /// that still lack it.
    #[serde(default)]
    pub role_marker: bool,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            header_rows: 0,
            role_marker: false,
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Attach an accessible role marker.
    pub fn with_role_marker(mut self) -> Self {
        self.role_marker = true;
        self
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header rows.
    pub fn header(&self) -> &[TableRow] {
        &self.rows[..(self.header_rows as usize).min(self.rows.len())]
    }

    /// Body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        &self.rows[(self.header_rows as usize).min(self.rows.len())..]
    }

    /// Plain text representation, one row per line.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    pub is_header: bool,
}

impl TableRow {
    /// Create a new body row.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::new).collect())
    }

    /// Tab-joined plain text.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,
}

impl TableCell {
    /// Create a new cell.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_with_data() {
        let mut table = Table::new();
        table.header_rows = 1;
        table.add_row(TableRow::header(vec![
            TableCell::new("Name"),
            TableCell::new("Age"),
        ]));
        table.add_row(TableRow::from_strings(["Alice", "30"]));
        table.add_row(TableRow::from_strings(["Bob", "25"]));

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.header().len(), 1);
        assert_eq!(table.body().len(), 2);
        assert!(!table.role_marker);
    }

    #[test]
    fn test_role_marker() {
        let table = Table::new().with_role_marker();
        assert!(table.role_marker);
    }

    #[test]
    fn test_plain_text() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a", "b"]));
        table.add_row(TableRow::from_strings(["c", "d"]));
        assert_eq!(table.plain_text(), "a\tb\nc\td");
    }
}
