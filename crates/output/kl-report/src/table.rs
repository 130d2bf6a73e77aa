//! Fixed-width text tables.

use std::fmt;

/// Rendered for missing cell values.
pub const PLACEHOLDER: &str = "-";

/// A left-aligned text table.
///
/// Each column is as wide as its longest header or cell (in characters);
/// nothing is ever truncated.
///
/// ```
/// use kl_report::Table;
///
/// let mut table = Table::new(["Key ID", "Status"]);
/// table.push_row(["k1", "Enabled"]);
///
/// assert_eq!(
///     table.render(),
///     "| Key ID | Status  |\n+--------+---------+\n| k1     | Enabled |\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given header row.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing trailing cells are filled with [`PLACEHOLDER`].
    ///
    /// A row wider than the header widens the table: the extra columns get
    /// blank headers and earlier rows are filled with [`PLACEHOLDER`].
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();

        if row.len() > self.headers.len() {
            self.headers.resize(row.len(), String::new());
            for existing in &mut self.rows {
                existing.resize(row.len(), PLACEHOLDER.to_string());
            }
        }
        row.resize(self.headers.len(), PLACEHOLDER.to_string());

        self.rows.push(row);
    }

    /// Header cells.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column widths: the longest header or cell per column.
    pub fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();

        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        widths
    }

    /// Render header, rule and rows.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();

        write_row(f, &self.headers, &widths)?;
        for width in &widths {
            write!(f, "+-{}-", "-".repeat(*width))?;
        }
        writeln!(f, "+")?;

        for row in &self.rows {
            write_row(f, row, &widths)?;
        }

        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    for (cell, width) in cells.iter().zip(widths) {
        write!(f, "| {:<width$} ", cell, width = *width)?;
    }
    writeln!(f, "|")
}
