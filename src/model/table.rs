//! Table types.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

impl Alignment {
    /// Alignment of a separator cell such as `---`, `:-:` or `--:`.
    pub fn from_separator(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.len() > 1 && cell.starts_with(':') && cell.ends_with(':') {
            Alignment::Center
        } else if cell.ends_with(':') {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }

    /// CSS `text-align` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A pipe-delimited table.
///
/// The header row fixes the column count. Body rows keep whatever number
/// of cells they were written with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Alignment per column, from the separator row
    pub alignments: Vec<Alignment>,

    /// Header cells
    pub header: Vec<String>,

    /// Body rows
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from its header and alignments.
    pub fn new(header: Vec<String>, alignments: Vec<Alignment>) -> Self {
        Self {
            alignments,
            header,
            rows: Vec::new(),
        }
    }

    /// Add a body row.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Get the number of columns (based on the header).
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Alignment of a column; columns past the separator are left-aligned.
    pub fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }
}
