use crate::error::FormatError;

/// Rows of string cells named by a header, the shape both parsers produce.
///
/// Every row holds exactly `columns().len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row read from input `line`.
    ///
    /// Missing cells are an error. Surplus cells are dropped when they are
    /// empty, which tolerates trailing tabs.
    pub fn push_row(&mut self, line: usize, mut cells: Vec<String>) -> Result<(), FormatError> {
        let expected = self.columns.len();
        let found = cells.len();
        if found < expected || cells[expected..].iter().any(|cell| !cell.is_empty()) {
            return Err(FormatError::RowWidth {
                line,
                expected,
                found,
            });
        }
        cells.truncate(expected);
        self.rows.push(cells);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}

/// Split a tab-delimited line, ignoring a trailing carriage return.
pub(crate) fn split_fields(line: &str) -> Vec<String> {
    line.trim_end_matches('\r')
        .split('\t')
        .map(str::to_string)
        .collect()
}
