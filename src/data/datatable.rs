use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::type_inference::TypeInference;

/// Stable identifier of a table within a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableId(String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TableId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identity of a row, fixed at load time so it survives reordering
pub type RowId = usize;

/// Numeric or textual interpretation of a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }
}

/// A single rendered cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    text: String,
    value: CellValue,
}

impl Cell {
    /// Create a cell from rendered text; surrounding whitespace is dropped
    pub fn new(text: impl AsRef<str>) -> Self {
        let text = text.as_ref().trim().to_string();
        let value = match TypeInference::parse_number(&text) {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(text.clone()),
        };
        Self { text, value }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &CellValue {
        &self.value
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A row of cells aligned with the table's columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    cells: Vec<Cell>,
    visible: bool,
}

impl Row {
    pub fn new(id: RowId, cells: Vec<Cell>) -> Self {
        Self {
            id,
            cells,
            visible: true,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Cell texts joined with `separator`, as a search target
    pub fn joined_text(&self, separator: &str) -> String {
        self.cells
            .iter()
            .map(Cell::text)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// One interactive table: an optional header plus body rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    id: TableId,
    header: Option<Vec<String>>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(id: impl Into<TableId>) -> Self {
        Self {
            id: id.into(),
            header: None,
            rows: Vec::new(),
        }
    }

    /// Build a table from raw cell texts; row ids follow input order
    pub fn from_rows<I, R, S>(id: impl Into<TableId>, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new(id);
        for cells in rows {
            table.push_row(cells);
        }
        table
    }

    pub fn with_header<I, S>(mut self, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.header = Some(
            header
                .into_iter()
                .map(|h| h.as_ref().trim().to_string())
                .collect(),
        );
        self
    }

    /// Append a row and return its id
    pub fn push_row<R, S>(&mut self, cells: R) -> RowId
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = self.rows.len();
        let cells = cells.into_iter().map(Cell::new).collect();
        self.rows.push(Row::new(id, cells));
        id
    }

    pub fn id(&self) -> &TableId {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: TableId) {
        self.id = id;
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Column index for a header label, compared case-insensitively
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.header
            .as_ref()?
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name.trim()))
    }

    /// Number of columns, taken from the header or the widest row
    pub fn column_count(&self) -> usize {
        let widest = self.rows.iter().map(Row::len).max().unwrap_or(0);
        self.header.as_ref().map_or(widest, |h| h.len().max(widest))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.is_visible())
    }

    /// Row ids in current display order
    pub fn row_order(&self) -> Vec<RowId> {
        self.rows.iter().map(Row::id).collect()
    }

    /// Ids of visible rows in current display order
    pub fn visible_row_ids(&self) -> Vec<RowId> {
        self.visible_rows().map(Row::id).collect()
    }

    /// Cell texts of the rows in display order, for debugging and tests
    pub fn to_string_table(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.cells().iter().map(|c| c.text().to_string()).collect())
            .collect()
    }
}
