use tracing::debug;

use crate::data::data_exporter::{self, CsvDocument};
use crate::data::datatable::{RowId, Table, TableId};
use crate::data::search_filter::{self, SearchOptions};
use crate::data::sorter::{self, SortOrder, SortState};
use crate::view::render::RenderState;

/// Filter axis of a controller's state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    Unfiltered,
    Filtered(String),
}

impl FilterState {
    pub fn query(&self) -> &str {
        match self {
            FilterState::Unfiltered => "",
            FilterState::Filtered(q) => q,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, FilterState::Filtered(_))
    }
}

/// Options a controller is bound with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub search: SearchOptions,
    /// Whether exports start with the header line
    pub include_header: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            search: SearchOptions::default(),
            include_header: true,
        }
    }
}

/// Drives filter, sort and export for one bound table
///
/// Filter and sort are independent: searching never reorders rows and sorting
/// never changes which rows are visible.
#[derive(Debug, Clone)]
pub struct TableController {
    table: Table,
    sort: SortState,
    filter: FilterState,
    options: ControllerOptions,
}

impl TableController {
    pub fn new(table: Table) -> Self {
        Self::with_options(table, ControllerOptions::default())
    }

    pub fn with_options(table: Table, options: ControllerOptions) -> Self {
        Self {
            table,
            sort: SortState::default(),
            filter: FilterState::default(),
            options,
        }
    }

    pub fn table_id(&self) -> &TableId {
        self.table.id()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Apply a search query and return the ids of rows now visible
    pub fn search(&mut self, text: &str) -> Vec<RowId> {
        crate::trace_operation!(format!("search {:?} on {}", text, self.table.id()));
        self.filter = match search_filter::normalize_query(text) {
            Some(_) => FilterState::Filtered(text.to_string()),
            None => FilterState::Unfiltered,
        };
        debug!(
            "Table {}: filter state -> {:?}",
            self.table.id(),
            self.filter
        );
        search_filter::apply_filter(&mut self.table, text, &self.options.search)
    }

    /// Handle a click on a column header and return the new row order
    pub fn sort_by_column(&mut self, column: usize) -> Vec<RowId> {
        crate::trace_operation!(format!("header click {} on {}", column, self.table.id()));
        let order = self.sort.toggle(column);
        debug!(
            "Table {}: sort state -> column {} {}",
            self.table.id(),
            column,
            order
        );
        sorter::apply_sort(&mut self.table, column, order)
    }

    /// Handle a header click addressed by label instead of index
    ///
    /// Returns `None` when no header has that label.
    pub fn sort_by_column_name(&mut self, name: &str) -> Option<Vec<RowId>> {
        let column = self.table.get_column_index(name)?;
        Some(self.sort_by_column(column))
    }

    /// Export the rows currently visible, in their current order
    pub fn export_csv(&self, filename: &str) -> CsvDocument {
        let header = if self.options.include_header {
            self.table.header()
        } else {
            None
        };
        let rows: Vec<_> = self.table.visible_rows().collect();
        let text = data_exporter::serialize(header, rows.iter().copied());

        debug!(
            "Table {}: exporting {} of {} rows as {}",
            self.table.id(),
            rows.len(),
            self.table.row_count(),
            filename
        );
        CsvDocument::new(filename, text, rows.len())
    }

    /// Current sort order shown on `column`'s header
    pub fn column_indicator(&self, column: usize) -> SortOrder {
        self.sort.indicator_for(column)
    }

    pub fn render_state(&self) -> RenderState {
        RenderState::from_controller(self)
    }
}
