//! Declarative render output
//!
//! Nothing here mutates a live document. A host adapter takes these values and
//! applies them: hide rows, move rows, set header classes, swap the theme
//! toggle's icon and label.

use comfy_table::{Attribute, Cell, ContentArrangement, Table as TextTable};

use crate::data::datatable::RowId;
use crate::data::sorter::SortOrder;
use crate::data::table_controller::TableController;
use crate::view::preference::ViewPreference;

/// Body class present while dark mode is on
pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderState {
    pub label: String,
    pub sort: SortOrder,
}

impl HeaderState {
    pub fn class(&self) -> Option<&'static str> {
        self.sort.header_class()
    }
}

/// Snapshot of what a bound table should currently look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub table_id: String,
    pub headers: Vec<HeaderState>,
    /// Every row id, in display order
    pub row_order: Vec<RowId>,
    pub hidden_rows: Vec<RowId>,
}

impl RenderState {
    pub fn from_controller(controller: &TableController) -> Self {
        let table = controller.table();
        let headers = table
            .header()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(idx, label)| HeaderState {
                label: label.clone(),
                sort: controller.column_indicator(idx),
            })
            .collect();

        let hidden_rows = table
            .rows()
            .iter()
            .filter(|r| !r.is_visible())
            .map(|r| r.id())
            .collect();

        Self {
            table_id: table.id().to_string(),
            headers,
            row_order: table.row_order(),
            hidden_rows,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.row_order.len() - self.hidden_rows.len()
    }
}

/// How the navbar dark-mode toggle should render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeToggle {
    pub body_class: Option<&'static str>,
    pub icon: &'static str,
    pub label: &'static str,
}

/// The toggle offers the mode you are not in
pub fn theme_toggle(preference: ViewPreference) -> ThemeToggle {
    if preference.dark_mode {
        ThemeToggle {
            body_class: Some(DARK_MODE_CLASS),
            icon: "fa-sun",
            label: "Modo claro",
        }
    } else {
        ThemeToggle {
            body_class: None,
            icon: "fa-moon",
            label: "Modo oscuro",
        }
    }
}

fn header_label(header: &HeaderState) -> String {
    match header.sort {
        SortOrder::Ascending => format!("{} ↑", header.label),
        SortOrder::Descending => format!("{} ↓", header.label),
        SortOrder::None => header.label.clone(),
    }
}

/// Render the visible rows as a terminal table
pub fn render_text_table(controller: &TableController) -> String {
    let state = RenderState::from_controller(controller);
    let mut table = TextTable::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if !state.headers.is_empty() {
        let headers: Vec<Cell> = state
            .headers
            .iter()
            .map(|h| Cell::new(header_label(h)).add_attribute(Attribute::Bold))
            .collect();
        table.set_header(headers);
    }

    for row in controller.table().visible_rows() {
        table.add_row(row.cells().iter().map(|c| c.text().to_string()));
    }

    format!(
        "{table}\n{} of {} rows shown",
        state.visible_count(),
        state.row_order.len()
    )
}
