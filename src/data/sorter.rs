use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::data::datatable::{Row, RowId, Table};
use crate::data::datavalue_compare::{compare_numbers, locale_compare};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    Descending,
    #[default]
    None,
}

impl SortOrder {
    /// CSS class the header cell carries for this order
    pub fn header_class(&self) -> Option<&'static str> {
        match self {
            SortOrder::Ascending => Some("sort-asc"),
            SortOrder::Descending => Some("sort-desc"),
            SortOrder::None => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
            SortOrder::None => write!(f, "unsorted"),
        }
    }
}

/// The single active sort of a table
///
/// `column` is `Some` only together with `Ascending` or `Descending`; the
/// default `(None, SortOrder::None)` is the unsorted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<usize>,
    pub order: SortOrder,
}

impl SortState {
    /// Register a click on `column`'s header and return the new order
    ///
    /// Clicking the column sorted ascending flips it to descending; anything
    /// else (unsorted, descending, another column) starts ascending.
    pub fn toggle(&mut self, column: usize) -> SortOrder {
        let next = match (self.column, self.order) {
            (Some(current), SortOrder::Ascending) if current == column => SortOrder::Descending,
            _ => SortOrder::Ascending,
        };
        self.column = Some(column);
        self.order = next;
        next
    }

    pub fn is_sorted(&self) -> bool {
        self.column.is_some() && self.order != SortOrder::None
    }

    /// Order indicator to show on `column`'s header
    pub fn indicator_for(&self, column: usize) -> SortOrder {
        if self.column == Some(column) {
            self.order
        } else {
            SortOrder::None
        }
    }
}

/// Comparator chosen once per sort for a whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnComparator {
    Numeric,
    Text,
}

/// Numeric only if every row holds a numeric cell at `column`
pub fn select_comparator(table: &Table, column: usize) -> ColumnComparator {
    let all_numeric = table
        .rows()
        .iter()
        .all(|row| row.get(column).is_some_and(|c| c.value().is_number()));

    if all_numeric {
        ColumnComparator::Numeric
    } else {
        ColumnComparator::Text
    }
}

fn compare_rows(a: &Row, b: &Row, column: usize, comparator: ColumnComparator) -> Ordering {
    match comparator {
        ColumnComparator::Numeric => {
            let a_num = a.get(column).and_then(|c| c.value().as_number());
            let b_num = b.get(column).and_then(|c| c.value().as_number());
            match (a_num, b_num) {
                (Some(x), Some(y)) => compare_numbers(x, y),
                _ => Ordering::Equal,
            }
        }
        ColumnComparator::Text => {
            let a_text = a.get(column).map_or("", |c| c.text());
            let b_text = b.get(column).map_or("", |c| c.text());
            locale_compare(a_text, b_text)
        }
    }
}

/// Stably reorder the table's rows by `column` and return the new row order
///
/// Visibility flags are not touched. `SortOrder::None` leaves the rows as
/// they are; controllers never pass it, since `SortState::toggle` always
/// yields a direction.
pub fn apply_sort(table: &mut Table, column: usize, order: SortOrder) -> Vec<RowId> {
    if order == SortOrder::None {
        return table.row_order();
    }

    let comparator = select_comparator(table, column);
    table.rows_mut().sort_by(|a, b| {
        let cmp = compare_rows(a, b, column, comparator);
        if order == SortOrder::Descending {
            cmp.reverse()
        } else {
            cmp
        }
    });

    debug!(
        "Sorted table {} by column {} ({}, {:?} comparator)",
        table.id(),
        column,
        order,
        comparator
    );
    table.row_order()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_texts(table: &Table, column: usize) -> Vec<String> {
        table
            .rows()
            .iter()
            .map(|r| r.get(column).map(|c| c.text().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_toggle_same_column() {
        let mut state = SortState::default();
        assert!(!state.is_sorted());
        assert_eq!(state.toggle(2), SortOrder::Ascending);
        assert_eq!(state.toggle(2), SortOrder::Descending);
        assert_eq!(state.toggle(2), SortOrder::Ascending);
    }

    #[test]
    fn test_toggle_other_column_resets() {
        let mut state = SortState::default();
        state.toggle(0);
        state.toggle(0);
        assert_eq!(state.order, SortOrder::Descending);

        assert_eq!(state.toggle(1), SortOrder::Ascending);
        assert_eq!(state.column, Some(1));
        assert_eq!(state.indicator_for(0), SortOrder::None);
        assert_eq!(state.indicator_for(1), SortOrder::Ascending);
    }

    #[test]
    fn test_active_column_always_has_direction() {
        let mut state = SortState::default();
        assert_eq!((state.column, state.order), (None, SortOrder::None));
        for column in [0, 0, 3, 1, 1, 1] {
            state.toggle(column);
            assert!(state.column.is_some());
            assert_ne!(state.order, SortOrder::None);
        }

        let mut table = Table::from_rows("t", [["b"], ["a"]]);
        assert_eq!(apply_sort(&mut table, 0, SortOrder::None), vec![0, 1]);
    }

    #[test]
    fn test_numeric_column() {
        let mut table = Table::from_rows("t", [["9"], ["10"], ["2"]]);
        assert_eq!(select_comparator(&table, 0), ColumnComparator::Numeric);
        apply_sort(&mut table, 0, SortOrder::Ascending);
        assert_eq!(column_texts(&table, 0), vec!["2", "9", "10"]);
    }

    #[test]
    fn test_formatted_numbers() {
        let mut table = Table::from_rows("t", [["$1,200"], ["$95"], ["$3,050.75"]]);
        apply_sort(&mut table, 0, SortOrder::Descending);
        assert_eq!(column_texts(&table, 0), vec!["$3,050.75", "$1,200", "$95"]);
    }

    #[test]
    fn test_mixed_column_falls_back_to_text() {
        let mut table = Table::from_rows("t", [["10"], ["n/a"], ["9"], ["2"]]);
        assert_eq!(select_comparator(&table, 0), ColumnComparator::Text);
        apply_sort(&mut table, 0, SortOrder::Ascending);
        assert_eq!(column_texts(&table, 0), vec!["10", "2", "9", "n/a"]);
    }

    #[test]
    fn test_empty_cell_makes_column_textual() {
        let table = Table::from_rows("t", [["1"], [""]]);
        assert_eq!(select_comparator(&table, 0), ColumnComparator::Text);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut table = Table::from_rows(
            "t",
            [["b", "1"], ["a", "2"], ["b", "3"], ["a", "4"], ["b", "5"]],
        );
        apply_sort(&mut table, 0, SortOrder::Ascending);
        assert_eq!(column_texts(&table, 1), vec!["2", "4", "1", "3", "5"]);

        apply_sort(&mut table, 0, SortOrder::Descending);
        assert_eq!(column_texts(&table, 1), vec!["1", "3", "5", "2", "4"]);
    }

    #[test]
    fn test_sort_keeps_visibility() {
        let mut table = Table::from_rows("t", [["3"], ["1"], ["2"]]);
        table.rows_mut()[0].set_visible(false);
        apply_sort(&mut table, 0, SortOrder::Ascending);
        assert_eq!(table.row_order(), vec![1, 2, 0]);
        assert_eq!(table.visible_row_ids(), vec![1, 2]);
    }

    #[test]
    fn test_out_of_range_column_is_noop() {
        let mut table = Table::from_rows("t", [["b"], ["a"]]);
        let order = apply_sort(&mut table, 7, SortOrder::Ascending);
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_empty_table() {
        let mut table = Table::new("empty");
        assert!(apply_sort(&mut table, 0, SortOrder::Descending).is_empty());
    }
}
