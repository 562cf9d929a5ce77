use tracing::debug;

use crate::data::datatable::{Row, RowId, Table};

/// Options controlling how a row is turned into searchable text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Inserted between cell texts before matching
    pub cell_separator: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            cell_separator: " ".to_string(),
        }
    }
}

/// Lowercased form of a query, or `None` when the query shows everything
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Whether a row matches an already normalized query
pub fn row_matches(row: &Row, normalized: &str, options: &SearchOptions) -> bool {
    row.joined_text(&options.cell_separator)
        .to_lowercase()
        .contains(normalized)
}

/// Update every row's visibility for `query` and return the visible row ids
///
/// Row order is left untouched. A blank query shows every row.
pub fn apply_filter(table: &mut Table, query: &str, options: &SearchOptions) -> Vec<RowId> {
    let normalized = normalize_query(query);

    for row in table.rows_mut().iter_mut() {
        let visible = match &normalized {
            Some(q) => row_matches(row, q, options),
            None => true,
        };
        row.set_visible(visible);
    }

    let visible = table.visible_row_ids();
    debug!(
        "Filter {:?} on table {}: {}/{} rows visible",
        query,
        table.id(),
        visible.len(),
        table.row_count()
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access_log() -> Table {
        Table::from_rows(
            "access",
            [
                ["192.168.1.10", "TCP_MISS", "www.example.com"],
                ["192.168.1.22", "TCP_HIT", "cdn.Example.org"],
                ["10.0.0.5", "TCP_DENIED", "ads.tracker.net"],
            ],
        )
    }

    #[test]
    fn test_case_insensitive_match() {
        let mut table = access_log();
        let visible = apply_filter(&mut table, "EXAMPLE", &SearchOptions::default());
        assert_eq!(visible, vec![0, 1]);
        assert!(!table.rows()[2].is_visible());
    }

    #[test]
    fn test_blank_query_shows_all() {
        let mut table = access_log();
        apply_filter(&mut table, "denied", &SearchOptions::default());
        assert_eq!(table.visible_row_ids(), vec![2]);

        let visible = apply_filter(&mut table, "   ", &SearchOptions::default());
        assert_eq!(visible, vec![0, 1, 2]);
        let visible = apply_filter(&mut table, "", &SearchOptions::default());
        assert_eq!(visible, vec![0, 1, 2]);
    }

    #[test]
    fn test_no_match_hides_everything() {
        let mut table = access_log();
        let visible = apply_filter(&mut table, "nothing-here", &SearchOptions::default());
        assert!(visible.is_empty());
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_match_spans_cells_with_separator() {
        let mut table = access_log();
        let visible = apply_filter(&mut table, "tcp_hit cdn", &SearchOptions::default());
        assert_eq!(visible, vec![1]);

        let tight = SearchOptions {
            cell_separator: String::new(),
        };
        let visible = apply_filter(&mut table, "tcp_hit cdn", &tight);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_accented_case_insensitive_match() {
        let mut table = Table::from_rows("usuarios", [["ÁRBOL", "Núñez"], ["arbol", "Nunez"]]);
        let visible = apply_filter(&mut table, "árbol", &SearchOptions::default());
        assert_eq!(visible, vec![0]);

        let visible = apply_filter(&mut table, "NÚÑEZ", &SearchOptions::default());
        assert_eq!(visible, vec![0]);
    }

    #[test]
    fn test_empty_table() {
        let mut table = Table::new("empty");
        assert!(apply_filter(&mut table, "x", &SearchOptions::default()).is_empty());
    }
}
