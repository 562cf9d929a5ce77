pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod utils;
pub mod view;

pub use data::data_exporter::CsvDocument;
pub use data::datatable::{Cell, CellValue, Row, RowId, Table, TableId};
pub use data::document::Document;
pub use data::sorter::{SortOrder, SortState};
pub use data::table_controller::{ControllerOptions, FilterState, TableController};
pub use error::TableError;
