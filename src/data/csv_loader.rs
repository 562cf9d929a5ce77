/// CSV to Table loader, used by the command line adapter
use crate::data::datatable::Table;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub struct CsvLoader;

impl CsvLoader {
    /// Load a CSV file whose first record is the header row
    pub fn load_csv<P: AsRef<Path>>(path: P, table_id: &str) -> Result<Table> {
        let path = path.as_ref();
        info!("Loading {} into table {}", path.display(), table_id);

        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let table = Self::load_reader(file, table_id)
            .with_context(|| format!("Failed to parse CSV file {}", path.display()))?;

        info!(
            "CSV load complete: {} rows, {} columns",
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }

    /// Load CSV text from any reader; ragged rows are kept as they are
    pub fn load_reader<R: Read>(reader: R, table_id: &str) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut table = Table::new(table_id).with_header(headers.iter());

        for result in reader.records() {
            let record = result?;
            table.push_row(record.iter());
        }

        debug!("Parsed {} records for table {}", table.row_count(), table_id);
        Ok(table)
    }
}
