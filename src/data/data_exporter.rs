use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::data::datatable::Row;

/// MIME type attached to exported documents
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// A finished CSV export, ready for the host's download mechanism
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    /// Data rows written, not counting the header line
    pub row_count: usize,
}

impl CsvDocument {
    pub fn new(filename: impl Into<String>, text: String, row_count: usize) -> Self {
        Self {
            filename: filename.into(),
            mime_type: CSV_MIME_TYPE,
            bytes: text.into_bytes(),
            row_count,
        }
    }

    pub fn as_str(&self) -> &str {
        // Built from a String in `new`, so always valid UTF-8
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    /// Write the document into `dir` under its own filename
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        self.write_to(&path)?;
        Ok(path)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.bytes)
            .with_context(|| format!("Failed to write CSV export to {}", path.display()))?;
        info!(
            "Exported {} rows to CSV file: {}",
            self.row_count,
            path.display()
        );
        Ok(())
    }
}

/// Escape one field: trim, double embedded quotes, quote if needed
pub fn escape_csv_field(field: &str) -> String {
    let escaped = field.trim().replace('"', "\"\"");
    if escaped.contains(',') || escaped.contains('"') || escaped.contains('\n') || escaped.contains('\r')
    {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

fn csv_line<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    fields
        .into_iter()
        .map(escape_csv_field)
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize an optional header line plus `rows`, joined by `\n`
///
/// Rows are written exactly in the order given; callers pass the visible
/// rows in display order.
pub fn serialize<'a, I>(header: Option<&[String]>, rows: I) -> String
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut lines = Vec::new();

    if let Some(header) = header {
        lines.push(csv_line(header.iter().map(String::as_str)));
    }

    for row in rows {
        lines.push(csv_line(row.cells().iter().map(|c| c.text())));
    }

    lines.join("\n")
}
