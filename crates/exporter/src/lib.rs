//! CSV Export
//!
//! Serializes a processed table to downloadable bytes: header row in column
//! order, one record per row, shortest round-trip float formatting so boosted
//! values re-parse exactly.

use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use signal_table::{ColumnData, Table};
use thiserror::Error;

/// Media type reported for the artifact.
pub const EXPORT_MEDIA_TYPE: &str = "text/csv";

const FILENAME_PREFIX: &str = "demo_signal_enhancement";

/// Serialization failures; terminal for the request.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not serialize the table: {0}")]
    Write(#[from] csv::Error),

    #[error("could not finalize the artifact: {0}")]
    Flush(String),
}

/// Downloadable artifact produced from a processed table.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub media_type: &'static str,
}

/// Encode `table` as CSV bytes with a filename carrying the current date.
pub fn encode(table: &Table, now: DateTime<Utc>) -> Result<ExportArtifact, ExportError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(table.columns().iter().map(|c| c.name.as_str()))?;
    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|column| match &column.data {
                // f64 Display is the shortest representation that re-parses
                // to the same value, so no precision is lost in the file
                ColumnData::Numeric(values) => values[row].to_string(),
                ColumnData::Text(values) => values[row].clone(),
            })
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(ExportArtifact {
        bytes,
        filename: format!("{}_{}.csv", FILENAME_PREFIX, now.format("%Y%m%d")),
        media_type: EXPORT_MEDIA_TYPE,
    })
}
