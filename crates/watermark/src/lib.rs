//! Output Watermarking
//!
//! Stamps every table leaving the demo with a visible provenance marker so
//! preview output cannot be passed off as production results. The marker is
//! both prepended as a column and returned for on-screen display.

use chrono::{DateTime, Utc};
use signal_table::{Column, Table};

/// Marker template; `{}` receives the generation timestamp.
pub const WATERMARK_TEXT: &str = "QuantumSignal Demo | Not for Production | {}";

/// Reserved name for the prepended marker column.
pub const WATERMARK_COLUMN: &str = "DEMO_WATERMARK";

/// Timestamp layout embedded in the marker: UTC, second resolution.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stamp `table` with a marker derived from `template` and `now`.
///
/// Returns a new table with a [`WATERMARK_COLUMN`] text column prepended at
/// position 0 (the marker repeated for every row) plus the marker string
/// itself. Pure: a fixed `now` always produces the same output.
pub fn stamp(table: &Table, template: &str, now: DateTime<Utc>) -> (Table, String) {
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    let marker = template.replacen("{}", &timestamp, 1);
    let column = Column::text(WATERMARK_COLUMN, vec![marker.clone(); table.row_count()]);
    (table.prepend_column(column), marker)
}
