//! Tabular Signal Model
//!
//! Shared table representation used by every pipeline stage, plus the
//! process-wide demo ceilings (held here so sibling crates avoid circular deps).

mod table;

pub use table::{Column, ColumnData, Table};

use serde::{Deserialize, Serialize};

/// Demo ceiling on uploaded file size (2 MiB).
pub const MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;

/// Demo ceiling on processed rows.
pub const MAX_ROWS: usize = 500;

/// Process-wide resource ceilings, fixed at startup and never mutated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum accepted upload size in bytes
    pub max_file_bytes: u64,
    /// Maximum number of rows processed per upload
    pub max_rows: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_bytes: MAX_FILE_BYTES,
            max_rows: MAX_ROWS,
        }
    }
}
