//! Upload Validator

use serde::Serialize;
use signal_table::{Limits, Table};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::parse::parse_csv;

/// Non-fatal notice that an upload was clamped to the row ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TruncationNotice {
    /// Rows present in the upload
    pub original_rows: usize,
    /// Rows kept for processing
    pub kept_rows: usize,
}

/// Outcome of validating one upload.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    /// Parsed table, clamped to the row ceiling
    pub table: Table,
    /// Present when rows were discarded
    pub truncated: Option<TruncationNotice>,
}

/// Enforces the demo ceilings on uploaded tables.
pub struct InputValidator {
    limits: Limits,
}

impl InputValidator {
    /// Validator with the given ceilings
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// The ceilings this validator enforces
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Validate an upload: size ceiling first (before touching the bytes),
    /// then parse, then clamp the row count.
    ///
    /// Exceeding the row ceiling is a warning, not an error: the table is
    /// cut to the first `max_rows` rows and processing continues.
    pub fn validate(
        &self,
        raw: &[u8],
        declared_size: u64,
    ) -> Result<ValidatedInput, ValidationError> {
        if declared_size > self.limits.max_file_bytes {
            return Err(ValidationError::FileTooLarge {
                declared: declared_size,
                limit: self.limits.max_file_bytes,
            });
        }

        let mut table = parse_csv(raw)?;
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "upload parsed"
        );

        let original_rows = table.row_count();
        let truncated = if original_rows > self.limits.max_rows {
            table.truncate_rows(self.limits.max_rows);
            warn!(
                original_rows,
                kept_rows = self.limits.max_rows,
                "upload clamped to the demo row ceiling"
            );
            Some(TruncationNotice {
                original_rows,
                kept_rows: self.limits.max_rows,
            })
        } else {
            None
        };

        Ok(ValidatedInput { table, truncated })
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}
