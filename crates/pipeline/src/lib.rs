//! Demo Processing Pipeline
//!
//! One request lifecycle over an uploaded table:
//! validate → enhance → stamp → encode. Every stage is a pure transformation
//! of the table it receives and runs to completion before the next starts.
//! Access gating happens at the caller boundary; stages here assume it.

use chrono::{DateTime, Utc};
use data_validator::{InputValidator, ValidationError};
use exporter::{ExportArtifact, ExportError};
use rand::Rng;
use serde::Serialize;
use signal_enhancer::{enhance, ProcessingConfig};
use signal_table::{Limits, Table};
use thiserror::Error;
use tracing::info;
use watermark::{stamp, WATERMARK_TEXT};

/// Rows shown in the before/after preview.
pub const PREVIEW_ROWS: usize = 5;

/// Terminal pipeline failures. Non-fatal conditions travel as [`Notice`]s
/// on a successful outcome instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Non-fatal conditions surfaced alongside a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Upload was clamped to the row ceiling
    Truncated {
        original_rows: usize,
        kept_rows: usize,
    },
    /// One column fell back to its original values during enhancement
    ColumnFallback { column: String, reason: String },
}

/// Result of one full pipeline run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Validated upload, kept for the before side of the preview
    pub original: Table,
    /// Enhanced table with the watermark column prepended
    pub enhanced: Table,
    /// Marker string for on-screen display
    pub watermark: String,
    /// Downloadable CSV artifact
    pub artifact: ExportArtifact,
    /// Truncation and per-column fallback notices, in pipeline order
    pub notices: Vec<Notice>,
}

/// Run the whole pipeline over one upload.
///
/// `rng` drives the enhancement noise (seed it for reproducibility); `now`
/// feeds the watermark timestamp and the artifact filename. Validation and
/// export failures abort; enhancement degrades per column.
pub fn process<R: Rng>(
    raw: &[u8],
    declared_size: u64,
    config: &ProcessingConfig,
    limits: &Limits,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<Outcome, PipelineError> {
    let validated = InputValidator::new(*limits).validate(raw, declared_size)?;

    let mut notices = Vec::new();
    if let Some(truncation) = validated.truncated {
        notices.push(Notice::Truncated {
            original_rows: truncation.original_rows,
            kept_rows: truncation.kept_rows,
        });
    }

    let enhanced = enhance(&validated.table, config, rng);
    notices.extend(enhanced.warnings.into_iter().map(|w| Notice::ColumnFallback {
        column: w.column,
        reason: w.reason,
    }));

    let (stamped, marker) = stamp(&enhanced.table, WATERMARK_TEXT, now);
    let artifact = exporter::encode(&stamped, now)?;

    info!(
        rows = stamped.row_count(),
        columns = stamped.column_count(),
        notices = notices.len(),
        filename = %artifact.filename,
        "demo processing complete"
    );

    Ok(Outcome {
        original: validated.table,
        enhanced: stamped,
        watermark: marker,
        artifact,
        notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use signal_enhancer::{Bandpass, NOISE_FRACTION};
    use signal_table::ColumnData;
    use watermark::WATERMARK_COLUMN;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 45).unwrap()
    }

    fn run(raw: &[u8]) -> Result<Outcome, PipelineError> {
        process(
            raw,
            raw.len() as u64,
            &ProcessingConfig::default(),
            &Limits::default(),
            &mut SmallRng::seed_from_u64(42),
            fixed_now(),
        )
    }

    #[test]
    fn test_end_to_end_example() {
        let raw = b"Time,ch1\n0,1.0\n1,2.0\n2,3.0\n3,4.0\n4,5.0\n";
        let outcome = run(raw).unwrap();

        assert_eq!(
            outcome.enhanced.column_names(),
            vec![WATERMARK_COLUMN, "Time", "ch1"]
        );
        assert_eq!(outcome.enhanced.row_count(), 5);
        assert!(outcome.notices.is_empty());

        // time axis passes through untouched
        assert_eq!(
            outcome.enhanced.column("Time").unwrap().data,
            ColumnData::Numeric(vec![0.0, 1.0, 2.0, 3.0, 4.0])
        );

        // the signal column stays within the statistical noise bound of the
        // deterministic filtered-and-boosted reference
        let config = ProcessingConfig::default();
        let bandpass =
            Bandpass::design(config.lowcut_hz, config.highcut_hz, config.sample_rate_hz).unwrap();
        let boosted: Vec<f64> = bandpass
            .filtfilt(&[1.0, 2.0, 3.0, 4.0, 5.0])
            .iter()
            .map(|s| s * config.boost_factor)
            .collect();
        let sigma = {
            let mean = boosted.iter().sum::<f64>() / boosted.len() as f64;
            let variance = boosted.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
                / boosted.len() as f64;
            NOISE_FRACTION * variance.sqrt()
        };

        match &outcome.enhanced.column("ch1").unwrap().data {
            ColumnData::Numeric(values) => {
                assert_eq!(values.len(), 5);
                for (value, reference) in values.iter().zip(&boosted) {
                    assert!(value.is_finite());
                    assert!((value - reference).abs() <= 5.0 * sigma);
                }
            }
            other => panic!("expected numeric ch1, got {other:?}"),
        }
    }

    #[test]
    fn test_watermark_fills_first_column() {
        let raw = b"Time,ch1\n0,1.0\n1,2.0\n";
        let outcome = run(raw).unwrap();

        assert_eq!(
            outcome.watermark,
            "QuantumSignal Demo | Not for Production | 2025-01-15 12:30:45"
        );
        assert_eq!(
            outcome.enhanced.column(WATERMARK_COLUMN).unwrap().data,
            ColumnData::Text(vec![outcome.watermark.clone(); 2])
        );
        // the original preview table carries no watermark
        assert!(outcome.original.column(WATERMARK_COLUMN).is_none());
    }

    #[test]
    fn test_artifact_names_and_typing() {
        let raw = b"Time,ch1\n0,1.0\n1,2.0\n";
        let outcome = run(raw).unwrap();

        assert_eq!(
            outcome.artifact.filename,
            "demo_signal_enhancement_20250115.csv"
        );
        assert_eq!(outcome.artifact.media_type, "text/csv");
        assert!(outcome.artifact.bytes.starts_with(b"DEMO_WATERMARK,Time,ch1\n"));
    }

    #[test]
    fn test_oversize_upload_aborts() {
        let raw = b"Time,ch1\n0,1.0\n";
        let err = process(
            raw,
            10 * 1024 * 1024,
            &ProcessingConfig::default(),
            &Limits::default(),
            &mut SmallRng::seed_from_u64(42),
            fixed_now(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_truncation_and_fallback_notices_flow_through() {
        let mut raw = b"Time,ch1,label\n".to_vec();
        for i in 0..600 {
            raw.extend_from_slice(format!("{i},{}.5,x{i}\n", i % 7).as_bytes());
        }
        let outcome = run(&raw).unwrap();

        assert_eq!(outcome.enhanced.row_count(), 500);
        assert_eq!(outcome.notices.len(), 2);
        assert_eq!(
            outcome.notices[0],
            Notice::Truncated {
                original_rows: 600,
                kept_rows: 500,
            }
        );
        assert!(matches!(
            &outcome.notices[1],
            Notice::ColumnFallback { column, .. } if column == "label"
        ));
    }

    #[test]
    fn test_preview_rows_constant_matches_demo() {
        assert_eq!(PREVIEW_ROWS, 5);
    }
}
