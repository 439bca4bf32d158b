//! Demo Enhancement Transform

use rand::Rng;
use serde::{Deserialize, Serialize};
use signal_table::{Column, ColumnData, Table, MAX_ROWS};
use thiserror::Error;
use tracing::{debug, warn};

use crate::filter::Bandpass;
use crate::{noise, stats};

/// Fraction of the boosted signal's standard deviation used as noise σ.
///
/// Noise scales with the *boosted* signal, so a higher boost factor also
/// raises the injected noise floor.
pub const NOISE_FRACTION: f64 = 0.03;

/// Immutable parameters for one enhancement run; supplied per invocation,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Linear gain applied to every filtered sample
    pub boost_factor: f64,
    /// Bandpass low cutoff (Hz)
    pub lowcut_hz: f64,
    /// Bandpass high cutoff (Hz)
    pub highcut_hz: f64,
    /// Sampling rate of the uploaded signal (Hz)
    pub sample_rate_hz: f64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            boost_factor: 1.5,
            lowcut_hz: 1.0,
            highcut_hz: 40.0,
            sample_rate_hz: 256.0,
        }
    }
}

/// Why one column fell back to its original values.
#[derive(Debug, Clone, PartialEq, Error)]
enum ColumnFailure {
    #[error("column holds non-numeric values")]
    NonNumeric,

    #[error("{0}")]
    FilterDesign(#[from] crate::filter::FilterError),
}

/// Column-scoped warning; the named column passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnWarning {
    pub column: String,
    pub reason: String,
}

/// Result of one enhancement run. The transform is total: a failing column
/// produces a warning, never an error for the whole table.
#[derive(Debug, Clone)]
pub struct Enhanced {
    /// Same shape as the input; only signal-column values differ
    pub table: Table,
    /// One entry per column that fell back unchanged
    pub warnings: Vec<ColumnWarning>,
}

/// Apply the demo transform to every signal column of `table`.
///
/// Columns named "time" (case-insensitive) pass through untouched. Each
/// remaining column is filtered, boosted, and dosed with synthetic noise
/// independently; a failure in one column leaves it unchanged and is
/// reported without aborting the others. Randomness comes from the injected
/// `rng`, so callers control reproducibility (tests pin a seed, production
/// seeds from the OS).
pub fn enhance<R: Rng>(table: &Table, config: &ProcessingConfig, rng: &mut R) -> Enhanced {
    let mut warnings = Vec::new();

    let columns = table
        .columns()
        .iter()
        .map(|column| {
            if column.is_time() {
                return column.clone();
            }
            match enhance_column(column, config, &mut *rng) {
                Ok(values) => Column::numeric(column.name.clone(), values),
                Err(failure) => {
                    warn!(column = %column.name, %failure, "column fell back unchanged");
                    warnings.push(ColumnWarning {
                        column: column.name.clone(),
                        reason: failure.to_string(),
                    });
                    column.clone()
                }
            }
        })
        .collect();

    debug!(
        columns = table.column_count(),
        fallbacks = warnings.len(),
        "enhancement finished"
    );
    Enhanced {
        table: Table::new(columns),
        warnings,
    }
}

/// Transform a single column: clamp the processed window, bandpass, boost,
/// add noise. Samples beyond the window pass through unchanged so the output
/// length always matches the input.
fn enhance_column<R: Rng>(
    column: &Column,
    config: &ProcessingConfig,
    rng: &mut R,
) -> Result<Vec<f64>, ColumnFailure> {
    let values = match &column.data {
        ColumnData::Numeric(values) => values,
        ColumnData::Text(_) => return Err(ColumnFailure::NonNumeric),
    };

    // second clamp behind the validator's: harmless when the table was
    // validated, load-bearing when this is called directly
    let window = &values[..values.len().min(MAX_ROWS)];

    let bandpass = Bandpass::design(config.lowcut_hz, config.highcut_hz, config.sample_rate_hz)?;
    let filtered = bandpass.filtfilt(window);
    let boosted: Vec<f64> = filtered.iter().map(|s| s * config.boost_factor).collect();

    let sigma = NOISE_FRACTION * stats::std_dev(&boosted);
    let noise = noise::gaussian(rng, sigma, boosted.len());

    let mut output: Vec<f64> = boosted.iter().zip(&noise).map(|(b, n)| b + n).collect();
    output.extend_from_slice(&values[window.len()..]);
    Ok(output)
}
