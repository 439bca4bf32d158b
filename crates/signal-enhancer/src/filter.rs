//! Butterworth Bandpass Filtering
//!
//! Fixed 4th-order Butterworth bandpass built from cascaded second-order
//! sections and applied forward-backward so the output carries no phase lag.

use std::f64::consts::PI;

use thiserror::Error;

/// Filter order of the demo bandpass.
pub const FILTER_ORDER: usize = 4;

/// Errors designing the bandpass for a given cutoff pair.
///
/// Cutoffs must satisfy `0 < lowcut < highcut < nyquist`; anything else is a
/// configuration error the caller surfaces per column.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("low cutoff {0} Hz must be positive")]
    NonPositiveLowCut(f64),

    #[error("low cutoff {low} Hz must be below high cutoff {high} Hz")]
    CutoffsCrossed { low: f64, high: f64 },

    #[error("high cutoff {high} Hz must be below the Nyquist frequency {nyquist} Hz")]
    AboveNyquist { high: f64, nyquist: f64 },
}

/// One second-order section.
/// H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)
#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Biquad {
    /// Run the section over the signal in place (Direct Form II Transposed),
    /// starting from zero state.
    fn run(&self, signal: &mut [f64]) {
        let mut z1 = 0.0;
        let mut z2 = 0.0;
        for sample in signal.iter_mut() {
            let output = self.b0 * *sample + z1;
            z1 = self.b1 * *sample - self.a1 * output + z2;
            z2 = self.b2 * *sample - self.a2 * output;
            *sample = output;
        }
    }
}

/// Designed bandpass, reusable across any number of columns.
///
/// The passband is realized as a highpass at the low cutoff cascaded with a
/// lowpass at the high cutoff, both 4th-order Butterworth.
#[derive(Debug, Clone)]
pub struct Bandpass {
    sections: Vec<Biquad>,
}

impl Bandpass {
    /// Design for the given cutoffs; frequencies are normalized by the
    /// Nyquist frequency (`sample_rate_hz / 2`) internally.
    pub fn design(
        lowcut_hz: f64,
        highcut_hz: f64,
        sample_rate_hz: f64,
    ) -> Result<Self, FilterError> {
        let nyquist = 0.5 * sample_rate_hz;
        if lowcut_hz <= 0.0 {
            return Err(FilterError::NonPositiveLowCut(lowcut_hz));
        }
        if lowcut_hz >= highcut_hz {
            return Err(FilterError::CutoffsCrossed {
                low: lowcut_hz,
                high: highcut_hz,
            });
        }
        if highcut_hz >= nyquist {
            return Err(FilterError::AboveNyquist {
                high: highcut_hz,
                nyquist,
            });
        }

        let mut sections = highpass_sections(prewarp(lowcut_hz, sample_rate_hz));
        sections.extend(lowpass_sections(prewarp(highcut_hz, sample_rate_hz)));
        Ok(Self { sections })
    }

    /// Zero-phase application: one forward pass, then one pass over the
    /// reversed signal, each section starting from zero state. The result is
    /// time-aligned with the input.
    pub fn filtfilt(&self, signal: &[f64]) -> Vec<f64> {
        let mut output = signal.to_vec();
        self.pass(&mut output);
        output.reverse();
        self.pass(&mut output);
        output.reverse();
        output
    }

    fn pass(&self, signal: &mut [f64]) {
        for section in &self.sections {
            section.run(signal);
        }
    }
}

/// Prewarp an analog cutoff for the bilinear transform.
fn prewarp(freq_hz: f64, sample_rate_hz: f64) -> f64 {
    (PI * freq_hz / sample_rate_hz).tan()
}

/// Butterworth pole angle for section `k` of an order-`FILTER_ORDER` filter.
fn pole_alpha(k: usize) -> f64 {
    let theta = PI * (2.0 * k as f64 + 1.0) / (2.0 * FILTER_ORDER as f64);
    -2.0 * theta.cos()
}

fn lowpass_sections(wn: f64) -> Vec<Biquad> {
    (0..FILTER_ORDER / 2)
        .map(|k| {
            let alpha = pole_alpha(k);
            let wn2 = wn * wn;
            let denom = 1.0 + alpha * wn + wn2;
            Biquad {
                b0: wn2 / denom,
                b1: 2.0 * wn2 / denom,
                b2: wn2 / denom,
                a1: 2.0 * (wn2 - 1.0) / denom,
                a2: (1.0 - alpha * wn + wn2) / denom,
            }
        })
        .collect()
}

fn highpass_sections(wn: f64) -> Vec<Biquad> {
    (0..FILTER_ORDER / 2)
        .map(|k| {
            let alpha = pole_alpha(k);
            let wn2 = wn * wn;
            let denom = 1.0 + alpha * wn + wn2;
            Biquad {
                b0: 1.0 / denom,
                b1: -2.0 / denom,
                b2: 1.0 / denom,
                a1: 2.0 * (wn2 - 1.0) / denom,
                a2: (1.0 - alpha * wn + wn2) / denom,
            }
        })
        .collect()
}
