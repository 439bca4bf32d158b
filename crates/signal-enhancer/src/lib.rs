//! Demo Signal Enhancement
//!
//! Applies the preview transform to each signal column of an uploaded table:
//! 4th-order Butterworth bandpass (zero phase), linear boost, and additive
//! synthetic noise scaled to the boosted signal. Columns fail independently;
//! a bad column falls back to its original values without aborting the rest.

mod enhancer;
mod filter;
mod noise;
mod stats;

pub use enhancer::{enhance, ColumnWarning, Enhanced, ProcessingConfig, NOISE_FRACTION};
pub use filter::{Bandpass, FilterError, FILTER_ORDER};
