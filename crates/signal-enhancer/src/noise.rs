//! Synthetic Demo Noise

use std::f64::consts::PI;

use rand::Rng;

/// Zero-mean Gaussian samples via the Box-Muller transform.
///
/// A non-positive `std_dev` (constant input window) yields all zeros, so a
/// flat column picks up boost only.
pub(crate) fn gaussian<R: Rng>(rng: &mut R, std_dev: f64, len: usize) -> Vec<f64> {
    if std_dev <= 0.0 {
        return vec![0.0; len];
    }
    (0..len)
        .map(|_| {
            // 1 - u maps [0, 1) onto (0, 1] so the log stays finite
            let u1: f64 = 1.0 - rng.random::<f64>();
            let u2: f64 = rng.random();
            std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
        })
        .collect()
}
