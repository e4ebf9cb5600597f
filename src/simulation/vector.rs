//! Magnitude helpers for [`NVec2`]
//!
//! nalgebra covers add/sub/scale/norm; the steering model additionally needs
//! "rescale to a length" and "clamp to a length", both total over zero-length
//! input.

use super::states::NVec2;

pub trait Magnitude {
    /// Same direction, length `magnitude`. Zero-length input stays zero
    fn with_magnitude(self, magnitude: f64) -> Self;

    /// Rescale down to `max` if longer, otherwise unchanged
    fn limited(self, max: f64) -> Self;
}

impl Magnitude for NVec2 {
    fn with_magnitude(self, magnitude: f64) -> Self {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return NVec2::zeros();
        }
        self * (magnitude / norm)
    }

    fn limited(self, max: f64) -> Self {
        let norm = self.norm();
        if norm > max {
            self * (max / norm)
        } else {
            self
        }
    }
}
