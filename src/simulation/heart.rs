//! Heart outline sampler
//!
//! Evaluates the classic parametric heart
//!
//! ```text
//! x(i) =  r * 16 * sin^3(i)
//! y(i) = -r * (13 cos(i) - 5 cos(2i) - 2 cos(3i) - cos(4i))
//! ```
//!
//! for `i` in `[0, 2π]`. The `y` negation keeps the heart upright on a
//! canvas whose vertical axis grows downward.

use std::f64::consts::TAU;

use crate::simulation::states::NVec2;

/// Lazy, finite iterator over the heart outline. Clone it before consuming
/// to sample the same outline again
#[derive(Debug, Clone)]
pub struct HeartPoints {
    step: f64,
    ratio: f64,
    index: u64,
}

/// Sample the outline every `step` radians, scaled by `ratio`.
///
/// `step` must be positive and finite, otherwise the sequence is empty.
pub fn heart_points(step: f64, ratio: f64) -> HeartPoints {
    HeartPoints {
        step,
        ratio,
        index: 0,
    }
}

/// Point on the outline at angle `i`
pub fn heart_point(i: f64, ratio: f64) -> NVec2 {
    let x = ratio * 16.0 * i.sin().powi(3);
    let y = -ratio
        * (13.0 * i.cos() - 5.0 * (2.0 * i).cos() - 2.0 * (3.0 * i).cos() - (4.0 * i).cos());
    NVec2::new(x, y)
}

impl Iterator for HeartPoints {
    type Item = NVec2;

    fn next(&mut self) -> Option<NVec2> {
        if !(self.step > 0.0 && self.step.is_finite()) {
            return None;
        }
        // multiply instead of accumulating to keep the last sample stable
        let angle = self.index as f64 * self.step;
        if angle > TAU {
            return None;
        }
        self.index += 1;
        Some(heart_point(angle, self.ratio))
    }
}
