//! Involute of a circle.
//!
//! A taut string unwound from a base circle by the roll parameter `alpha` has unwound a length
//! of `r * alpha`. Its tip sits at distance `r * sqrt(alpha² + 1)` from the centre, and lags
//! behind the unwinding point by `alpha - atan(alpha)` radians.
use nalgebra::geometry::Point2;

use crate::error::{GeometryError, Result};
pub use crate::geometry::polar_to_cartesian;

/// Roll angle and normalized distance of the involute point for roll parameter `alpha`.
///
/// Returns `(gamma, s)` where `gamma = alpha - atan(alpha)` is the polar angle of the
/// involute point, and `s = sqrt(alpha² + 1)` is its distance from the centre of a unit base
/// circle. `alpha = 0` is the start of the involute, on the base circle itself.
pub fn involute_roll(alpha: f64) -> (f64, f64) {
    (roll_angle(alpha), (alpha * alpha + 1.0).sqrt())
}

/// Polar angle of the involute point for roll parameter `alpha`
pub fn roll_angle(alpha: f64) -> f64 {
    alpha - alpha.atan()
}

/// Roll parameter of the involute point at normalized distance `s` from the centre.
///
/// Only points outside the base circle lie on the involute, so `s < 1` is a domain error.
pub fn inverse_involute_distance(s: f64) -> Result<f64> {
    if !s.is_finite() || s < 1.0 {
        return Err(GeometryError::Domain(format!(
            "involute distance ratio {s} is inside the base circle"
        )));
    }
    Ok((s * s - 1.0).sqrt())
}

/// Roll parameter of the involute of a base circle of radius `r_base` where it crosses the circle
/// of radius `r`.
pub fn inverse_involute_ratio(r_base: f64, r: f64) -> Result<f64> {
    if r_base <= 0.0 {
        return Err(GeometryError::Domain(format!(
            "base circle radius {r_base} must be positive"
        )));
    }
    inverse_involute_distance(r / r_base)
}

/// Point of the involute of the base circle of radius `r` at roll `alpha`, with the whole curve
/// rotated by `offset`.
pub fn involute_point(r: f64, alpha: f64, offset: f64) -> Point2<f64> {
    let (gamma, s) = involute_roll(alpha);
    polar_to_cartesian(r * s, gamma + offset)
}

/// `n + 1` points of the involute of the base circle of radius `r`, evenly spaced in roll from
/// `0` up to `max_alpha`.
pub fn involute_points(r: f64, max_alpha: f64, offset: f64, n: usize) -> Vec<Point2<f64>> {
    let n = n.max(1);
    (0..=n)
        .map(|i| involute_point(r, i as f64 * max_alpha / n as f64, offset))
        .collect()
}
