use nalgebra::geometry::Point2;
use nalgebra::{Matrix2, Vector2};

use crate::error::{GeometryError, Result};

/// Below this |sin| two directions are treated as parallel
const PARALLEL_EPSILON: f64 = 1e-12;

/// Convert polar coordinates to cartesian ones.
///
/// Angles are measured from the "up" (+y) axis and increase clockwise, so `x = r sin(phi)` and
/// `y = r cos(phi)`. Every tooth and spirograph position in this crate uses this convention.
pub fn polar_to_cartesian(r: f64, phi: f64) -> Point2<f64> {
    Point2::new(r * phi.sin(), r * phi.cos())
}

/// Unit vector pointing along `angle`, in the same convention as [`polar_to_cartesian`]
pub fn direction(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.sin(), angle.cos())
}

/// Inverse of [`direction`]: the angle of `v`, from +y, clockwise
pub fn angle_of(v: &Vector2<f64>) -> f64 {
    v.x.atan2(v.y)
}

/// Rotate `p` around the origin by `delta`, i.e. add `delta` to its polar angle
pub fn rotate(p: &Point2<f64>, delta: f64) -> Point2<f64> {
    let (s, c) = delta.sin_cos();
    Point2::new(p.x * c + p.y * s, -p.x * s + p.y * c)
}

/// A point together with a direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point2<f64>,
    pub angle: f64,
}

impl Ray {
    pub fn new(origin: Point2<f64>, angle: f64) -> Self {
        Ray { origin, angle }
    }

    pub fn at(&self, t: f64) -> Point2<f64> {
        self.origin + direction(self.angle) * t
    }
}

/// Intersection of the infinite lines carrying `a` and `b`.
///
/// The rays only define the lines; the intersection may lie behind either origin.
/// Parallel (or coincident) lines have no unique intersection and are reported as
/// [`GeometryError::Degenerate`].
pub fn intersect(a: &Ray, b: &Ray) -> Result<Point2<f64>> {
    let da = direction(a.angle);
    let db = direction(b.angle);
    // a.origin + ta * da = b.origin + tb * db
    let m = Matrix2::new(da.x, -db.x, da.y, -db.y);
    if m.determinant().abs() < PARALLEL_EPSILON {
        return Err(GeometryError::Degenerate(format!(
            "tangents at ({:.4}, {:.4}) and ({:.4}, {:.4}) are parallel",
            a.origin.x, a.origin.y, b.origin.x, b.origin.y
        )));
    }
    let inv = m.try_inverse().ok_or_else(|| {
        GeometryError::Degenerate("tangent system is not invertible".to_string())
    })?;
    let t = inv * (b.origin - a.origin);
    Ok(a.at(t.x))
}
