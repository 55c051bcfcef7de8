//! Spirograph: a toothed wheel rolling inside (or, with a negative tooth count, outside) a
//! toothed ring, with a pen held in a hole of the wheel.
use std::f64::consts::TAU;

use log::debug;
use nalgebra::geometry::Point2;

use crate::error::{GeometryError, Result};
use crate::geometry::polar_to_cartesian;
use crate::path::{Path, PathCursor};

/// Tooth pitch of the toy; radii are half the tooth counts
const MODULE: f64 = 1.0;

/// Greatest common divisor
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Least common multiple, `None` if it does not fit a `u64`
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spirograph {
    ring: i64,
    wheel: i64,
    excenter: f64,
    offset: i64,
    samples: u32,
    /// Pen positions until the curve closes
    steps: usize,
}

impl Spirograph {
    /// `ring` and `wheel` are tooth counts, `excenter` is the pen's distance from the wheel centre
    /// as a fraction of the wheel radius, `offset` turns the wheel by whole teeth before it is
    /// engaged, and `samples` is the number of pen positions per tooth step.
    pub fn new(ring: i64, wheel: i64, excenter: f64, offset: i64, samples: u32) -> Result<Self> {
        if ring < 1 {
            return Err(GeometryError::invalid("ring", format!("{ring} must be > 0")));
        }
        if wheel == 0 {
            return Err(GeometryError::invalid("wheel", "must not be zero"));
        }
        if !(0.0..=1.0).contains(&excenter) {
            return Err(GeometryError::invalid(
                "excenter",
                format!("{excenter} is out of range (0.0 .. 1.0)"),
            ));
        }
        if samples < 1 {
            return Err(GeometryError::invalid("samples", "must be > 0"));
        }
        let steps = lcm(wheel.unsigned_abs(), ring.unsigned_abs())
            .and_then(|teeth| teeth.checked_mul(u64::from(samples)))
            .and_then(|steps| usize::try_from(steps).ok())
            .ok_or_else(|| {
                GeometryError::invalid(
                    "wheel",
                    format!(
                        "ring {ring} and wheel {wheel} at {samples} samples need more steps \
                         than can be counted"
                    ),
                )
            })?;
        Ok(Spirograph {
            ring,
            wheel,
            excenter,
            offset,
            samples,
            steps,
        })
    }

    pub fn ring(&self) -> i64 {
        self.ring
    }

    pub fn wheel(&self) -> i64 {
        self.wheel
    }

    pub fn excenter(&self) -> f64 {
        self.excenter
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn r_ring(&self) -> f64 {
        MODULE * self.ring as f64 / 2.0
    }

    /// Negative for a wheel rolling on the outside of the ring
    pub fn r_wheel(&self) -> f64 {
        MODULE * self.wheel as f64 / 2.0
    }

    pub fn r_excenter(&self) -> f64 {
        self.excenter * self.r_wheel()
    }

    /// Largest distance of the pen from the ring centre
    pub fn r_max(&self) -> f64 {
        self.r_ring() - self.r_wheel() + self.r_excenter().abs()
    }

    /// Initial wheel phase, in radians
    fn phase(&self) -> f64 {
        self.offset as f64 * TAU / self.wheel as f64
    }

    /// Number of pen positions until the curve closes
    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// Ring angle advanced per pen position
    pub fn step_size(&self) -> f64 {
        TAU / self.ring as f64 / self.samples as f64
    }

    /// Full trips of the wheel around the ring until the curve closes
    pub fn revolutions(&self) -> u64 {
        self.steps as u64 / u64::from(self.samples) / self.ring.unsigned_abs()
    }

    /// Point of contact between ring and wheel at ring angle `alpha`
    pub fn tooth_position(&self, alpha: f64) -> Point2<f64> {
        polar_to_cartesian(self.r_ring(), alpha)
    }

    /// Centre of the wheel at ring angle `alpha`
    pub fn center_position(&self, alpha: f64) -> Point2<f64> {
        self.tooth_position(alpha) - polar_to_cartesian(self.r_wheel(), alpha).coords
    }

    /// Pen position at ring angle `alpha`
    pub fn pen_position(&self, alpha: f64) -> Point2<f64> {
        let beta = alpha - alpha / self.wheel as f64 * self.ring as f64 + self.phase();
        self.center_position(alpha) + polar_to_cartesian(self.r_excenter(), beta).coords
    }

    /// The `index`th pen position, `None` past the end of the curve
    pub fn point(&self, index: usize) -> Option<Point2<f64>> {
        if index < self.step_count() {
            Some(self.pen_position(index as f64 * self.step_size()))
        } else {
            None
        }
    }

    /// All pen positions of one closed curve
    pub fn points(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        (0..self.step_count()).map(move |i| self.pen_position(i as f64 * self.step_size()))
    }

    /// Closed polyline through all pen positions
    pub fn path(&self) -> Path {
        debug!(
            "spirograph ring={} wheel={}: {} steps, {} revolutions",
            self.ring,
            self.wheel,
            self.step_count(),
            self.revolutions()
        );
        let mut points = self.points();
        // step_count is at least 1 for validated parameters
        let start = points.next().unwrap_or_else(Point2::origin);
        let mut cursor = PathCursor::new(start, 0.0);
        cursor.line_to_all(points);
        cursor.close()
    }
}
