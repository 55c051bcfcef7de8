//! Curve building.
//!
//! A [`PathCursor`] tracks a current position and a current tangent direction, and appends
//! segments that start where the previous one ended. The finished [`Path`] is a flat list of
//! drawing commands, which is all a renderer needs to know about the geometry.
use log::trace;
use nalgebra::geometry::Point2;

use crate::error::{GeometryError, Result};
use crate::geometry::{angle_of, intersect, Ray};

/// Slack allowed when checking that an arc chord fits inside its circle
const CHORD_EPSILON: f64 = 1e-9;

/// Direction of travel along a circular arc, as seen with the y axis pointing up.
///
/// `Clockwise` is the direction of increasing polar angle in this crate's angle convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2<f64>),
    LineTo(Point2<f64>),
    /// Quadratic Bézier segment
    QuadTo {
        control: Point2<f64>,
        end: Point2<f64>,
    },
    /// Minor circular arc
    ArcTo {
        radius: f64,
        sweep: Sweep,
        end: Point2<f64>,
    },
    Close,
}

impl PathCommand {
    /// The point this command leaves the pen at. `Close` has none of its own.
    pub fn end(&self) -> Option<Point2<f64>> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
            PathCommand::QuadTo { end, .. } | PathCommand::ArcTo { end, .. } => Some(end),
            PathCommand::Close => None,
        }
    }
}

/// An ordered list of drawing commands, always starting with a `MoveTo`
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// The first point of the path
    pub fn start(&self) -> Point2<f64> {
        // The cursor always emits the MoveTo first
        self.commands
            .first()
            .and_then(PathCommand::end)
            .unwrap_or_else(Point2::origin)
    }

    /// The last coordinate emitted, ignoring a trailing `Close`
    pub fn end(&self) -> Point2<f64> {
        self.commands
            .iter()
            .rev()
            .find_map(PathCommand::end)
            .unwrap_or_else(Point2::origin)
    }

    /// All on-curve points in order: the start point and every segment end point
    pub fn points(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.commands.iter().filter_map(PathCommand::end)
    }
}

/// Stateful curve builder.
///
/// Tangents are angles in the convention of [`crate::geometry::polar_to_cartesian`]: measured
/// from +y, increasing clockwise.
#[derive(Debug, Clone)]
pub struct PathCursor {
    position: Point2<f64>,
    tangent: f64,
    commands: Vec<PathCommand>,
}

impl PathCursor {
    /// Start a new path at `start`, heading along `tangent`
    pub fn new(start: Point2<f64>, tangent: f64) -> Self {
        PathCursor {
            position: start,
            tangent,
            commands: vec![PathCommand::MoveTo(start)],
        }
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn tangent(&self) -> f64 {
        self.tangent
    }

    /// Override the current tangent, e.g. after an arc whose end tangent the caller knows
    pub fn set_tangent(&mut self, tangent: f64) -> &mut Self {
        self.tangent = tangent;
        self
    }

    /// Straight segment to `point`. The tangent becomes the direction of travel.
    pub fn line_to(&mut self, point: Point2<f64>) -> &mut Self {
        let travel = point - self.position;
        // A zero-length segment has no direction, keep the old one
        if travel.norm_squared() > 0.0 {
            self.tangent = angle_of(&travel);
        }
        self.commands.push(PathCommand::LineTo(point));
        self.position = point;
        self
    }

    /// Polyline through all of `points`
    pub fn line_to_all<I>(&mut self, points: I) -> &mut Self
    where
        I: IntoIterator<Item = Point2<f64>>,
    {
        for p in points {
            self.line_to(p);
        }
        self
    }

    /// Quadratic segment to `point`, arriving along `tangent`.
    ///
    /// The control point is where the line through the current position along the current
    /// tangent meets the line through `point` along `tangent`, so the curve is tangent-continuous
    /// with whatever came before it. Parallel tangents have no such point and fail with
    /// [`GeometryError::Degenerate`].
    pub fn curve_to(&mut self, point: Point2<f64>, tangent: f64) -> Result<&mut Self> {
        let control = intersect(
            &Ray::new(self.position, self.tangent),
            &Ray::new(point, tangent),
        )?;
        trace!(
            "curve to ({:.4}, {:.4}) via ({:.4}, {:.4})",
            point.x,
            point.y,
            control.x,
            control.y
        );
        self.commands.push(PathCommand::QuadTo {
            control,
            end: point,
        });
        self.position = point;
        self.tangent = tangent;
        Ok(self)
    }

    /// Minor circular arc of `radius` to `point`.
    ///
    /// The tangent is left unchanged; callers that continue tangentially set it with
    /// [`PathCursor::set_tangent`].
    pub fn arc_to(&mut self, point: Point2<f64>, radius: f64, sweep: Sweep) -> Result<&mut Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::Degenerate(format!(
                "arc radius {radius} must be positive"
            )));
        }
        let chord = (point - self.position).norm();
        if chord > 2.0 * radius + CHORD_EPSILON {
            return Err(GeometryError::Degenerate(format!(
                "arc chord {chord:.6} does not fit a circle of radius {radius}"
            )));
        }
        self.commands.push(PathCommand::ArcTo {
            radius,
            sweep,
            end: point,
        });
        self.position = point;
        Ok(self)
    }

    /// Finish the path as a closed outline
    pub fn close(mut self) -> Path {
        self.commands.push(PathCommand::Close);
        Path {
            commands: self.commands,
        }
    }

    /// Finish the path, leaving it open
    pub fn finish(self) -> Path {
        Path {
            commands: self.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPSILON: f64 = 1e-10;

    fn points_equal(p1: Point2<f64>, p2: Point2<f64>) -> bool {
        (p1 - p2).norm() < EPSILON
    }

    #[test]
    fn test_new_emits_move() {
        let path = PathCursor::new(Point2::new(1.0, 2.0), 0.0).finish();
        assert_eq!(path.commands(), &[PathCommand::MoveTo(Point2::new(1.0, 2.0))]);
        assert!(!path.is_closed());
    }

    #[test]
    fn test_line_to_updates_position_and_tangent() {
        let mut cursor = PathCursor::new(Point2::new(0.0, 0.0), 0.0);
        cursor.line_to(Point2::new(3.0, 0.0));
        assert_eq!(cursor.position(), Point2::new(3.0, 0.0));
        assert!((cursor.tangent() - FRAC_PI_2).abs() < EPSILON);

        cursor.line_to(Point2::new(3.0, -2.0));
        assert_eq!(cursor.position(), Point2::new(3.0, -2.0));
        assert!((cursor.tangent() - PI).abs() < EPSILON);
    }

    #[test]
    fn test_zero_length_line_keeps_tangent() {
        let mut cursor = PathCursor::new(Point2::new(1.0, 1.0), 0.7);
        cursor.line_to(Point2::new(1.0, 1.0));
        assert_eq!(cursor.tangent(), 0.7);
        assert_eq!(cursor.finish().len(), 2);
    }

    #[test]
    fn test_curve_to_control_point() {
        // Heading right from the origin, arriving at (2, 2) heading up
        let mut cursor = PathCursor::new(Point2::new(0.0, 0.0), FRAC_PI_2);
        cursor.curve_to(Point2::new(2.0, 2.0), 0.0).unwrap();
        assert_eq!(cursor.position(), Point2::new(2.0, 2.0));
        assert_eq!(cursor.tangent(), 0.0);

        let path = cursor.finish();
        match path.commands()[1] {
            PathCommand::QuadTo { control, end } => {
                assert!(points_equal(control, Point2::new(2.0, 0.0)));
                assert_eq!(end, Point2::new(2.0, 2.0));
            }
            other => panic!("Expected a quadratic segment, got {other:?}"),
        }
    }

    #[test]
    fn test_curve_to_is_tangent_continuous() {
        let mut cursor = PathCursor::new(Point2::new(0.0, 0.0), FRAC_PI_4);
        cursor.curve_to(Point2::new(4.0, 1.0), 2.0).unwrap();
        cursor.curve_to(Point2::new(5.0, -3.0), PI).unwrap();
        let path = cursor.finish();

        // The control point of each segment lies on the incoming tangent line
        let mut start = path.start();
        let mut heading = FRAC_PI_4;
        for (command, arrival) in path.commands()[1..].iter().zip([2.0, PI]) {
            if let PathCommand::QuadTo { control, end } = *command {
                let out = control - start;
                let cross = out.x * heading.cos() - out.y * heading.sin();
                assert!(cross.abs() < 1e-9);
                let back = end - control;
                let cross = back.x * arrival.cos() - back.y * arrival.sin();
                assert!(cross.abs() < 1e-9);
                start = end;
                heading = arrival;
            } else {
                panic!("Expected only quadratic segments");
            }
        }
    }

    #[test]
    fn test_curve_to_parallel_tangents() {
        let mut cursor = PathCursor::new(Point2::new(0.0, 0.0), 0.0);
        let result = cursor.curve_to(Point2::new(1.0, 5.0), 0.0);
        assert!(matches!(result, Err(GeometryError::Degenerate(_))));
        // A failed append leaves the cursor alone
        assert_eq!(cursor.position(), Point2::new(0.0, 0.0));
        assert_eq!(cursor.finish().len(), 1);
    }

    #[test]
    fn test_arc_to_keeps_tangent() {
        let mut cursor = PathCursor::new(Point2::new(0.0, 1.0), FRAC_PI_2);
        cursor
            .arc_to(Point2::new(1.0, 0.0), 1.0, Sweep::Clockwise)
            .unwrap();
        assert_eq!(cursor.position(), Point2::new(1.0, 0.0));
        assert_eq!(cursor.tangent(), FRAC_PI_2);
        cursor.set_tangent(PI);
        assert_eq!(cursor.tangent(), PI);
    }

    #[test]
    fn test_arc_to_rejects_short_radius() {
        let mut cursor = PathCursor::new(Point2::new(-1.0, 0.0), 0.0);
        assert!(cursor
            .arc_to(Point2::new(1.0, 0.0), 0.9, Sweep::Clockwise)
            .is_err());
        assert!(cursor
            .arc_to(Point2::new(1.0, 0.0), 0.0, Sweep::Clockwise)
            .is_err());
        // Exactly a half circle is fine
        assert!(cursor
            .arc_to(Point2::new(1.0, 0.0), 1.0, Sweep::CounterClockwise)
            .is_ok());
    }

    #[test]
    fn test_close() {
        let mut cursor = PathCursor::new(Point2::new(0.0, 0.0), 0.0);
        cursor.line_to_all(vec![
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 0.0),
        ]);
        let path = cursor.close();
        assert!(path.is_closed());
        assert_eq!(path.len(), 5);
        assert_eq!(path.start(), Point2::new(0.0, 0.0));
        assert_eq!(path.end(), Point2::new(0.0, 0.0));
        assert_eq!(path.points().count(), 4);
    }
}
