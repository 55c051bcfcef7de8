//! Involute spur gear outline.
//!
//! Each tooth is described by eight control points (polar position plus the direction of travel
//! of the outline there). The outline runs clockwise: along the foot circle, up the leading flank,
//! across the head circle and down the trailing flank. Every tooth is the first one rotated by a
//! multiple of the angular pitch.
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use log::debug;
use nalgebra::geometry::Point2;

use crate::error::{GeometryError, Result};
use crate::geometry::{direction, intersect, polar_to_cartesian, rotate, Ray};
use crate::involute::{inverse_involute_ratio, roll_angle};
use crate::path::{Path, PathCursor, Sweep};

/// Empirical dedendum clearance, as a fraction of the module
pub const DEDENDUM_CLEARANCE: f64 = 0.167;

/// Validated input of a gear: module, number of teeth and pressure angle (radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearParameters {
    module: f64,
    teeth: u32,
    pressure_angle: f64,
}

impl GearParameters {
    pub fn new(module: f64, teeth: u32, pressure_angle: f64) -> Result<Self> {
        if !(module.is_finite() && module > 0.0) {
            return Err(GeometryError::invalid(
                "module",
                format!("{module} must be a positive number"),
            ));
        }
        if teeth == 0 {
            return Err(GeometryError::invalid("teeth", "a gear needs at least one tooth"));
        }
        if !(pressure_angle.is_finite() && (0.0..FRAC_PI_2).contains(&pressure_angle)) {
            return Err(GeometryError::invalid(
                "pressure_angle",
                format!("{pressure_angle} rad is outside [0, pi/2)"),
            ));
        }
        Ok(GearParameters {
            module,
            teeth,
            pressure_angle,
        })
    }

    /// Same as [`GearParameters::new`], with the pressure angle given in degrees
    pub fn from_degrees(module: f64, teeth: u32, pressure_angle_deg: f64) -> Result<Self> {
        Self::new(module, teeth, pressure_angle_deg.to_radians())
    }

    pub fn module(&self) -> f64 {
        self.module
    }

    pub fn teeth(&self) -> u32 {
        self.teeth
    }

    pub fn pressure_angle(&self) -> f64 {
        self.pressure_angle
    }
}

/// One key point of a tooth flank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToothControlPoint {
    pub radius: f64,
    /// Polar angle of the point
    pub angle: f64,
    /// Direction of travel of the outline through the point
    pub tangent: f64,
}

impl ToothControlPoint {
    pub fn position(&self) -> Point2<f64> {
        polar_to_cartesian(self.radius, self.angle)
    }

    fn rotated(&self, delta: f64) -> Self {
        ToothControlPoint {
            radius: self.radius,
            angle: self.angle + delta,
            tangent: self.tangent + delta,
        }
    }
}

/// A gear whose outline is known to be constructible
#[derive(Debug, Clone)]
pub struct GearWheel {
    params: GearParameters,
    r_pitch: f64,
    r_head: f64,
    r_base: f64,
    r_foot: f64,
    theta: f64,
    beta_pitch: f64,
    beta_base: f64,
    beta_head: f64,
    beta_foot: f64,
    head_roll: f64,
}

impl GearWheel {
    /// Derive all radii and angles of the gear, rejecting shapes that cannot be drawn
    pub fn new(params: GearParameters) -> Result<Self> {
        let m = params.module;
        let alpha = params.pressure_angle;

        let r_pitch = m * params.teeth as f64 / 2.0;
        let r_head = r_pitch + m;
        let r_base = r_pitch * alpha.cos();
        let r_foot = (r_pitch - m).min(r_base) - DEDENDUM_CLEARANCE * m;

        let theta = TAU / params.teeth as f64;
        let beta_pitch = theta / 4.0;
        let beta_base = beta_pitch + roll_angle(alpha);
        // Fails if the head circle is inside the base circle
        let head_roll = inverse_involute_ratio(r_base, r_head)?;
        let beta_head = beta_base - roll_angle(head_roll);
        // Halfway between the base point and the middle of the tooth gap
        let beta_foot = (beta_base + theta / 2.0) / 2.0;

        if r_foot <= 0.0 {
            return Err(GeometryError::Domain(format!(
                "{} teeth of module {m} leave no room for the tooth root (foot radius {r_foot:.4})",
                params.teeth
            )));
        }
        if beta_base >= theta / 2.0 {
            // beta_base < theta / 2 holds for z < pi / (2 inv(alpha))
            let max_teeth = (PI / (2.0 * roll_angle(alpha))).ceil() - 1.0;
            return Err(GeometryError::Domain(format!(
                "neighbouring teeth overlap at the base circle: the tooth model fits at most \
                 {max_teeth} teeth at {:.2} deg, {} requested",
                alpha.to_degrees(),
                params.teeth
            )));
        }
        if beta_head <= 0.0 {
            return Err(GeometryError::Domain(format!(
                "flanks cross below the head circle, the tooth is pointed ({} teeth, {:.2} deg)",
                params.teeth,
                alpha.to_degrees()
            )));
        }

        debug!(
            "gear m={m} z={} alpha={:.4}: r0={r_pitch:.4} r_head={r_head:.4} r_base={r_base:.4} r_foot={r_foot:.4}",
            params.teeth, alpha
        );
        debug!(
            "gear angles: theta={theta:.6} beta_0={beta_pitch:.6} beta_base={beta_base:.6} beta_head={beta_head:.6} beta_foot={beta_foot:.6}"
        );

        let wheel = GearWheel {
            params,
            r_pitch,
            r_head,
            r_base,
            r_foot,
            theta,
            beta_pitch,
            beta_base,
            beta_head,
            beta_foot,
            head_roll,
        };
        wheel.check_flank()?;
        Ok(wheel)
    }

    /// Every curve of the leading flank must leave its start point and reach its end point
    /// travelling forwards, or the outline folds back on itself. The trailing flank is the mirror
    /// image and passes with it.
    fn check_flank(&self) -> Result<()> {
        let points = self.first_tooth();
        for pair in points[..4].windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let (start, end) = (from.position(), to.position());
            // Parallel tangents are reported by `curve_to` when the outline is built
            let Ok(control) = intersect(&Ray::new(start, from.tangent), &Ray::new(end, to.tangent))
            else {
                continue;
            };
            let leaving = (control - start).dot(&direction(from.tangent));
            let arriving = (end - control).dot(&direction(to.tangent));
            if leaving <= 0.0 || arriving <= 0.0 {
                return Err(GeometryError::Domain(format!(
                    "the flank reverses between radius {:.4} and {:.4}: {} teeth at {:.2} deg are \
                     beyond the tooth model, use fewer teeth or a smaller pressure angle",
                    from.radius,
                    to.radius,
                    self.params.teeth,
                    self.params.pressure_angle.to_degrees()
                )));
            }
        }
        Ok(())
    }

    pub fn params(&self) -> &GearParameters {
        &self.params
    }

    pub fn teeth(&self) -> u32 {
        self.params.teeth
    }

    /// Pitch circle radius
    pub fn pitch_radius(&self) -> f64 {
        self.r_pitch
    }

    /// Head (addendum) circle radius
    pub fn head_radius(&self) -> f64 {
        self.r_head
    }

    /// Base circle radius, the circle the flank involutes unwind from
    pub fn base_radius(&self) -> f64 {
        self.r_base
    }

    /// Foot (root) circle radius
    pub fn foot_radius(&self) -> f64 {
        self.r_foot
    }

    /// Angle between two neighbouring teeth
    pub fn angular_pitch(&self) -> f64 {
        self.theta
    }

    /// Half tooth angle at the pitch circle
    pub fn beta_pitch(&self) -> f64 {
        self.beta_pitch
    }

    /// Half tooth angle at the base circle
    pub fn beta_base(&self) -> f64 {
        self.beta_base
    }

    /// Half tooth angle at the head circle
    pub fn beta_head(&self) -> f64 {
        self.beta_head
    }

    /// Angle of the foot control points from the tooth centre line
    pub fn beta_foot(&self) -> f64 {
        self.beta_foot
    }

    /// Involute roll parameter where the flank meets the head circle
    pub fn head_roll(&self) -> f64 {
        self.head_roll
    }

    /// Control points of the first tooth, centred on the "up" axis.
    /// Order is the outline's: leading foot, base, pitch, head, then trailing head, pitch, base,
    /// foot.
    fn first_tooth(&self) -> [ToothControlPoint; 8] {
        let alpha = self.params.pressure_angle;
        let point = |radius, angle, tangent| ToothControlPoint {
            radius,
            angle,
            tangent,
        };
        [
            // Leading flank, travelling outwards
            point(self.r_foot, -self.beta_foot, -self.beta_foot + FRAC_PI_2),
            point(self.r_base, -self.beta_base, -self.beta_base),
            point(self.r_pitch, -self.beta_pitch, -self.beta_pitch + alpha),
            point(
                self.r_head,
                -self.beta_head,
                -self.beta_head + self.head_roll,
            ),
            // Trailing flank, the mirror image travelled inwards
            point(
                self.r_head,
                self.beta_head,
                self.beta_head - self.head_roll + PI,
            ),
            point(self.r_pitch, self.beta_pitch, self.beta_pitch - alpha + PI),
            point(self.r_base, self.beta_base, self.beta_base + PI),
            point(self.r_foot, self.beta_foot, self.beta_foot + FRAC_PI_2),
        ]
    }

    /// The eight control points of tooth `tooth`, rotated by `tooth` angular pitches
    pub fn tooth_control_points(&self, tooth: u32) -> [ToothControlPoint; 8] {
        let offset = tooth as f64 * self.theta;
        self.first_tooth().map(|p| p.rotated(offset))
    }

    /// Control points of every tooth, in order around the wheel
    pub fn control_points(&self) -> Vec<[ToothControlPoint; 8]> {
        (0..self.params.teeth)
            .map(|i| self.tooth_control_points(i))
            .collect()
    }

    /// Append one tooth, from its leading foot point to its trailing foot point. The cursor must
    /// already be at the leading foot point.
    fn append_tooth(&self, cursor: &mut PathCursor, points: &[ToothControlPoint; 8]) -> Result<()> {
        let [foot, base, pitch, head, head_out, pitch_out, base_out, foot_out] = points;
        cursor.set_tangent(foot.tangent);
        for p in [base, pitch, head] {
            cursor.curve_to(p.position(), p.tangent)?;
        }
        cursor.arc_to(head_out.position(), self.r_head, Sweep::Clockwise)?;
        cursor.set_tangent(head_out.tangent);
        for p in [pitch_out, base_out, foot_out] {
            cursor.curve_to(p.position(), p.tangent)?;
        }
        Ok(())
    }

    /// The closed outline of the whole wheel.
    ///
    /// Starts at the trailing foot point of the last tooth; per tooth it emits a foot circle arc,
    /// three curves up the leading flank, a head circle arc and three curves down the trailing
    /// flank.
    pub fn full_outline_path(&self) -> Result<Path> {
        let last = self.tooth_control_points(self.params.teeth - 1)[7];
        let mut cursor = PathCursor::new(last.position(), last.tangent);
        for i in 0..self.params.teeth {
            let points = self.tooth_control_points(i);
            cursor.arc_to(points[0].position(), self.r_foot, Sweep::Clockwise)?;
            self.append_tooth(&mut cursor, &points)?;
        }
        Ok(cursor.close())
    }

    /// Open path of a single tooth, from its leading to its trailing foot point
    pub fn tooth_path(&self, tooth: u32) -> Result<Path> {
        let points = self.tooth_control_points(tooth % self.params.teeth);
        let mut cursor = PathCursor::new(points[0].position(), points[0].tangent);
        self.append_tooth(&mut cursor, &points)?;
        Ok(cursor.finish())
    }

    /// Rotate `p` from the position of tooth `tooth` back to the position of the first tooth
    pub fn to_first_tooth(&self, p: &Point2<f64>, tooth: u32) -> Point2<f64> {
        rotate(p, -(tooth as f64) * self.theta)
    }
}
