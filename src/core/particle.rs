use crate::core::space::Space;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A point-like self-propelled particle on a 2D periodic domain.
///
/// Fields:
/// - `x`, `y`: position
/// - `speed`: magnitude of the velocity
/// - `angle`: heading in radians; any real value is accepted and never normalized
///
/// The alignment rule that drives a flock lives outside this type: it reads
/// positions through [`Particle::distance_to`], writes new headings through
/// [`Particle::set_angle`] and then calls [`Particle::step`] once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    x: f64,
    y: f64,
    speed: f64,
    angle: f64,
}

impl Particle {
    /// Create a particle from its initial position and speed state.
    ///
    /// No validation is performed; see [`Particle::try_new`] for a checked variant.
    pub fn new(x: f64, y: f64, speed: f64, angle: f64) -> Self {
        Self { x, y, speed, angle }
    }

    /// Create a particle after validating its state.
    ///
    /// Errors:
    /// - `Error::InvalidArgument` if any value is NaN/inf or `speed` is negative.
    pub fn try_new(x: f64, y: f64, speed: f64, angle: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidArgument("position must be finite".into()));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(Error::InvalidArgument(
                "speed must be finite and >= 0".into(),
            ));
        }
        if !angle.is_finite() {
            return Err(Error::InvalidArgument("angle must be finite".into()));
        }
        Ok(Self::new(x, y, speed, angle))
    }

    /// Position along the x axis.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Position along the y axis.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Position as `(x, y)`.
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Speed magnitude.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Heading in radians.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Move the particle to a new x coordinate.
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Move the particle to a new y coordinate.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Move the particle to `(x, y)`.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Replace the speed magnitude.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Replace the heading (radians, not normalized).
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Same particle relocated to `(x, y)`.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.set_position(x, y);
        self
    }

    /// Same particle with a new speed magnitude.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Same particle with a new heading.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Velocity vector `(speed * cos(angle), speed * sin(angle))`.
    #[inline]
    pub fn velocity(&self) -> (f64, f64) {
        let (sin, cos) = self.angle.sin_cos();
        (self.speed * cos, self.speed * sin)
    }

    /// Straight-line distance between the two positions.
    ///
    /// The periodic domain is ignored: particles on opposite edges report
    /// nearly the full domain width. Use [`Particle::periodic_distance_to`]
    /// for the minimum-image distance.
    ///
    /// Computed with `hypot`, so huge separations stay finite instead of
    /// overflowing in `dx * dx + dy * dy`.
    #[inline]
    pub fn distance_to(&self, other: &Particle) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// [`Particle::distance_to`] for callers whose counterpart may be absent.
    ///
    /// Errors:
    /// - `Error::InvalidArgument` if `other` is `None`.
    pub fn try_distance_to(&self, other: Option<&Particle>) -> Result<f64> {
        let other = other.ok_or_else(|| {
            Error::InvalidArgument("must set another particle to calculate distance".into())
        })?;
        Ok(self.distance_to(other))
    }

    /// Minimum-image distance between the two positions on `space`.
    #[inline]
    pub fn periodic_distance_to(&self, other: &Particle, space: &Space) -> f64 {
        let dx = space.minimum_image(self.x - other.x);
        let dy = space.minimum_image(self.y - other.y);
        dx.hypot(dy)
    }

    /// Advance the position by one time step on the periodic `space`.
    ///
    /// Each velocity component is reduced modulo the side length and shifted
    /// to be non-negative before being added to the coordinate. A coordinate
    /// that reaches or passes `limit` is wrapped back, so a particle that
    /// started inside the domain ends inside `[0, limit)`. Speed and heading
    /// are left untouched.
    pub fn step(&mut self, space: &Space) {
        let (vx, vy) = self.velocity();
        self.x = advance(self.x, vx, space);
        self.y = advance(self.y, vy, space);
    }

    /// [`Particle::step`] for callers holding a raw side length.
    ///
    /// Errors:
    /// - `Error::InvalidDomain` if `limit` is NaN/inf or not > 0; the particle is left unchanged.
    pub fn try_step(&mut self, limit: f64) -> Result<()> {
        let space = Space::new(limit)?;
        self.step(&space);
        Ok(())
    }
}

/// Non-negative per-step displacement in `[0, limit)` for a raw velocity component.
///
/// A tiny negative remainder can round up to exactly `limit` once shifted;
/// that is a full lap, i.e. no displacement.
#[inline]
fn displacement(raw: f64, limit: f64) -> f64 {
    let d = raw % limit;
    let d = if d < 0.0 { d + limit } else { d };
    if d >= limit {
        0.0
    } else {
        d
    }
}

fn advance(coord: f64, raw: f64, space: &Space) -> f64 {
    let delta = displacement(raw, space.limit());
    if delta == 0.0 {
        return coord;
    }
    let moved = coord + delta;
    if moved < space.limit() {
        return moved;
    }
    let wrapped = space.wrap(moved);
    log::trace!(
        "coordinate {moved} left the domain of side {}, wrapped to {wrapped}",
        space.limit()
    );
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn new_particle_ok() {
        let p = Particle::new(1.0, 2.0, 0.5, -7.0);
        assert_eq!(p.position(), (1.0, 2.0));
        assert_eq!(p.speed(), 0.5);
        // Heading is stored as given, not normalized.
        assert_eq!(p.angle(), -7.0);
    }

    #[test]
    fn new_trusts_its_caller() {
        let p = Particle::new(f64::NAN, 0.0, -1.0, 100.0);
        assert!(p.x().is_nan());
        assert_eq!(p.speed(), -1.0);
    }

    #[test]
    fn try_new_rejects_bad_state() {
        let err = Particle::try_new(0.0, 0.0, -1.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("speed"));
        let err = Particle::try_new(f64::NAN, 0.0, 1.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("position"));
        let err = Particle::try_new(0.0, 0.0, 1.0, f64::INFINITY).unwrap_err();
        assert!(err.to_string().contains("angle"));
    }

    #[test]
    fn setters_and_builders() {
        let mut p = Particle::new(0.0, 0.0, 1.0, 0.0);
        p.set_x(2.0);
        p.set_y(3.0);
        p.set_speed(0.1);
        p.set_angle(PI);
        assert_eq!(p, Particle::new(2.0, 3.0, 0.1, PI));

        let q = p.with_position(4.0, 5.0).with_speed(2.0).with_angle(1.0);
        assert_eq!(q, Particle::new(4.0, 5.0, 2.0, 1.0));
    }

    #[test]
    fn velocity_projects_heading() {
        let p = Particle::new(0.0, 0.0, 2.0, FRAC_PI_2);
        let (vx, vy) = p.velocity();
        assert_abs_diff_eq!(vx, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vy, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn three_four_five() {
        let a = Particle::new(0.0, 0.0, 1.0, 0.0);
        let b = Particle::new(3.0, 4.0, 1.0, 0.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn step_along_x() -> Result<()> {
        let space = Space::new(10.0)?;
        let mut p = Particle::new(0.0, 0.0, 1.0, 0.0);
        p.step(&space);
        assert_abs_diff_eq!(p.x(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y(), 0.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn negative_displacement_wraps_through_origin() -> Result<()> {
        let space = Space::new(10.0)?;
        let mut p = Particle::new(0.0, 0.0, 1.0, PI);
        p.step(&space);
        assert_abs_diff_eq!(p.x(), 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y(), 0.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn step_keeps_speed_and_heading() -> Result<()> {
        let space = Space::new(10.0)?;
        let mut p = Particle::new(5.0, 5.0, 0.3, 12.0);
        p.step(&space);
        assert_eq!(p.speed(), 0.3);
        assert_eq!(p.angle(), 12.0);
        Ok(())
    }

    #[test]
    fn upper_edge_is_wrapped() -> Result<()> {
        let space = Space::new(10.0)?;
        let mut p = Particle::new(9.9, 9.95, 0.2, PI / 4.0);
        p.step(&space);
        assert!(space.contains(p.x(), p.y()), "leaked to {:?}", p.position());
        let d = 0.2 * (PI / 4.0).cos();
        assert_abs_diff_eq!(p.x(), 9.9 + d - 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y(), 9.95 + d - 10.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn displacement_larger_than_domain() -> Result<()> {
        let space = Space::new(10.0)?;
        let mut p = Particle::new(1.0, 1.0, 23.0, 0.0);
        p.step(&space);
        assert_abs_diff_eq!(p.x(), 4.0, epsilon = 1e-12);
        let mut q = Particle::new(1.0, 1.0, 23.0, PI);
        q.step(&space);
        // -23 % 10 = -3, shifted to 7
        assert_abs_diff_eq!(q.x(), 8.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn displacement_helper() {
        assert_eq!(displacement(3.0, 10.0), 3.0);
        assert_eq!(displacement(-3.0, 10.0), 7.0);
        assert_eq!(displacement(13.0, 10.0), 3.0);
        assert_eq!(displacement(-13.0, 10.0), 7.0);
        assert_eq!(displacement(0.0, 10.0), 0.0);
        assert_eq!(displacement(-1e-17, 10.0), 0.0);
    }

    #[test]
    fn vertical_heading_keeps_x_fixed() -> Result<()> {
        // cos(3π/2) is a tiny negative, not zero.
        let space = Space::new(10.0)?;
        let mut p = Particle::new(0.3, 1.0, 1.0, 1.5 * PI);
        for _ in 0..1000 {
            p.step(&space);
        }
        assert_eq!(p.x(), 0.3);
        assert!(space.contains(p.x(), p.y()));
        Ok(())
    }

    #[test]
    fn try_distance_to_requires_counterpart() -> Result<()> {
        let a = Particle::new(0.0, 0.0, 1.0, 0.0);
        let b = Particle::new(3.0, 4.0, 1.0, 0.0);
        assert_eq!(a.try_distance_to(Some(&b))?, 5.0);
        let err = a.try_distance_to(None).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument("must set another particle to calculate distance".into())
        );
        Ok(())
    }

    #[test]
    fn huge_separation_stays_finite() {
        let a = Particle::new(-1e200, 0.0, 0.0, 0.0);
        let b = Particle::new(1e200, 1e200, 0.0, 0.0);
        assert!(a.distance_to(&b).is_finite());
    }

    #[test]
    fn try_step_rejects_bad_limit() {
        let mut p = Particle::new(1.0, 1.0, 1.0, 0.0);
        for limit in [0.0, -5.0, f64::NAN] {
            let err = p.try_step(limit).unwrap_err();
            assert!(matches!(err, Error::InvalidDomain(_)));
        }
        assert_eq!(p.position(), (1.0, 1.0));
    }

    #[test]
    fn try_step_moves() -> Result<()> {
        let mut p = Particle::new(1.0, 1.0, 1.0, 0.0);
        p.try_step(10.0)?;
        assert_abs_diff_eq!(p.x(), 2.0, epsilon = 1e-12);
        Ok(())
    }
}
