//! Point masses: Verlet particles with implicit velocity.

use bunting_math::DVec3;
use bunting_types::Scalar;

/// A particle of the cloth grid.
///
/// The rest position and pin flag are fixed at construction. A pinned point
/// mass is skipped by integration, so its current and previous positions
/// never change.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMass {
    rest_position: DVec3,
    pinned: bool,
    current_position: DVec3,
    previous_position: DVec3,
    accumulated_force: DVec3,
}

impl PointMass {
    /// Creates a point mass at rest at `rest_position`.
    pub fn new(rest_position: DVec3, pinned: bool) -> Self {
        Self {
            rest_position,
            pinned,
            current_position: rest_position,
            previous_position: rest_position,
            accumulated_force: DVec3::ZERO,
        }
    }

    /// Undeformed grid location.
    #[inline]
    pub fn rest_position(&self) -> DVec3 {
        self.rest_position
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    #[inline]
    pub fn current_position(&self) -> DVec3 {
        self.current_position
    }

    #[inline]
    pub fn previous_position(&self) -> DVec3 {
        self.previous_position
    }

    /// Force gathered during the most recent step.
    #[inline]
    pub fn accumulated_force(&self) -> DVec3 {
        self.accumulated_force
    }

    /// Displacement over the last step, before damping.
    #[inline]
    pub fn displacement(&self) -> DVec3 {
        self.current_position - self.previous_position
    }

    /// Starts a new step's force accumulation from `force`.
    #[inline]
    pub(crate) fn reset_force(&mut self, force: DVec3) {
        self.accumulated_force = force;
    }

    #[inline]
    pub(crate) fn add_force(&mut self, force: DVec3) {
        self.accumulated_force += force;
    }

    /// Damped Verlet step:
    /// `x' = x + (x - x_prev)(1 - damping) + F/m · dt²`.
    pub(crate) fn integrate(&mut self, dt: Scalar, damping: Scalar, mass: Scalar) {
        if self.pinned {
            return;
        }
        let velocity = (self.current_position - self.previous_position) * (1.0 - damping);
        self.previous_position = self.current_position;
        self.current_position += velocity + self.accumulated_force / mass * (dt * dt);
    }
}
