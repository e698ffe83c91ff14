use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::shape::CollisionShape;
use crate::utils::math::integrate_orientation;

/// Core rigid body description storing kinematic state and properties.
///
/// A body with zero mass is immovable: its inverse mass is zero, so solver
/// impulses never change its velocity. Gravity still applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    /// Stored for collaborators; the solver never reads it.
    pub restitution: f32,
    pub rotation: Quat,
    pub angular_velocity: Vec3,
    /// Scalar placeholder; rotational dynamics do not consume it yet.
    pub inertia: f32,
    pub shape: CollisionShape,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mass: 1.0,
            restitution: 0.5,
            rotation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            inertia: 1.0,
            shape: CollisionShape::default(),
        }
    }
}

impl RigidBody {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            mass,
            ..Self::default()
        }
    }

    /// Zero-mass body at `position`.
    pub fn fixed(position: Vec3) -> Self {
        Self::new(position, 0.0)
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_shape(mut self, shape: CollisionShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    pub fn inverse_mass(&self) -> f32 {
        if self.mass == 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    pub fn apply_gravity(&mut self, gravity: Vec3, dt: f32) {
        self.velocity += gravity * dt;
    }

    /// Explicit Euler position update followed by the first-order
    /// quaternion update. Velocity must already hold this tick's forces.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.rotation = integrate_orientation(self.rotation, self.angular_velocity, dt);
    }

    /// Anchor offset expressed in world space by this body's orientation.
    pub fn rotate_local(&self, offset: Vec3) -> Vec3 {
        self.rotation * offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn integrate_moves_by_velocity() {
        let mut body = RigidBody::default().with_velocity(Vec3::new(1.0, 2.0, 3.0));
        body.integrate(1.0);
        assert!(body.position.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-3));
        assert_eq!(body.rotation, Quat::IDENTITY);
    }

    #[test]
    fn integrate_spins_and_stays_normalized() {
        let mut body = RigidBody::default().with_angular_velocity(Vec3::Y);
        body.integrate(0.016);
        assert!(body.rotation != Quat::IDENTITY);
        assert_abs_diff_eq!(body.rotation.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn gravity_is_semi_implicit() {
        let mut body = RigidBody::default();
        body.apply_gravity(Vec3::new(0.0, -10.0, 0.0), 0.5);
        body.integrate(0.5);
        assert_abs_diff_eq!(body.velocity.y, -5.0);
        assert_abs_diff_eq!(body.position.y, -2.5);
    }

    #[test]
    fn zero_mass_has_zero_inverse() {
        let body = RigidBody::fixed(Vec3::ZERO);
        assert!(body.is_static());
        assert_eq!(body.inverse_mass(), 0.0);
        assert_abs_diff_eq!(RigidBody::default().with_mass(4.0).inverse_mass(), 0.25);
    }
}
