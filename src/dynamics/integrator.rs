use glam::Vec3;

use crate::{core::rigidbody::RigidBody, utils::allocator::Arena};

/// Steps every body forward: gravity into velocity, then velocity into pose.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integrator;

impl Integrator {
    pub fn new() -> Self {
        Self
    }

    pub fn integrate_velocity(&self, body: &mut RigidBody, gravity: Vec3, dt: f32) {
        body.apply_gravity(gravity, dt);
    }

    pub fn integrate_position(&self, body: &mut RigidBody, dt: f32) {
        body.integrate(dt);
    }

    pub fn step(&self, bodies: &mut Arena<RigidBody>, gravity: Vec3, dt: f32) {
        for body in bodies.iter_mut() {
            self.integrate_velocity(body, gravity, dt);
        }
        for body in bodies.iter_mut() {
            self.integrate_position(body, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn step_applies_gravity_before_moving() {
        let mut bodies = Arena::from(vec![
            RigidBody::default().with_velocity(Vec3::X),
            RigidBody::fixed(Vec3::new(0.0, 5.0, 0.0)),
        ]);
        Integrator::new().step(&mut bodies, Vec3::new(0.0, -2.0, 0.0), 0.5);

        let moving = &bodies.as_slice()[0];
        assert_abs_diff_eq!(moving.velocity.y, -1.0);
        assert_abs_diff_eq!(moving.position.x, 0.5);
        assert_abs_diff_eq!(moving.position.y, -0.5);

        // gravity reaches zero-mass bodies too
        let fixed = &bodies.as_slice()[1];
        assert_abs_diff_eq!(fixed.position.y, 4.5);
    }
}
