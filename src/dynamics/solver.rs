use glam::Vec3;

use crate::{
    collision::{broadphase::SpatialHashGrid, contact::ContactModel},
    core::{constraints::DistanceJoint, rigidbody::RigidBody},
    error::{PhysicsError, Result},
    utils::{allocator::Arena, math::normalize_or_unchanged},
};

/// Counters gathered by one contact pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContactReport {
    pub pairs_tested: usize,
    pub impulses_applied: usize,
    /// Pairs skipped because neither body can move.
    pub skipped_static: usize,
    /// Pairs skipped because both bodies sit at the same point.
    pub skipped_degenerate: usize,
}

impl ContactReport {
    pub fn merge(&mut self, other: &Self) {
        self.pairs_tested += other.pairs_tested;
        self.impulses_applied += other.impulses_applied;
        self.skipped_static += other.skipped_static;
        self.skipped_degenerate += other.skipped_degenerate;
    }
}

/// Single-shot impulse solver for same-cell contacts and distance joints.
///
/// Each call applies one correction along the separation normal and returns;
/// leftover error is picked up again on the next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintSolver;

impl ConstraintSolver {
    pub fn new() -> Self {
        Self
    }

    /// Impulse that drives `separation` (from `a` to `b`) towards `rest_length`.
    ///
    /// `normal` is the unit separation; the result is applied as
    /// `a -= impulse * inv_a`, `b += impulse * inv_b`. Returns `None` when
    /// both inverse masses are zero.
    pub fn separation_impulse(
        normal: Vec3,
        length: f32,
        rest_length: f32,
        inv_mass_a: f32,
        inv_mass_b: f32,
    ) -> Option<Vec3> {
        let inv_mass_sum = inv_mass_a + inv_mass_b;
        if inv_mass_sum == 0.0 {
            return None;
        }
        let c = length - rest_length;
        Some(normal * (-c / inv_mass_sum))
    }

    fn apply_impulse(a: &mut RigidBody, b: &mut RigidBody, impulse: Vec3) {
        a.velocity -= impulse * a.inverse_mass();
        b.velocity += impulse * b.inverse_mass();
    }

    /// Resolves one contact pair. Returns whether an impulse was applied.
    pub fn resolve_contact(
        a: &mut RigidBody,
        b: &mut RigidBody,
        rest_length: f32,
        report: &mut ContactReport,
    ) -> bool {
        report.pairs_tested += 1;

        if a.is_static() && b.is_static() {
            report.skipped_static += 1;
            return false;
        }

        let diff = b.position - a.position;
        let len = diff.length();
        if len == 0.0 {
            report.skipped_degenerate += 1;
            return false;
        }

        let normal = diff * (1.0 / len);
        match Self::separation_impulse(normal, len, rest_length, a.inverse_mass(), b.inverse_mass())
        {
            Some(impulse) => {
                Self::apply_impulse(a, b, impulse);
                report.impulses_applied += 1;
                true
            }
            None => false,
        }
    }

    /// Runs contact resolution for every cell holding two or more bodies.
    ///
    /// `grid` must have been rebuilt from the current positions of `bodies`.
    pub fn resolve_contacts(
        &self,
        bodies: &mut Arena<RigidBody>,
        grid: &SpatialHashGrid,
        model: &dyn ContactModel,
    ) -> ContactReport {
        let mut report = ContactReport::default();

        for cell in grid.cells() {
            if cell.bodies.len() < 2 {
                continue;
            }
            for (i, &handle_a) in cell.bodies.iter().enumerate() {
                for &handle_b in &cell.bodies[i + 1..] {
                    let Some((a, b)) = bodies.get2_mut(handle_a, handle_b) else {
                        continue;
                    };
                    let rest_length = model.rest_length(a, b);
                    Self::resolve_contact(a, b, rest_length, &mut report);
                }
            }
        }

        report
    }

    /// Applies one distance-joint correction.
    pub fn solve_joint(&self, bodies: &mut Arena<RigidBody>, joint: &DistanceJoint) -> Result<()> {
        let (handle_a, handle_b) = joint.bodies();
        let (a, b) = bodies
            .get2_mut(handle_a, handle_b)
            .ok_or(PhysicsError::InvalidJoint {
                body_a: handle_a,
                body_b: handle_b,
            })?;

        let (anchor_a, anchor_b) = joint.world_anchors(a, b);
        let diff = anchor_b - anchor_a;
        let len = diff.length();
        let normal = normalize_or_unchanged(diff);

        if let Some(impulse) =
            Self::separation_impulse(normal, len, joint.distance, a.inverse_mass(), b.inverse_mass())
        {
            Self::apply_impulse(a, b, impulse);
        }
        Ok(())
    }

    /// Solves `joints` in order, stopping at the first invalid one.
    pub fn solve_joints(&self, bodies: &mut Arena<RigidBody>, joints: &[DistanceJoint]) -> Result<()> {
        for joint in joints {
            if let Err(err) = self.solve_joint(bodies, joint) {
                log::warn!("joint rejected: {err}");
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collision::contact::UnitRestLength, utils::allocator::BodyHandle};
    use approx::assert_abs_diff_eq;

    fn pair(a: RigidBody, b: RigidBody) -> Arena<RigidBody> {
        Arena::from(vec![a, b])
    }

    #[test]
    fn joint_pulls_bodies_towards_rest_distance() {
        let mut bodies = pair(
            RigidBody::new(Vec3::ZERO, 1.0),
            RigidBody::new(Vec3::new(2.0, 0.0, 0.0), 1.0),
        );
        let joint = DistanceJoint::new(BodyHandle(0), BodyHandle(1), 1.0);
        ConstraintSolver::new()
            .solve_joint(&mut bodies, &joint)
            .expect("valid joint");

        let [a, b] = bodies.as_slice() else { unreachable!() };
        assert!(a.velocity.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-3));
        assert!(b.velocity.abs_diff_eq(Vec3::new(-0.5, 0.0, 0.0), 1e-3));
    }

    #[test]
    fn coincident_joint_anchors_apply_nothing() {
        let mut bodies = pair(RigidBody::default(), RigidBody::default());
        let joint = DistanceJoint::new(BodyHandle(0), BodyHandle(1), 1.0);
        ConstraintSolver::new()
            .solve_joint(&mut bodies, &joint)
            .expect("valid joint");
        assert!(bodies.iter().all(|b| b.velocity == Vec3::ZERO));
    }

    #[test]
    fn joint_with_unknown_body_is_rejected() {
        let mut bodies = pair(RigidBody::default(), RigidBody::default());
        let solver = ConstraintSolver::new();

        let dangling = DistanceJoint::new(BodyHandle(0), BodyHandle(9), 1.0);
        assert_eq!(
            solver.solve_joint(&mut bodies, &dangling),
            Err(PhysicsError::InvalidJoint {
                body_a: BodyHandle(0),
                body_b: BodyHandle(9)
            })
        );

        let self_joint = DistanceJoint::new(BodyHandle(1), BodyHandle(1), 1.0);
        assert!(solver.solve_joints(&mut bodies, &[self_joint]).is_err());
    }

    #[test]
    fn contact_pushes_overlapping_pair_apart() {
        let mut a = RigidBody::new(Vec3::ZERO, 1.0);
        let mut b = RigidBody::new(Vec3::new(0.5, 0.0, 0.0), 1.0);
        let mut report = ContactReport::default();

        assert!(ConstraintSolver::resolve_contact(&mut a, &mut b, 1.0, &mut report));
        // c = -0.5, impulse = +0.25 along x
        assert_abs_diff_eq!(a.velocity.x, -0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(b.velocity.x, 0.25, epsilon = 1e-6);
        assert_eq!(report.impulses_applied, 1);
    }

    #[test]
    fn contact_between_two_static_bodies_is_skipped() {
        let mut a = RigidBody::fixed(Vec3::ZERO);
        let mut b = RigidBody::fixed(Vec3::new(0.5, 0.0, 0.0));
        let mut report = ContactReport::default();

        assert!(!ConstraintSolver::resolve_contact(&mut a, &mut b, 1.0, &mut report));
        assert_eq!(report.skipped_static, 1);
        assert_eq!(a.velocity, Vec3::ZERO);
        assert_eq!(b.velocity, Vec3::ZERO);
    }

    #[test]
    fn single_static_body_is_immovable_and_other_takes_full_correction() {
        let mut ground = RigidBody::fixed(Vec3::ZERO);
        let mut ball = RigidBody::new(Vec3::new(0.0, 0.5, 0.0), 2.0);
        let mut report = ContactReport::default();

        assert!(ConstraintSolver::resolve_contact(&mut ground, &mut ball, 1.0, &mut report));
        assert_eq!(ground.velocity, Vec3::ZERO);
        assert!(ball.velocity.is_finite());
        // combined inverse mass = 0.5, impulse = 0.5 / 0.5 = 1.0, dv = 1.0 * 0.5
        assert_abs_diff_eq!(ball.velocity.y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn coincident_contact_pair_is_skipped() {
        let mut a = RigidBody::default();
        let mut b = RigidBody::default();
        let mut report = ContactReport::default();

        assert!(!ConstraintSolver::resolve_contact(&mut a, &mut b, 1.0, &mut report));
        assert_eq!(report.skipped_degenerate, 1);
    }

    #[test]
    fn restitution_does_not_change_impulse() {
        let run = |restitution: f32| {
            let mut a = RigidBody::default().with_restitution(restitution);
            let mut b = RigidBody::default()
                .with_position(Vec3::new(0.3, 0.0, 0.0))
                .with_restitution(restitution);
            ConstraintSolver::resolve_contact(&mut a, &mut b, 1.0, &mut ContactReport::default());
            b.velocity
        };
        assert_eq!(run(0.0), run(1.0));
    }

    #[test]
    fn resolve_contacts_only_touches_same_cell_pairs() {
        let mut bodies = Arena::from(vec![
            RigidBody::new(Vec3::new(0.2, 0.5, 0.5), 1.0),
            RigidBody::new(Vec3::new(0.8, 0.5, 0.5), 1.0),
            RigidBody::new(Vec3::new(1.1, 0.5, 0.5), 1.0),
        ]);
        let mut grid = SpatialHashGrid::new(1.0, 32);
        grid.rebuild(&bodies);

        let report =
            ConstraintSolver::new().resolve_contacts(&mut bodies, &grid, &UnitRestLength::default());

        assert_eq!(report.pairs_tested, 1);
        assert_eq!(report.impulses_applied, 1);
        assert_eq!(bodies.as_slice()[2].velocity, Vec3::ZERO);
        assert!(bodies.as_slice()[0].velocity.x < 0.0);
        assert!(bodies.as_slice()[1].velocity.x > 0.0);
    }

    #[test]
    fn report_merge_adds_counters() {
        let mut total = ContactReport {
            pairs_tested: 2,
            impulses_applied: 1,
            skipped_static: 1,
            skipped_degenerate: 0,
        };
        total.merge(&ContactReport {
            pairs_tested: 3,
            impulses_applied: 2,
            skipped_static: 0,
            skipped_degenerate: 1,
        });
        assert_eq!(total.pairs_tested, 5);
        assert_eq!(total.impulses_applied, 3);
        assert_eq!(total.skipped_degenerate, 1);
    }
}
