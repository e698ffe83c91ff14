use std::fmt::Debug;

use crate::{config::DEFAULT_CONTACT_REST_LENGTH, core::rigidbody::RigidBody};

/// Supplies the separation a same-cell pair is pushed towards.
///
/// This is the seam for shape-aware narrow-phase work: the solver only asks
/// for a rest length and derives the penetration scalar from it.
pub trait ContactModel: Debug + Send + Sync {
    fn rest_length(&self, a: &RigidBody, b: &RigidBody) -> f32;

    fn name(&self) -> &str;
}

/// Fixed rest length for every pair; body shapes are not consulted.
#[derive(Debug, Clone, Copy)]
pub struct UnitRestLength {
    pub length: f32,
}

impl Default for UnitRestLength {
    fn default() -> Self {
        Self {
            length: DEFAULT_CONTACT_REST_LENGTH,
        }
    }
}

impl ContactModel for UnitRestLength {
    fn rest_length(&self, _a: &RigidBody, _b: &RigidBody) -> f32 {
        self.length
    }

    fn name(&self) -> &str {
        "unit-rest-length"
    }
}

/// Rest length from the sum of both shapes' bounding radii.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeRestLength;

impl ContactModel for ShapeRestLength {
    fn rest_length(&self, a: &RigidBody, b: &RigidBody) -> f32 {
        a.shape.bounding_radius() + b.shape.bounding_radius()
    }

    fn name(&self) -> &str {
        "shape-rest-length"
    }
}
