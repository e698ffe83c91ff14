//! Core types: rigid bodies, their shapes, and joints.

pub mod constraints;
pub mod rigidbody;
pub mod shape;

pub use constraints::{AnchorFrame, DistanceJoint};
pub use rigidbody::RigidBody;
pub use shape::CollisionShape;
