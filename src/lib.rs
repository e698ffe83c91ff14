//! gridstep – a lightweight real-time rigid-body step.
//!
//! One tick applies gravity, integrates every body's position and
//! orientation, rebuilds a uniform spatial hash grid from the new positions,
//! and resolves contacts between bodies that share a grid cell. Distance
//! joints are solved on demand against a caller-held joint list.
//!
//! ```
//! use gridstep::{RigidBody, Scene, Vec3};
//!
//! let mut scene = Scene::builder()
//!     .with_body(RigidBody::default().with_velocity(Vec3::X))
//!     .build()
//!     .expect("default configuration is valid");
//! scene.step(1.0 / 60.0);
//! assert!(scene.bodies()[0].position.y < 0.0);
//! ```

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod scene;
pub mod utils;

pub use glam::{Quat, Vec3};

pub use collision::{
    broadphase::{CellCoord, SpatialHashGrid},
    contact::{ContactModel, ShapeRestLength, UnitRestLength},
    queries::RayHit,
};
pub use config::SceneConfig;
pub use core::{
    constraints::{AnchorFrame, DistanceJoint},
    rigidbody::RigidBody,
    shape::CollisionShape,
};
pub use dynamics::{
    integrator::Integrator,
    solver::{ConstraintSolver, ContactReport},
};
pub use error::{PhysicsError, Result};
pub use scene::{Scene, SceneBuilder};
pub use utils::{
    allocator::{Arena, BodyHandle},
    profiling::TickProfile,
};
