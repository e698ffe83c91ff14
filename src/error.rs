//! Error types for the physics step.

use thiserror::Error;

use crate::utils::allocator::BodyHandle;

/// Physics errors
#[derive(Debug, Error, PartialEq)]
pub enum PhysicsError {
    /// Invalid configuration
    #[error("Invalid scene configuration: {0}")]
    InvalidConfig(String),

    /// Rigid body not found
    #[error("Rigid body not found: {0:?}")]
    BodyNotFound(BodyHandle),

    /// Joint endpoints missing or not distinct
    #[error("Invalid joint between {body_a:?} and {body_b:?}")]
    InvalidJoint {
        body_a: BodyHandle,
        body_b: BodyHandle,
    },
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
