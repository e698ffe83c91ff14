use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{core::rigidbody::RigidBody, utils::allocator::BodyHandle};

/// How a joint's anchor offsets map into world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorFrame {
    /// Offsets are added to the body position as-is.
    #[default]
    World,
    /// Offsets are rotated by the body orientation first.
    Body,
}

/// Keeps two anchor points `distance` apart.
///
/// Joints refer to bodies by handle and are owned by the caller; the scene
/// only borrows a joint list while solving it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceJoint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub anchor_a: Vec3,
    pub anchor_b: Vec3,
    pub distance: f32,
    #[serde(default)]
    pub anchor_frame: AnchorFrame,
}

impl DistanceJoint {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, distance: f32) -> Self {
        Self {
            body_a,
            body_b,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
            distance,
            anchor_frame: AnchorFrame::World,
        }
    }

    pub fn with_anchors(mut self, anchor_a: Vec3, anchor_b: Vec3) -> Self {
        self.anchor_a = anchor_a;
        self.anchor_b = anchor_b;
        self
    }

    pub fn with_anchor_frame(mut self, frame: AnchorFrame) -> Self {
        self.anchor_frame = frame;
        self
    }

    pub fn bodies(&self) -> (BodyHandle, BodyHandle) {
        (self.body_a, self.body_b)
    }

    /// World-space anchor points for the two bodies.
    pub fn world_anchors(&self, a: &RigidBody, b: &RigidBody) -> (Vec3, Vec3) {
        match self.anchor_frame {
            AnchorFrame::World => (a.position + self.anchor_a, b.position + self.anchor_b),
            AnchorFrame::Body => (
                a.position + a.rotate_local(self.anchor_a),
                b.position + b.rotate_local(self.anchor_b),
            ),
        }
    }
}
