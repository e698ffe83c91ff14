use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Geometry carried by a rigid body.
///
/// The default contact model ignores it; [`crate::collision::contact::ShapeRestLength`]
/// uses [`CollisionShape::bounding_radius`] to derive a per-pair rest length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    /// Flat rectangle lying in the body's local XZ plane.
    Plane { width: f32, height: f32 },
    Sphere { radius: f32 },
    Box { width: f32, height: f32, depth: f32 },
}

impl Default for CollisionShape {
    fn default() -> Self {
        CollisionShape::Sphere { radius: 0.5 }
    }
}

impl CollisionShape {
    pub fn sphere(radius: f32) -> Self {
        CollisionShape::Sphere { radius }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        CollisionShape::Box {
            width,
            height,
            depth,
        }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        CollisionShape::Plane { width, height }
    }

    /// Radius of the smallest origin-centred sphere enclosing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            CollisionShape::Sphere { radius } => radius,
            CollisionShape::Box {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth).length() * 0.5,
            CollisionShape::Plane { width, height } => {
                (width * width + height * height).sqrt() * 0.5
            }
        }
    }
}
