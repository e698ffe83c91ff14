use glam::Vec3;

use crate::{
    collision::broadphase::SpatialHashGrid,
    core::rigidbody::RigidBody,
    utils::allocator::{Arena, BodyHandle},
};

/// A body crossed by a segment query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub body: BodyHandle,
    pub point: Vec3,
    /// Distance from the segment start to `point`.
    pub distance: f32,
}

/// Casts the segment `start..end` against the bounding spheres of the bodies
/// the grid walk reports, nearest hit first.
///
/// `grid` must have been rebuilt from the current positions of `bodies`.
/// Bodies whose centre lies outside every crossed cell are not considered.
pub fn cast_segment(
    grid: &SpatialHashGrid,
    bodies: &Arena<RigidBody>,
    start: Vec3,
    end: Vec3,
) -> Vec<RayHit> {
    let offset = end - start;
    let max_distance = offset.length();
    let dir = offset.normalize_or_zero();

    let mut hits: Vec<RayHit> = grid
        .query_ray(start, end)
        .into_iter()
        .filter_map(|handle| {
            let body = bodies.get(handle)?;
            let distance = ray_sphere(
                start,
                dir,
                max_distance,
                body.position,
                body.shape.bounding_radius(),
            )?;
            Some(RayHit {
                body: handle,
                point: start + dir * distance,
                distance,
            })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Entry distance of the ray `origin + t * dir` into a sphere, limited to
/// `0..=max_distance`. A start inside the sphere reports distance 0.
fn ray_sphere(origin: Vec3, dir: Vec3, max_distance: f32, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    if dir == Vec3::ZERO {
        return None;
    }

    let b = oc.dot(dir);
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    (0.0..=max_distance).contains(&t).then_some(t)
}
