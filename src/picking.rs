//! Ray casting against the displayed clone's surface.

use glam::Vec3;

use crate::scene::{DisplayClone, NodeId};

/// World-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Normalized direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from an origin toward a direction, normalizing the direction.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalize_or_zero() }
    }
}

/// Closest surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space intersection point.
    pub point: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
    /// Node whose triangle was hit.
    pub node: NodeId,
}

/// Cast `ray` against every triangle of the clone in its display pose and
/// return the nearest front-facing or back-facing hit.
#[must_use]
pub fn intersect_clone(ray: &Ray, clone: &DisplayClone) -> Option<RayHit> {
    let transforms = clone.world_transforms(&clone.root_transform());
    let mut best: Option<RayHit> = None;

    for (node, world) in clone.nodes().iter().zip(&transforms) {
        let Some(mesh) = &node.mesh else { continue };
        let geometry = &mesh.geometry;
        for tri in geometry.indices.chunks_exact(3) {
            let a = world.transform_point3(geometry.positions[tri[0] as usize]);
            let b = world.transform_point3(geometry.positions[tri[1] as usize]);
            let c = world.transform_point3(geometry.positions[tri[2] as usize]);
            let Some(distance) = ray_triangle(ray, a, b, c) else {
                continue;
            };
            if best.is_none_or(|hit| distance < hit.distance) {
                best = Some(RayHit {
                    point: ray.origin + ray.direction * distance,
                    distance,
                    node: node.id,
                });
            }
        }
    }
    best
}

/// Moller-Trumbore intersection; returns the hit distance along the ray.
fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;
    let ab = b - a;
    let ac = c - a;
    let p = ray.direction.cross(ac);
    let det = ab.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(ab);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = ac.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}
