//! World-space shape queries for colliders.
//!
//! All derivations are axis-aligned: the collider offset is not
//! rotated, boxes ignore the transform rotation, and spheres scale by the
//! largest scale component.

use glam::Vec3;

use crate::ecs::components::physics::{Collider, ColliderShape};
use crate::ecs::components::transform::Transform;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsAabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl PhysicsAabb {
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Closest point inside the box to `point`, by per-axis clamping.
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// The eight corners, bit 0/1/2 of the index selecting max on x/y/z.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
        }
        corners
    }
}

/// Collider geometry resolved into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    Box(PhysicsAabb),
    Sphere { center: Vec3, radius: f32 },
}

impl Collider {
    /// Transform position plus the unrotated local offset.
    #[inline]
    pub fn world_position(&self, transform: &Transform) -> Vec3 {
        transform.position + self.offset
    }

    /// Local box size scaled componentwise. Zero for non-box shapes.
    #[inline]
    pub fn world_size(&self, transform: &Transform) -> Vec3 {
        match self.shape {
            ColliderShape::Box { size } => size * transform.scale.abs(),
            _ => Vec3::ZERO,
        }
    }

    /// Local radius scaled by the largest scale component. Zero for shapes without one.
    #[inline]
    pub fn world_radius(&self, transform: &Transform) -> f32 {
        match self.shape {
            ColliderShape::Sphere { radius } | ColliderShape::Capsule { radius, .. } => {
                radius * transform.scale.abs().max_element()
            }
            _ => 0.0,
        }
    }

    /// World-space box (center, half-extents) for box colliders.
    pub fn world_aabb(&self, transform: &Transform) -> Option<PhysicsAabb> {
        match self.shape {
            ColliderShape::Box { .. } => Some(PhysicsAabb::from_center_half_extents(
                self.world_position(transform),
                self.world_size(transform) * 0.5,
            )),
            _ => None,
        }
    }

    /// Resolve the collider into world space. `None` for inert shapes.
    pub fn world_shape(&self, transform: &Transform) -> Option<WorldShape> {
        match self.shape {
            ColliderShape::Box { .. } => self.world_aabb(transform).map(WorldShape::Box),
            ColliderShape::Sphere { .. } => Some(WorldShape::Sphere {
                center: self.world_position(transform),
                radius: self.world_radius(transform),
            }),
            ColliderShape::Capsule { .. } | ColliderShape::Mesh | ColliderShape::None => None,
        }
    }
}
