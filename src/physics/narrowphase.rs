//! Narrowphase collision detection: AABB and sphere tests.
//!
//! Shape pairs are dispatched through a table indexed by the ordered pair of
//! [`ShapeKind`] tags. Mirrored pairs reuse the canonical test with swapped
//! arguments and a negated normal. Any pair without an entry (capsules,
//! meshes, `None`) never collides.

use glam::Vec3;

use crate::ecs::components::physics::{Collider, ShapeKind};
use crate::ecs::components::transform::Transform;

use super::collider::{PhysicsAabb, WorldShape};
use super::contact::ContactInfo;

/// Distance below which a direction is considered degenerate.
pub const DEGENERATE_EPSILON: f32 = 0.001;

/// Narrowphase test between two colliders placed by their transforms.
pub type NarrowphaseFn = fn(&Collider, &Transform, &Collider, &Transform) -> Option<ContactInfo>;

const DISPATCH: [[Option<NarrowphaseFn>; ShapeKind::COUNT]; ShapeKind::COUNT] = {
    let mut table: [[Option<NarrowphaseFn>; ShapeKind::COUNT]; ShapeKind::COUNT] =
        [[None; ShapeKind::COUNT]; ShapeKind::COUNT];
    let b = ShapeKind::Box.index();
    let s = ShapeKind::Sphere.index();
    table[b][b] = Some(box_box as NarrowphaseFn);
    table[s][s] = Some(sphere_sphere_shapes as NarrowphaseFn);
    table[b][s] = Some(box_sphere as NarrowphaseFn);
    table[s][b] = Some(sphere_box as NarrowphaseFn);
    table
};

/// Look up the test for an ordered pair of shape kinds.
#[inline]
pub fn dispatch(kind_a: ShapeKind, kind_b: ShapeKind) -> Option<NarrowphaseFn> {
    DISPATCH[kind_a.index()][kind_b.index()]
}

/// Detect collision between two colliders. The normal points from A to B.
pub fn detect_collision(
    collider_a: &Collider,
    transform_a: &Transform,
    collider_b: &Collider,
    transform_b: &Transform,
) -> Option<ContactInfo> {
    let test = dispatch(collider_a.shape.kind(), collider_b.shape.kind())?;
    test(collider_a, transform_a, collider_b, transform_b)
}

/// Run `test` with the operands swapped and report the contact from A's side.
#[inline]
fn swap_and_negate(
    test: NarrowphaseFn,
    collider_a: &Collider,
    transform_a: &Transform,
    collider_b: &Collider,
    transform_b: &Transform,
) -> Option<ContactInfo> {
    test(collider_b, transform_b, collider_a, transform_a).map(ContactInfo::flipped)
}

fn box_box(
    collider_a: &Collider,
    transform_a: &Transform,
    collider_b: &Collider,
    transform_b: &Transform,
) -> Option<ContactInfo> {
    let a = collider_a.world_aabb(transform_a)?;
    let b = collider_b.world_aabb(transform_b)?;
    aabb_aabb(&a, &b)
}

fn sphere_sphere_shapes(
    collider_a: &Collider,
    transform_a: &Transform,
    collider_b: &Collider,
    transform_b: &Transform,
) -> Option<ContactInfo> {
    match (
        collider_a.world_shape(transform_a)?,
        collider_b.world_shape(transform_b)?,
    ) {
        (
            WorldShape::Sphere {
                center: center_a,
                radius: radius_a,
            },
            WorldShape::Sphere {
                center: center_b,
                radius: radius_b,
            },
        ) => sphere_sphere(center_a, radius_a, center_b, radius_b),
        _ => None,
    }
}

fn box_sphere(
    collider_a: &Collider,
    transform_a: &Transform,
    collider_b: &Collider,
    transform_b: &Transform,
) -> Option<ContactInfo> {
    let aabb = collider_a.world_aabb(transform_a)?;
    match collider_b.world_shape(transform_b)? {
        WorldShape::Sphere { center, radius } => aabb_sphere(&aabb, center, radius),
        WorldShape::Box(_) => None,
    }
}

fn sphere_box(
    collider_a: &Collider,
    transform_a: &Transform,
    collider_b: &Collider,
    transform_b: &Transform,
) -> Option<ContactInfo> {
    swap_and_negate(box_sphere, collider_a, transform_a, collider_b, transform_b)
}

/// Axis-aligned box vs box. Rotation is never considered.
///
/// Separates along the axis of least overlap; the contact point is A's
/// center pushed to its face along the normal.
pub fn aabb_aabb(a: &PhysicsAabb, b: &PhysicsAabb) -> Option<ContactInfo> {
    let center_a = a.center();
    let half_a = a.half_extents();
    let delta = b.center() - center_a;
    let overlap = half_a + b.half_extents() - delta.abs();

    if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
        return None;
    }

    let axis = if overlap.x <= overlap.y && overlap.x <= overlap.z {
        0
    } else if overlap.y <= overlap.z {
        1
    } else {
        2
    };

    let mut normal = Vec3::ZERO;
    normal[axis] = if delta[axis] < 0.0 { -1.0 } else { 1.0 };

    Some(ContactInfo {
        normal,
        penetration: overlap[axis],
        point: center_a + normal * half_a[axis],
    })
}

/// Sphere vs sphere.
///
/// Coincident centers report an upward normal and the full radius sum
/// instead of normalizing a zero vector.
pub fn sphere_sphere(
    center_a: Vec3,
    radius_a: f32,
    center_b: Vec3,
    radius_b: f32,
) -> Option<ContactInfo> {
    let delta = center_b - center_a;
    let dist = delta.length();
    let radii = radius_a + radius_b;

    if dist >= radii {
        return None;
    }

    if dist < DEGENERATE_EPSILON {
        return Some(ContactInfo {
            normal: Vec3::Y,
            penetration: radii,
            point: center_a,
        });
    }

    let normal = delta / dist;
    Some(ContactInfo {
        normal,
        penetration: radii - dist,
        point: center_a + normal * radius_a,
    })
}

/// Axis-aligned box (A) vs sphere (B).
///
/// When the sphere center is inside the box the normal is taken from the box
/// center toward the sphere center and the penetration is the full radius.
pub fn aabb_sphere(aabb: &PhysicsAabb, center: Vec3, radius: f32) -> Option<ContactInfo> {
    let closest = aabb.closest_point(center);
    let delta = center - closest;
    let dist = delta.length();

    if dist < DEGENERATE_EPSILON {
        let outward = center - aabb.center();
        let normal = if outward.length() < DEGENERATE_EPSILON {
            Vec3::Y
        } else {
            outward.normalize()
        };
        return Some(ContactInfo {
            normal,
            penetration: radius,
            point: closest,
        });
    }

    if dist >= radius {
        return None;
    }

    Some(ContactInfo {
        normal: delta / dist,
        penetration: radius - dist,
        point: closest,
    })
}
