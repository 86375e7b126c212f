//! Collider wireframes for debug rendering.
//!
//! Produces plain line segments; uploading and drawing them is up to the
//! renderer. With the `debug-draw` feature the segments can be flattened
//! into a `bytemuck`-castable vertex list.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::ecs::store::PhysicsStore;

use super::collider::{PhysicsAabb, WorldShape};

/// Segments per sphere circle.
pub const CIRCLE_SEGMENTS: usize = 16;

pub const SOLID_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const TRIGGER_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// A world-space line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: [f32; 4],
}

/// Wireframes of every enabled collider in `store`.
///
/// Boxes yield 12 edges, spheres three orthogonal circles. Shapes without a
/// narrowphase (capsule, mesh) are not drawn.
pub fn collect_debug_lines<S: PhysicsStore>(store: &S) -> Vec<DebugLine> {
    let mut entries = Vec::new();
    store.collect_colliders(&mut entries);

    let mut lines = Vec::new();
    for entry in entries.iter().filter(|e| e.collider.enabled) {
        let color = if entry.collider.is_trigger {
            TRIGGER_COLOR
        } else {
            SOLID_COLOR
        };
        match entry.collider.world_shape(&entry.transform) {
            Some(WorldShape::Box(aabb)) => box_lines(&aabb, color, &mut lines),
            Some(WorldShape::Sphere { center, radius }) => {
                sphere_lines(center, radius, color, &mut lines)
            }
            None => {}
        }
    }
    lines
}

/// The 12 edges of a box, joining corners that differ along a single axis.
pub fn box_lines(aabb: &PhysicsAabb, color: [f32; 4], out: &mut Vec<DebugLine>) {
    let corners = aabb.corners();
    for (i, &start) in corners.iter().enumerate() {
        for axis_bit in [1, 2, 4] {
            if i & axis_bit == 0 {
                out.push(DebugLine {
                    start,
                    end: corners[i | axis_bit],
                    color,
                });
            }
        }
    }
}

/// Three orthogonal circles (XY, XZ, YZ planes) around `center`.
pub fn sphere_lines(center: Vec3, radius: f32, color: [f32; 4], out: &mut Vec<DebugLine>) {
    let planes = [(Vec3::X, Vec3::Y), (Vec3::X, Vec3::Z), (Vec3::Y, Vec3::Z)];
    for (u, v) in planes {
        let point = |k: usize| {
            let angle = TAU * k as f32 / CIRCLE_SEGMENTS as f32;
            center + (u * angle.cos() + v * angle.sin()) * radius
        };
        for k in 0..CIRCLE_SEGMENTS {
            out.push(DebugLine {
                start: point(k),
                end: point(k + 1),
                color,
            });
        }
    }
}

/// Line-list vertex with position and color.
#[cfg(feature = "debug-draw")]
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Flatten segments into a line list: vertices `2i` and `2i + 1` form segment `i`.
#[cfg(feature = "debug-draw")]
pub fn lines_to_vertices(lines: &[DebugLine]) -> Vec<DebugVertex> {
    let mut vertices = Vec::with_capacity(lines.len() * 2);
    for line in lines {
        vertices.push(DebugVertex {
            position: line.start.to_array(),
            color: line.color,
        });
        vertices.push(DebugVertex {
            position: line.end.to_array(),
            color: line.color,
        });
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::{Collider, ColliderShape};
    use crate::ecs::components::transform::Transform;

    #[test]
    fn test_box_has_twelve_unit_edges() {
        let aabb = PhysicsAabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let mut lines = Vec::new();
        box_lines(&aabb, SOLID_COLOR, &mut lines);

        assert_eq!(lines.len(), 12);
        for line in &lines {
            assert!(((line.end - line.start).length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sphere_circles_lie_on_surface() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let mut lines = Vec::new();
        sphere_lines(center, 2.0, SOLID_COLOR, &mut lines);

        assert_eq!(lines.len(), 3 * CIRCLE_SEGMENTS);
        for line in &lines {
            assert!(((line.start - center).length() - 2.0).abs() < 1e-5);
            assert!(((line.end - center).length() - 2.0).abs() < 1e-5);
        }
        // Each circle closes on itself.
        let first = &lines[0];
        let last = &lines[CIRCLE_SEGMENTS - 1];
        assert!((last.end - first.start).length() < 1e-5);
    }

    #[test]
    fn test_collect_skips_disabled_and_inert() {
        let mut world = hecs::World::new();
        world.spawn((Transform::identity(), Collider::cuboid(Vec3::ONE)));
        world.spawn((Transform::identity(), Collider::sphere(1.0).as_trigger()));
        world.spawn((Transform::identity(), Collider::sphere(1.0).disabled()));
        world.spawn((Transform::identity(), Collider::new(ColliderShape::Mesh)));

        let lines = collect_debug_lines(&world);
        assert_eq!(lines.len(), 12 + 3 * CIRCLE_SEGMENTS);
        assert_eq!(
            lines.iter().filter(|l| l.color == TRIGGER_COLOR).count(),
            3 * CIRCLE_SEGMENTS
        );
    }

    #[cfg(feature = "debug-draw")]
    #[test]
    fn test_vertices_cast_to_bytes() {
        let line = DebugLine {
            start: Vec3::ZERO,
            end: Vec3::X,
            color: SOLID_COLOR,
        };
        let vertices = lines_to_vertices(&[line]);
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 2 * 7 * std::mem::size_of::<f32>());
    }
}
