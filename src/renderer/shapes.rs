//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in world coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, b, color),
    ]
}

/// Rotate `point` about `pivot` by `degrees`. Positive angles turn
/// counter-clockwise as seen on screen (y grows downward).
#[inline]
pub fn rotate_about(point: Vec2, pivot: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = point - pivot;
    pivot + Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos)
}

/// Generate vertices for a filled ellipse, rotated about `pivot`
pub fn ellipse(
    center: Vec2,
    radii: Vec2,
    pivot: Vec2,
    degrees: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let c = rotate_about(center, pivot, degrees);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let p1 = center + Vec2::new(radii.x * theta1.cos(), radii.y * theta1.sin());
        let p2 = center + Vec2::new(radii.x * theta2.cos(), radii.y * theta2.sin());
        let p1 = rotate_about(p1, pivot, degrees);
        let p2 = rotate_about(p2, pivot, degrees);

        // Triangle from center to edge
        vertices.push(Vertex::new(c.x, c.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Ellipse inscribed in an axis-aligned box (unrotated)
pub fn ellipse_in(r: &Rect, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let center = r.center();
    ellipse(
        center,
        Vec2::new(r.w / 2.0, r.h / 2.0),
        center,
        0.0,
        color,
        segments,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_is_two_triangles_covering_bounds() {
        let v = rect(&Rect::new(10.0, 20.0, 30.0, 40.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        // Nose pointing right, turned 90 degrees counter-clockwise on screen,
        // points up (negative y)
        let p = rotate_about(Vec2::new(10.0, 0.0), Vec2::ZERO, 90.0);
        assert!((p.x - 0.0).abs() < 1e-5);
        assert!((p.y - -10.0).abs() < 1e-5);
    }

    #[test]
    fn test_ellipse_vertex_count_and_extent() {
        let v = ellipse(Vec2::ZERO, Vec2::new(17.0, 12.0), Vec2::ZERO, 0.0, [1.0; 4], 16);
        assert_eq!(v.len(), 48);
        for vertex in &v {
            assert!(vertex.position[0].abs() <= 17.0 + 1e-4);
            assert!(vertex.position[1].abs() <= 12.0 + 1e-4);
        }
    }
}
