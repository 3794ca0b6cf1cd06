//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in pixel space (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle. Empty for non-positive sizes.
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(min, size, color, color)
}

/// Rectangle blending from `top` to `bottom` color
pub fn gradient_rect(min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let max = min + size;

    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Fan-triangulate a polygon from its first point (fine for the star-shaped
/// outlines used here)
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let anchor = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(anchor.x, anchor.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_covers_bounds() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), C);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_degenerate_rect_is_empty() {
        assert!(rect(Vec2::ZERO, Vec2::new(0.0, 10.0), C).is_empty());
        assert!(rect(Vec2::ZERO, Vec2::new(10.0, -1.0), C).is_empty());
    }

    #[test]
    fn test_gradient_colors_by_edge() {
        let top = [1.0, 1.0, 1.0, 1.0];
        let bottom = [0.0, 0.0, 0.0, 1.0];
        for v in gradient_rect(Vec2::ZERO, Vec2::new(5.0, 5.0), top, bottom) {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(50.0, 50.0);
        let v = circle(center, 10.0, C, 16);
        assert_eq!(v.len(), 48);
        for v in v {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_polygon_fan() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(polygon(&pts, C).len(), 6);
        assert!(polygon(&pts[..2], C).is_empty());
    }
}
