//! Core types for the wireframe renderer

use serde::{Deserialize, Serialize};

use super::math::Vec3;

/// RGB color (0-255 per channel, no alpha)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to [u8; 4] for an RGBA framebuffer (opaque)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// A colored position in world space
#[derive(Debug, Clone, Copy, Default)]
pub struct Point {
    pub position: Vec3,
    pub color: Color,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32, r: u8, g: u8, b: u8) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            color: Color::new(r, g, b),
        }
    }
}

/// A line segment between two colored points.
///
/// The rasterizer draws the whole segment in `point1`'s color;
/// `point2`'s color is carried but unused.
#[derive(Debug, Clone, Copy, Default)]
pub struct Line {
    pub point1: Point,
    pub point2: Point,
}

impl Line {
    pub fn new(point1: Point, point2: Point) -> Self {
        Self { point1, point2 }
    }
}

/// Device rectangle that normalized coordinates map into, in screen pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Map normalized device coordinates to screen pixels.
    ///
    /// Y is flipped to match the top-left screen origin; Z passes through
    /// unchanged.
    pub fn transform(&self, ndc: Vec3) -> Vec3 {
        Vec3 {
            x: (ndc.x + 1.0) * self.w / 2.0 + self.x,
            y: (-ndc.y + 1.0) * self.h / 2.0 + self.y,
            z: ndc.z,
        }
    }

    /// Screen-space bounds test, inclusive on all four edges
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    #[test]
    fn test_viewport_corners() {
        let vp = Viewport::new(0.0, 0.0, 800.0, 600.0);

        // NDC (-1, 1) is the top-left corner, (1, -1) the bottom-right
        let tl = vp.transform(Vec3::new(-1.0, 1.0, 0.0));
        assert!(tl.x.abs() < EPS && tl.y.abs() < EPS);
        let br = vp.transform(Vec3::new(1.0, -1.0, 0.0));
        assert!((br.x - 800.0).abs() < EPS && (br.y - 600.0).abs() < EPS);

        // NDC origin is the viewport center
        let center = vp.transform(Vec3::ZERO);
        assert!((center.x - 400.0).abs() < EPS && (center.y - 300.0).abs() < EPS);
    }

    #[test]
    fn test_viewport_offset_origin() {
        let vp = Viewport::new(100.0, 50.0, 200.0, 100.0);
        let tl = vp.transform(Vec3::new(-1.0, 1.0, 0.5));
        assert!((tl.x - 100.0).abs() < EPS && (tl.y - 50.0).abs() < EPS);
        // Z passes through
        assert!((tl.z - 0.5).abs() < EPS);
    }

    #[test]
    fn test_viewport_contains_inclusive_edges() {
        let vp = Viewport::new(0.0, 0.0, 800.0, 600.0);
        assert!(vp.contains(0.0, 0.0));
        assert!(vp.contains(800.0, 600.0));
        assert!(!vp.contains(-1.0, 0.0));
        assert!(!vp.contains(801.0, 0.0));
    }
}
