//! Core drawing functions
//!
//! Points and line segments go through view and projection transforms,
//! the near-plane clip, the perspective divide, and the viewport mapping,
//! then land as pixel writes in a [`SurfaceSink`]. Lines use a
//! slope-driven walk along the dominant axis with a fixed step of one
//! device unit (not Bresenham; diagonals near 45 degrees may over- or
//! under-sample by a pixel).

use super::camera::Camera;
use super::clip::{clip_line_near, perspective_divide};
use super::math::{Mat4, Vec3, Vec4};
use super::types::{Color, Line, Point, Viewport};

/// Pixel-writable surface owned by the driver.
///
/// `begin`/`end` bracket one batch of writes; `begin` is the only
/// fallible step of a render pass. `present` flushes the written region
/// to the screen.
pub trait SurfaceSink {
    fn begin(&mut self) -> Result<(), String>;
    fn clear(&mut self, color: Color);
    fn put_pixel(&mut self, x: usize, y: usize, color: Color);
    fn end(&mut self);
    fn present(&mut self);
}

/// Text-blit capability for short debug strings at a pixel position
pub trait TextSink {
    fn blit_text(&mut self, text: &str, x: f32, y: f32, color: Color);
}

/// Framebuffer for software rendering (RGBA, 4 bytes per pixel)
pub struct Framebuffer {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let bytes = color.to_bytes();
            self.pixels[idx..idx + 4].copy_from_slice(&bytes);
        }
    }

    /// Read back one pixel; out-of-range reads come back black
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
        } else {
            Color::BLACK
        }
    }
}

impl SurfaceSink for Framebuffer {
    fn begin(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&bytes);
        }
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.set_pixel(x, y, color);
    }

    fn end(&mut self) {}

    // The owner of the buffer uploads it to the screen
    fn present(&mut self) {}
}

/// The matrices and viewport a render pass actually uses, snapshotted
/// from the camera once per frame
#[derive(Debug, Clone, Copy)]
pub struct RenderDevice {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Viewport,
}

impl RenderDevice {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            viewport,
        }
    }

    /// Capture the camera's current matrices for this frame
    pub fn snapshot(&mut self, camera: &Camera) {
        self.view = camera.view;
        self.projection = camera.projection;
    }

    /// Write one pixel at an integer-truncated screen position.
    /// Positions outside the viewport rectangle are silently dropped.
    pub fn draw_pixel(&self, surface: &mut impl SurfaceSink, position: Vec3, color: Color) {
        if !self.viewport.contains(position.x, position.y) {
            return;
        }
        surface.put_pixel(position.x as usize, position.y as usize, color);
    }

    /// Transform, cull against the [-1,1] NDC cube, viewport-map, plot
    pub fn draw_point(&self, surface: &mut impl SurfaceSink, point: Point) {
        let clip = self.projection * (self.view * Vec4::from_point(point.position));
        let ndc = perspective_divide(clip);

        if ndc.x >= -1.0
            && ndc.x <= 1.0
            && ndc.y >= -1.0
            && ndc.y <= 1.0
            && ndc.z >= -1.0
            && ndc.z <= 1.0
        {
            let screen = self.viewport.transform(ndc);
            self.draw_pixel(surface, screen, point.color);
        }
    }

    /// Rasterize a segment in point1's color.
    ///
    /// Line endpoints get the near-plane clip but, unlike single points,
    /// no cull against the NDC cube; the walk below is bounded by the
    /// viewport instead. With `debug` set, the per-stage coordinates of
    /// both endpoints go through the text sink.
    pub fn draw_line(
        &self,
        surface: &mut impl SurfaceSink,
        text: &mut impl TextSink,
        line: Line,
        debug: bool,
    ) {
        let mut clip1 = Vec4::from_point(line.point1.position);
        let mut clip2 = Vec4::from_point(line.point2.position);

        if debug {
            debug_row(text, "P1(x, y, z)", &[clip1.x, clip1.y, clip1.z], 0.0);
            debug_row(text, "P2(x, y, z)", &[clip2.x, clip2.y, clip2.z], 80.0);
        }

        clip1 = self.projection * (self.view * clip1);
        clip2 = self.projection * (self.view * clip2);

        if debug {
            debug_row(text, "Clip (x, y, z, w)", &[clip1.x, clip1.y, clip1.z, clip1.w], 16.0);
            debug_row(text, "Clip (x, y, z, w)", &[clip2.x, clip2.y, clip2.z, clip2.w], 96.0);
        }

        clip_line_near(&mut clip1, &mut clip2);

        let ndc1 = perspective_divide(clip1);
        let ndc2 = perspective_divide(clip2);

        if debug {
            debug_row(text, "NDC (x, y, z)", &[ndc1.x, ndc1.y, ndc1.z], 32.0);
            debug_row(text, "NDC (x, y, z)", &[ndc2.x, ndc2.y, ndc2.z], 112.0);
        }

        let s1 = self.viewport.transform(ndc1);
        let s2 = self.viewport.transform(ndc2);

        if debug {
            debug_row(text, "Screen (x, y, z)", &[s1.x, s1.y, s1.z], 48.0);
            debug_row(text, "Screen (x, y, z)", &[s2.x, s2.y, s2.z], 128.0);
        }

        let color = line.point1.color;
        let dx = s2.x - s1.x;
        let dy = s2.y - s1.y;

        if dx == 0.0 && dy == 0.0 {
            self.draw_pixel(surface, s1, color);
            return;
        }

        if dx.abs() >= dy.abs() {
            let (mut xmin, mut xmax) = if s1.x < s2.x { (s1.x, s2.x) } else { (s2.x, s1.x) };
            xmin = xmin.max(self.viewport.x);
            xmax = xmax.min(self.viewport.x + self.viewport.w);

            let slope = dy / dx;
            let mut x = xmin;
            while x <= xmax {
                let y = s1.y + (x - s1.x) * slope;
                self.draw_pixel(surface, Vec3::new(x, y, s1.z), color);
                x += 1.0;
            }
        } else {
            let (mut ymin, mut ymax) = if s1.y < s2.y { (s1.y, s2.y) } else { (s2.y, s1.y) };
            ymin = ymin.max(self.viewport.y);
            ymax = ymax.min(self.viewport.y + self.viewport.h);

            let slope = dx / dy;
            let mut y = ymin;
            while y <= ymax {
                let x = s1.x + (y - s1.y) * slope;
                self.draw_pixel(surface, Vec3::new(x, y, s1.z), color);
                y += 1.0;
            }
        }
    }

    /// Decorative reference grid: line spans along Z for every (x, y)
    /// lattice position, spans along X for every (y, z), plus one gray
    /// reference segment drawn with the debug readout on
    pub fn draw_grid(
        &self,
        surface: &mut impl SurfaceSink,
        text: &mut impl TextSink,
        extent: Vec3,
        unit: f32,
    ) {
        let reference = Line::new(
            Point::new(-20.0, 0.0, 0.0, 80, 80, 80),
            Point::new(20.0, 0.0, 0.0, 80, 80, 80),
        );
        self.draw_line(surface, text, reference, true);

        let mut i = -extent.x;
        while i <= extent.x {
            let mut j = -extent.y;
            while j <= extent.y {
                let line = Line::new(
                    Point::new(i, j, -extent.z, 80, 20, 0),
                    Point::new(i, j, extent.z, 80, 20, 0),
                );
                self.draw_line(surface, text, line, false);
                j += unit;
            }
            i += unit;
        }

        let mut i = -extent.y;
        while i <= extent.y {
            let mut j = -extent.z;
            while j <= extent.z {
                let line = Line::new(
                    Point::new(-extent.x, i, j, 80, 20, 0),
                    Point::new(extent.x, i, j, 80, 20, 0),
                );
                self.draw_line(surface, text, line, false);
                j += unit;
            }
            i += unit;
        }
    }
}

/// Blit one labeled row of float values through the text sink
fn debug_row(text: &mut impl TextSink, label: &str, values: &[f32], y: f32) {
    text.blit_text(label, 0.0, y, Color::WHITE);
    for (i, value) in values.iter().enumerate() {
        text.blit_text(&format!("{:.6}", value), 200.0 + 100.0 * i as f32, y, Color::WHITE);
    }
}

/// Blit a matrix as a 4x4 grid of text cells at a pixel position
pub fn draw_matrix(text: &mut impl TextSink, matrix: Mat4, position: Vec3, color: Color) {
    const HSPACE: f32 = 80.0;
    const VSPACE: f32 = 16.0;

    for (row, cells) in matrix.m.iter().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            text.blit_text(
                &format!("{:.6}", value),
                position.x + HSPACE * col as f32,
                position.y + VSPACE * row as f32,
                color,
            );
        }
    }
}
