//! Engine context: input state, frame timers, camera motion, and the
//! per-frame render pass
//!
//! One `Engine` value is threaded by reference through every stage; no
//! global state. The driver owns the window, the pixel surface, and the
//! clock, and hands them in through narrow interfaces each frame.

mod input;
mod motion;
mod state;

pub use input::*;
pub use motion::*;
pub use state::*;

use crate::config::EngineConfig;
use crate::rasterizer::{
    Camera, Color, Line, Mat4, Point, RenderDevice, SurfaceSink, TextSink, Vec3, Viewport,
};

/// Physical key flags plus the logical axes derived from them
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineInputs {
    pub physicals: PhysicalKeys,
    pub logicals: LogicalAxes,
}

/// The whole engine: run status, inputs, timers, camera, device state,
/// and the fixed demo scene (a unit quad outline and three axis
/// segments around a reference grid)
pub struct Engine {
    pub status: EngineStatus,
    pub inputs: EngineInputs,
    pub timers: Timers,
    pub camera: Camera,
    pub device: RenderDevice,
    pub points: [Point; 4],
    pub axes: [Line; 3],
    grid_extent: Vec3,
    grid_unit: f32,
    move_rate: f32,
}

impl Engine {
    pub fn new(config: &EngineConfig, now_ms: u32) -> Self {
        let f = &config.frustum;
        let projection = Mat4::perspective(f.left, f.right, f.bottom, f.top, f.near, f.far);
        let camera = Camera::new(config.camera_position, config.camera_target, projection);

        let viewport = Viewport::new(
            0.0,
            0.0,
            config.window_width as f32,
            config.window_height as f32,
        );

        let points = [
            Point::new(0.5, -0.5, 0.0, 255, 255, 255),
            Point::new(0.5, 0.5, 0.0, 255, 255, 255),
            Point::new(-0.5, 0.5, 0.0, 255, 255, 255),
            Point::new(-0.5, -0.5, 0.0, 255, 255, 255),
        ];

        // x=blue, y=green, z=red
        let axes = [
            Line::new(Point::new(0.0, 0.0, 0.0, 0, 0, 255), Point::new(10.0, 0.0, 0.0, 0, 0, 255)),
            Line::new(Point::new(0.0, 0.0, 0.0, 0, 255, 0), Point::new(0.0, 10.0, 0.0, 0, 255, 0)),
            Line::new(Point::new(0.0, 0.0, 0.0, 255, 0, 0), Point::new(0.0, 0.0, 10.0, 255, 0, 0)),
        ];

        Self {
            status: EngineStatus::Started,
            inputs: EngineInputs::default(),
            timers: Timers::new(now_ms),
            camera,
            device: RenderDevice::new(viewport),
            points,
            axes,
            grid_extent: config.grid_extent,
            grid_unit: config.grid_unit,
            move_rate: config.move_rate,
        }
    }

    /// Consume this frame's input events and rebuild the logical axes
    /// from the held key set
    pub fn poll_inputs(&mut self, events: &[KeyEvent]) {
        for event in events {
            match event {
                KeyEvent::Down(key) => self.inputs.physicals.set(*key, true),
                KeyEvent::Up(key) => self.inputs.physicals.set(*key, false),
                KeyEvent::Quit => self.status = EngineStatus::Stopped,
            }
        }
        self.inputs.logicals = LogicalAxes::from_keys(&self.inputs.physicals);
    }

    /// Consume one monotonic clock reading
    pub fn update_timers(&mut self, now_ms: u32) {
        self.timers.tick(now_ms);
    }

    /// Integrate camera motion for the elapsed frame time
    pub fn integrate_motion(&mut self) {
        motion::integrate(
            &mut self.camera,
            &self.inputs.logicals,
            self.timers.elapsed,
            self.move_rate,
        );
    }

    /// Render one frame into the surface sink.
    ///
    /// All pixel writes happen inside a single begin/end bracket; a
    /// failed `begin` aborts (and skips) the frame. The device matrices
    /// are snapshotted from the camera before any drawing.
    pub fn render(
        &mut self,
        surface: &mut impl SurfaceSink,
        text: &mut impl TextSink,
    ) -> Result<(), String> {
        surface.begin()?;
        surface.clear(Color::BLACK);

        self.device.snapshot(&self.camera);

        self.device
            .draw_grid(surface, text, self.grid_extent, self.grid_unit);

        for axis in &self.axes {
            self.device.draw_line(surface, text, *axis, false);
        }

        // The quad renders as five segments: the outline plus a diagonal
        let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 0)];
        for (a, b) in edges {
            let line = Line::new(self.points[a], self.points[b]);
            self.device.draw_line(surface, text, line, false);
        }

        text.blit_text(
            &format!("FPS : {}", self.timers.fps),
            0.0,
            self.device.viewport.h - 20.0,
            Color::WHITE,
        );

        surface.end();
        surface.present();
        Ok(())
    }

    /// One full loop iteration: inputs, timers, motion, render
    pub fn frame(
        &mut self,
        events: &[KeyEvent],
        now_ms: u32,
        surface: &mut impl SurfaceSink,
        text: &mut impl TextSink,
    ) -> Result<(), String> {
        self.poll_inputs(events);
        self.update_timers(now_ms);
        self.integrate_motion();
        self.render(surface, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Framebuffer;

    struct RecordingText {
        lines: Vec<String>,
    }

    impl TextSink for RecordingText {
        fn blit_text(&mut self, text: &str, _x: f32, _y: f32, _color: Color) {
            self.lines.push(text.to_string());
        }
    }

    struct LockedSurface;

    impl SurfaceSink for LockedSurface {
        fn begin(&mut self) -> Result<(), String> {
            Err("surface is locked".to_string())
        }
        fn clear(&mut self, _color: Color) {
            panic!("cleared a surface that failed to lock");
        }
        fn put_pixel(&mut self, _x: usize, _y: usize, _color: Color) {
            panic!("wrote to a surface that failed to lock");
        }
        fn end(&mut self) {}
        fn present(&mut self) {}
    }

    fn test_engine() -> Engine {
        Engine::new(&EngineConfig::default(), 0)
    }

    #[test]
    fn test_starts_started() {
        let engine = test_engine();
        assert_eq!(engine.status, EngineStatus::Started);
    }

    #[test]
    fn test_quit_event_stops() {
        let mut engine = test_engine();
        engine.poll_inputs(&[KeyEvent::Quit]);
        assert_eq!(engine.status, EngineStatus::Stopped);
    }

    #[test]
    fn test_poll_rebuilds_axes_from_held_keys() {
        let mut engine = test_engine();
        engine.poll_inputs(&[KeyEvent::Down(Key::Up), KeyEvent::Down(Key::A)]);
        assert_eq!(engine.inputs.logicals.advance, 1.0);
        assert_eq!(engine.inputs.logicals.yaw, 1.0);

        engine.poll_inputs(&[KeyEvent::Up(Key::A)]);
        assert_eq!(engine.inputs.logicals.yaw, 0.0);
        // Still-held key keeps asserting its axis
        assert_eq!(engine.inputs.logicals.advance, 1.0);
    }

    #[test]
    fn test_motion_moves_camera_and_view() {
        let mut engine = test_engine();
        engine.poll_inputs(&[KeyEvent::Down(Key::Up)]);
        engine.update_timers(20);
        engine.integrate_motion();

        // One unit forward along -Z from (0,0,100)
        assert!((engine.camera.position.z - 99.0).abs() < 0.0001);
        assert_eq!(
            engine.camera.view,
            crate::rasterizer::view_matrix(engine.camera.position, engine.camera.axis)
        );
    }

    #[test]
    fn test_render_pass_draws_scene_and_fps() {
        let mut engine = test_engine();
        let mut fb = Framebuffer::new(800, 600);
        let mut text = RecordingText { lines: Vec::new() };

        engine.render(&mut fb, &mut text).unwrap();

        // The scene leaves non-black pixels behind
        let lit = fb
            .pixels
            .chunks_exact(4)
            .filter(|p| p[0] != 0 || p[1] != 0 || p[2] != 0)
            .count();
        assert!(lit > 0);
        assert!(text.lines.iter().any(|l| l.starts_with("FPS :")));
    }

    #[test]
    fn test_failed_lock_skips_frame() {
        let mut engine = test_engine();
        let mut text = RecordingText { lines: Vec::new() };
        let result = engine.render(&mut LockedSurface, &mut text);
        assert!(result.is_err());
        // Engine keeps running; the frame is simply skipped
        assert_eq!(engine.status, EngineStatus::Started);
    }

    #[test]
    fn test_frame_runs_full_iteration() {
        let mut engine = test_engine();
        let mut fb = Framebuffer::new(800, 600);
        let mut text = RecordingText { lines: Vec::new() };

        engine
            .frame(&[KeyEvent::Down(Key::Up)], 16, &mut fb, &mut text)
            .unwrap();
        assert!(engine.camera.position.z < 100.0);
        assert_eq!(engine.timers.elapsed, 16);
    }
}
