//! Chicory Engine: wireframe software 3D renderer
//!
//! A fly-camera scene of colored points and line segments, transformed
//! and rasterized entirely in software:
//! - Hand-rolled model/view/projection math
//! - Near-plane line clipping, slope-DDA rasterization
//! - Level-triggered key mapping onto yaw/pitch/roll/advance/strafe
//!
//! macroquad owns the window, the key events, and the clock; the engine
//! core only ever sees a pixel sink, a text sink, and a millisecond tick.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod engine;
mod rasterizer;

use macroquad::prelude::*;

use config::{load_config, ConfigError, EngineConfig};
use engine::{Engine, EngineStatus, Key, KeyEvent};
use rasterizer::{Color as RasterColor, Framebuffer, TextSink};

const CONFIG_PATH: &str = "chicory.ron";

fn window_conf() -> Conf {
    let config = load_config(CONFIG_PATH).unwrap_or_default();
    Conf {
        window_title: format!("Chicory Engine v{}", VERSION),
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Debug text queued during the render pass, drawn on top of the blitted
/// framebuffer at the end of the frame
struct OverlayText {
    queued: Vec<(String, f32, f32, RasterColor)>,
}

impl TextSink for OverlayText {
    fn blit_text(&mut self, text: &str, x: f32, y: f32, color: RasterColor) {
        self.queued.push((text.to_string(), x, y, color));
    }
}

const KEY_MAP: [(KeyCode, Key); 10] = [
    (KeyCode::Left, Key::Left),
    (KeyCode::Right, Key::Right),
    (KeyCode::Up, Key::Up),
    (KeyCode::Down, Key::Down),
    (KeyCode::A, Key::A),
    (KeyCode::D, Key::D),
    (KeyCode::W, Key::W),
    (KeyCode::S, Key::S),
    (KeyCode::Q, Key::Q),
    (KeyCode::E, Key::E),
];

/// Translate macroquad key edges into engine events
fn collect_events() -> Vec<KeyEvent> {
    let mut events = Vec::new();

    if is_key_pressed(KeyCode::Escape) || is_quit_requested() {
        events.push(KeyEvent::Quit);
    }
    for (code, key) in KEY_MAP {
        if is_key_pressed(code) {
            events.push(KeyEvent::Down(key));
        }
        if is_key_released(code) {
            events.push(KeyEvent::Up(key));
        }
    }

    events
}

fn now_ms() -> u32 {
    (get_time() * 1000.0) as u32
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = match load_config(CONFIG_PATH) {
        Ok(config) => config,
        Err(ConfigError::IoError(_)) => EngineConfig::default(),
        Err(e) => {
            eprintln!("Failed to read {}: {} (using defaults)", CONFIG_PATH, e);
            EngineConfig::default()
        }
    };

    println!("=== Chicory Engine v{} ===", VERSION);

    // Handle window close ourselves so the loop winds down like Escape
    prevent_quit();

    let mut fb = Framebuffer::new(config.window_width, config.window_height);
    let mut overlay = OverlayText { queued: Vec::new() };
    let mut engine = Engine::new(&config, now_ms());

    while engine.status == EngineStatus::Started {
        let events = collect_events();
        if let Err(e) = engine.frame(&events, now_ms(), &mut fb, &mut overlay) {
            eprintln!("Render pass skipped: {}", e);
        }

        // Convert framebuffer to texture and stretch it over the window
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        // Debug text goes on top, scaled with the window
        let scale_x = screen_width() / fb.width as f32;
        let scale_y = screen_height() / fb.height as f32;
        for (text, x, y, color) in overlay.queued.drain(..) {
            draw_text(
                &text,
                x * scale_x,
                y * scale_y + 14.0,
                14.0,
                Color::from_rgba(color.r, color.g, color.b, 255),
            );
        }

        next_frame().await;
    }

    println!("Engine stopped");
}
