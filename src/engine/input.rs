//! Physical key states and the logical axes derived from them
//!
//! Mapping is level-triggered: the logical axes are zeroed and rebuilt
//! from the currently-held key set on every polling pass, so holding a
//! key keeps re-asserting its axis each tick.

/// The fixed set of keys the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    W,
    S,
    Q,
    E,
}

/// One discrete input event from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
    /// Escape or a window-close request
    Quit,
}

/// Held/released state per physical key
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub a: bool,
    pub d: bool,
    pub w: bool,
    pub s: bool,
    pub q: bool,
    pub e: bool,
}

impl PhysicalKeys {
    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::A => self.a = held,
            Key::D => self.d = held,
            Key::W => self.w = held,
            Key::S => self.s = held,
            Key::Q => self.q = held,
            Key::E => self.e = held,
        }
    }
}

/// Continuous per-frame movement/rotation quantities
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicalAxes {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub advance: f32,
    pub strafe: f32,
}

impl LogicalAxes {
    /// Rebuild all axes from the held key set
    pub fn from_keys(keys: &PhysicalKeys) -> Self {
        let mut axes = Self::default();

        if keys.left {
            axes.strafe -= 1.0;
        }
        if keys.right {
            axes.strafe += 1.0;
        }
        if keys.up {
            axes.advance += 1.0;
        }
        if keys.down {
            axes.advance -= 1.0;
        }
        if keys.a {
            axes.yaw += 1.0;
        }
        if keys.d {
            axes.yaw -= 1.0;
        }
        if keys.w {
            axes.pitch += 1.0;
        }
        if keys.s {
            axes.pitch -= 1.0;
        }
        if keys.q {
            axes.roll += 1.0;
        }
        if keys.e {
            axes.roll -= 1.0;
        }

        axes
    }
}
