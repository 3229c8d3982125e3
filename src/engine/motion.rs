//! Per-frame camera motion integration
//!
//! Logical axes integrate into the camera's Euler angles and position,
//! scaled by the elapsed milliseconds. Pitch and roll clamp at their
//! limits; yaw wraps: any overshoot past +180 snaps to -180 and vice
//! versa (a snap, not a modulo).

use crate::rasterizer::{Camera, Mat4, Vec4};

use super::input::LogicalAxes;

pub const PITCH_LIMIT_DEGREES: f32 = 40.0;
pub const YAW_WRAP_DEGREES: f32 = 180.0;
pub const ROLL_LIMIT_DEGREES: f32 = 10.0;

/// Integrate one frame of motion and rebuild the camera's view matrix.
///
/// `rate` scales both the angular and the linear velocity per elapsed
/// millisecond.
pub fn integrate(camera: &mut Camera, axes: &LogicalAxes, elapsed_ms: u32, rate: f32) {
    let t = elapsed_ms as f32;

    camera.axis.x += axes.pitch * rate * t;
    camera.axis.y += axes.yaw * rate * t;
    camera.axis.z += axes.roll * rate * t;

    if camera.axis.x > PITCH_LIMIT_DEGREES {
        camera.axis.x = PITCH_LIMIT_DEGREES;
    }
    if camera.axis.x < -PITCH_LIMIT_DEGREES {
        camera.axis.x = -PITCH_LIMIT_DEGREES;
    }
    if camera.axis.y > YAW_WRAP_DEGREES {
        camera.axis.y = -YAW_WRAP_DEGREES;
    }
    if camera.axis.y < -YAW_WRAP_DEGREES {
        camera.axis.y = YAW_WRAP_DEGREES;
    }
    if camera.axis.z > ROLL_LIMIT_DEGREES {
        camera.axis.z = ROLL_LIMIT_DEGREES;
    }
    if camera.axis.z < -ROLL_LIMIT_DEGREES {
        camera.axis.z = -ROLL_LIMIT_DEGREES;
    }

    // Movement direction comes from the yaw-only rotation of the fixed
    // forward and left vectors; a zero advance+strafe sum normalizes to
    // the zero vector and the camera stays put
    let rotate = Mat4::rotate(camera.axis.y, 0.0, 1.0, 0.0);
    let forward = (rotate * Vec4::new(0.0, 0.0, -1.0, 0.0)).scale(axes.advance);
    let left = (rotate * Vec4::new(1.0, 0.0, 0.0, 0.0)).scale(axes.strafe);
    let velocity = (forward + left).normalize();

    camera.position.x += velocity.x * rate * t;
    camera.position.y += velocity.y * rate * t;
    camera.position.z += velocity.z * rate * t;

    camera.refresh_view();
}
