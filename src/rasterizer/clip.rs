//! Homogeneous clipping and the perspective divide
//!
//! The near-plane line clip degenerates segments instead of computing a
//! true plane intersection: a single behind-camera endpoint snaps onto
//! the other endpoint, and a fully behind segment collapses to a fixed
//! clip-space point.

use super::math::{Vec3, Vec4};

/// Perspective divide: clip space to normalized device coordinates
pub fn perspective_divide(p: Vec4) -> Vec3 {
    Vec3 {
        x: p.x / p.w,
        y: p.y / p.w,
        z: p.z / p.w,
    }
}

/// Near-plane clip for a clip-space segment, in place.
///
/// An endpoint with w <= 0 is behind the eye. If only the first endpoint
/// is behind it takes the second endpoint's coordinates (the segment
/// degenerates to a point); if the second is behind as well, both
/// endpoints collapse to (1, 1, 1, 1).
pub fn clip_line_near(p1: &mut Vec4, p2: &mut Vec4) {
    if p1.w <= 0.0 {
        *p1 = *p2;
    }
    if p2.w <= 0.0 {
        *p1 = Vec4::new(1.0, 1.0, 1.0, 1.0);
        *p2 = Vec4::new(1.0, 1.0, 1.0, 1.0);
    }
}

/// Homogeneous clip of `p1` against the |x|,|y|,|z| <= |w| cube.
///
/// When `p1` overshoots the cube, it is stepped back against the
/// normalized p2-p1 direction by the largest per-axis overshoot. Returns
/// `p1` unchanged when it is already inside. Carried alongside the near
/// clip as a utility; the live line path does not call it.
pub fn clip_to_cube(p1: Vec4, p2: Vec4) -> Vec4 {
    let ax = p1.x.abs();
    let ay = p1.y.abs();
    let az = p1.z.abs();
    let aw = p1.w.abs();

    if ax <= aw && ay <= aw && az <= aw {
        return p1;
    }

    let k = ax.max(ay).max(az) - aw;
    let dir = (p2 - p1).normalize();
    p1 - dir.scale(k)
}
