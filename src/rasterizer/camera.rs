//! Camera state and view/model matrix construction
//!
//! Two paths exist: a look-at basis derived from a position/target pair
//! (placement utility), and the Euler-axis fly camera that the render
//! loop actually drives.

use super::math::{Mat4, Vec3};

/// Orthonormal (left, up, forward) frame derived from an eye position and
/// a target point. Recomputed on every retarget, never stored on its own.
#[derive(Debug, Clone, Copy)]
pub struct LookAt {
    pub left: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl LookAt {
    /// Derive the basis from a position/target pair.
    ///
    /// The up vector is re-orthogonalized against forward and left, so the
    /// frame stays orthonormal even with a near-vertical forward. When
    /// forward is exactly parallel to world-up the left vector degenerates
    /// to zero.
    pub fn from_target(position: Vec3, target: Vec3) -> Self {
        let forward = (target - position).normalize();
        let left = Vec3::UP.cross(forward).normalize();
        let up = forward.cross(left).normalize();
        Self { left, up, forward }
    }
}

/// Model-to-world placement matrix: look-at basis as the rotation columns,
/// position as the translation column. Not a view matrix.
pub fn model_matrix(position: Vec3, target: Vec3) -> Mat4 {
    let basis = LookAt::from_target(position, target);

    let mut m = Mat4::identity();
    m.m[0][0] = basis.left.x;
    m.m[1][0] = basis.left.y;
    m.m[2][0] = basis.left.z;
    m.m[0][1] = basis.up.x;
    m.m[1][1] = basis.up.y;
    m.m[2][1] = basis.up.z;
    m.m[0][2] = basis.forward.x;
    m.m[1][2] = basis.forward.y;
    m.m[2][2] = basis.forward.z;
    m.m[0][3] = position.x;
    m.m[1][3] = position.y;
    m.m[2][3] = position.z;
    m
}

/// World-to-view transform for the fly camera: translate by -position,
/// then rotate about Y, X, Z by the negated yaw/pitch/roll angles, in
/// that application order.
pub fn view_matrix(position: Vec3, axis: Vec3) -> Mat4 {
    let mut m = Mat4::identity();
    m = Mat4::translate(-position.x, -position.y, -position.z) * m;
    m = Mat4::rotate(-axis.y, 0.0, 1.0, 0.0) * m;
    m = Mat4::rotate(-axis.x, 1.0, 0.0, 0.0) * m;
    m = Mat4::rotate(-axis.z, 0.0, 0.0, 1.0) * m;
    m
}

/// Camera state: fly-camera pose plus the matrices derived from it.
///
/// `target` feeds only the look-at constructor path; the live render loop
/// moves `position` and `axis` (yaw/pitch/roll in degrees) and rebuilds
/// `view` through [`view_matrix`].
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub axis: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, projection: Mat4) -> Self {
        let mut cam = Self {
            position,
            target,
            axis: Vec3::ZERO,
            view: Mat4::identity(),
            projection,
        };
        cam.retarget(position, target);
        cam
    }

    /// Reposition the camera and rebuild the view matrix from the current
    /// Euler axis
    pub fn retarget(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
        self.view = view_matrix(self.position, self.axis);
    }

    /// Rebuild the view matrix after position or axis changed
    pub fn refresh_view(&mut self) {
        self.view = view_matrix(self.position, self.axis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    #[test]
    fn test_lookat_orthonormal() {
        let basis = LookAt::from_target(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
        assert!((basis.forward.z + 1.0).abs() < EPS);
        assert!((basis.left.len() - 1.0).abs() < EPS);
        assert!((basis.up.len() - 1.0).abs() < EPS);
        assert!(basis.left.dot(basis.up).abs() < EPS);
        assert!(basis.left.dot(basis.forward).abs() < EPS);
        assert!(basis.up.dot(basis.forward).abs() < EPS);
    }

    #[test]
    fn test_lookat_near_vertical_stays_orthonormal() {
        let basis = LookAt::from_target(Vec3::ZERO, Vec3::new(0.01, 10.0, 0.0));
        assert!((basis.left.len() - 1.0).abs() < EPS);
        assert!((basis.up.len() - 1.0).abs() < EPS);
        assert!(basis.up.dot(basis.forward).abs() < EPS);
    }

    #[test]
    fn test_lookat_vertical_degenerates() {
        // Forward parallel to world-up: left collapses to zero
        let basis = LookAt::from_target(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(basis.left, Vec3::ZERO);
    }

    #[test]
    fn test_model_matrix_places_basis_and_position() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(1.0, 2.0, -7.0);
        let basis = LookAt::from_target(position, target);
        let m = model_matrix(position, target);

        assert!((m.m[0][3] - position.x).abs() < EPS);
        assert!((m.m[1][3] - position.y).abs() < EPS);
        assert!((m.m[2][3] - position.z).abs() < EPS);
        assert!((m.m[0][0] - basis.left.x).abs() < EPS);
        assert!((m.m[1][1] - basis.up.y).abs() < EPS);
        assert!((m.m[2][2] - basis.forward.z).abs() < EPS);
    }

    #[test]
    fn test_view_matrix_zero_axis_is_translation() {
        let v = view_matrix(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
        assert_eq!(v, Mat4::translate(0.0, 0.0, -100.0));
    }

    #[test]
    fn test_view_matrix_yaw_faces_minus_x() {
        use crate::rasterizer::math::Vec4;

        // Yaw 90 degrees turns the camera toward -X; a world point on -X
        // ends up straight ahead in view space
        let v = view_matrix(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0));
        let p = v * Vec4::from_point(Vec3::new(-5.0, 0.0, 0.0));
        assert!(p.x.abs() < EPS);
        assert!(p.y.abs() < EPS);
        assert!((p.z + 5.0).abs() < EPS);
    }

    #[test]
    fn test_camera_new_builds_view() {
        let cam = Camera::new(
            Vec3::new(0.0, 0.0, 100.0),
            Vec3::ZERO,
            Mat4::perspective(-0.4, 0.4, -0.3, 0.3, 1.0, 100.0),
        );
        assert_eq!(cam.axis, Vec3::ZERO);
        assert_eq!(cam.view, Mat4::translate(0.0, 0.0, -100.0));
    }
}
