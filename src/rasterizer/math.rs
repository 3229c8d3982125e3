//! Vector and matrix math for the wireframe pipeline
//!
//! Plain value types: every operation returns a new value. Matrices are
//! row-major with translation in the fourth column.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero if the input has zero length
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

/// 4D Vector (homogeneous coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Promote a position to homogeneous coordinates (w = 1)
    pub fn from_point(p: Vec3) -> Self {
        Self { x: p.x, y: p.y, z: p.z, w: 1.0 }
    }

    pub fn dot(self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero if the input has zero length
    pub fn normalize(self) -> Vec4 {
        let l = self.len();
        if l == 0.0 {
            return Vec4::ZERO;
        }
        Vec4 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
            w: self.w / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec4 {
        Vec4 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w,
        }
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, s: f32) -> Vec4 {
        self.scale(s)
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}, {:.6}, {:.6}, {:.6})",
            self.x, self.y, self.z, self.w
        )
    }
}

/// 4x4 matrix, row-major: `m[row][col]`, translation in column 3
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation of `angle_degrees` about the axis (x, y, z).
    ///
    /// The axis components are used as-is in the Rodrigues expansion, so
    /// the caller must pass a unit axis; a non-unit axis produces a
    /// sheared transform instead of a pure rotation.
    pub fn rotate(angle_degrees: f32, x: f32, y: f32, z: f32) -> Self {
        let a = deg_to_rad(angle_degrees);
        let cosa = a.cos();
        let sina = a.sin();
        let (xx, xy, xz) = (x * x, x * y, x * z);
        let (yy, yz, zz) = (y * y, y * z, z * z);

        Self {
            m: [
                [
                    xx * (1.0 - cosa) + cosa,
                    xy * (1.0 - cosa) - sina * z,
                    xz * (1.0 - cosa) + sina * y,
                    0.0,
                ],
                [
                    xy * (1.0 - cosa) + sina * z,
                    yy * (1.0 - cosa) + cosa,
                    yz * (1.0 - cosa) - sina * x,
                    0.0,
                ],
                [
                    xz * (1.0 - cosa) - sina * y,
                    yz * (1.0 - cosa) + sina * x,
                    zz * (1.0 - cosa) + cosa,
                    0.0,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.m[0][0] = x;
        m.m[1][1] = y;
        m.m[2][2] = z;
        m
    }

    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.m[0][3] = x;
        m.m[1][3] = y;
        m.m[2][3] = z;
        m
    }

    pub fn transpose(self) -> Self {
        let mut t = Self::identity();
        for row in 0..4 {
            for col in 0..4 {
                t.m[col][row] = self.m[row][col];
            }
        }
        t
    }

    /// Right-handed perspective frustum mapping into the [-1,1] clip cube,
    /// with clip-space w = -z
    pub fn perspective(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Self {
        let mut m = Self::identity();
        m.m[0][0] = 2.0 * n / (r - l);
        m.m[0][2] = (r + l) / (r - l);
        m.m[1][1] = 2.0 * n / (t - b);
        m.m[1][2] = (t + b) / (t - b);
        m.m[2][2] = -(f + n) / (f - n);
        m.m[2][3] = -(2.0 * f * n) / (f - n);
        m.m[3][2] = -1.0;
        m.m[3][3] = 0.0;
        m
    }

    /// Right-handed orthographic box mapping into the [-1,1] clip cube
    pub fn orthographic(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Self {
        let mut m = Self::identity();
        m.m[0][0] = 2.0 / (r - l);
        m.m[0][3] = -(r + l) / (r - l);
        m.m[1][1] = 2.0 / (t - b);
        m.m[1][3] = -(t + b) / (t - b);
        m.m[2][2] = -2.0 / (f - n);
        m.m[2][3] = -(f + n) / (f - n);
        m
    }
}

/// Row-times-column composition: in `m1 * m2` the right operand is the
/// transform applied first when the product later multiplies a column
/// vector, so composites are built in reverse application order.
impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let mut out = Mat4::identity();
        for row in 0..4 {
            for col in 0..4 {
                out.m[row][col] = (0..4).map(|k| self.m[row][k] * other.m[k][col]).sum();
            }
        }
        out
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        let r = &self.m;
        Vec4 {
            x: r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z + r[0][3] * v.w,
            y: r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z + r[1][3] * v.w,
            z: r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z + r[2][3] * v.w,
            w: r[3][0] * v.x + r[3][1] * v.y + r[3][2] * v.z + r[3][3] * v.w,
        }
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.m {
            writeln!(
                f,
                "{:.6}\t{:.6}\t{:.6}\t{:.6}",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < EPS);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        assert!((v.normalize().len() - 1.0).abs() < EPS);
        let v = Vec4::new(1.0, 2.0, -2.0, 4.0);
        assert!((v.normalize().len() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_eq!(Vec4::ZERO.normalize(), Vec4::ZERO);
    }

    #[test]
    fn test_identity_mul() {
        let m = Mat4::rotate(37.0, 0.0, 1.0, 0.0) * Mat4::translate(1.0, 2.0, 3.0);
        assert_eq!(Mat4::identity() * m, m);
        assert_eq!(m * Mat4::identity(), m);
    }

    #[test]
    fn test_transpose_twice() {
        let m = Mat4::perspective(-0.4, 0.4, -0.3, 0.3, 1.0, 100.0);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        // +X rotated 90 degrees about +Y lands on -Z
        let m = Mat4::rotate(90.0, 0.0, 1.0, 0.0);
        let v = m * Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert!(v.x.abs() < EPS);
        assert!(v.y.abs() < EPS);
        assert!((v.z + 1.0).abs() < EPS);
    }

    #[test]
    fn test_scale_point() {
        let m = Mat4::scale(2.0, 3.0, 4.0);
        let v = m * Vec4::from_point(Vec3::new(1.0, 1.0, 1.0));
        assert!((v.x - 2.0).abs() < EPS);
        assert!((v.y - 3.0).abs() < EPS);
        assert!((v.z - 4.0).abs() < EPS);
    }

    #[test]
    fn test_translate_point() {
        let m = Mat4::translate(5.0, -3.0, 2.0);
        let v = m * Vec4::from_point(Vec3::new(1.0, 1.0, 1.0));
        assert!((v.x - 6.0).abs() < EPS);
        assert!((v.y + 2.0).abs() < EPS);
        assert!((v.z - 3.0).abs() < EPS);
        assert!((v.w - 1.0).abs() < EPS);
    }

    #[test]
    fn test_perspective_near_far_planes() {
        let m = Mat4::perspective(-0.4, 0.4, -0.3, 0.3, 1.0, 100.0);
        // A point on the near plane maps to z/w = -1, on the far plane to +1
        let near = m * Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert!((near.z / near.w + 1.0).abs() < EPS);
        let far = m * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < EPS);
        // w carries -z
        assert!((near.w - 1.0).abs() < EPS);
        assert!((far.w - 100.0).abs() < EPS);
    }

    #[test]
    fn test_orthographic_corners() {
        let m = Mat4::orthographic(-0.8, 0.8, -0.6, 0.6, 1.0, 100.0);
        let v = m * Vec4::new(0.8, 0.6, -1.0, 1.0);
        assert!((v.x - 1.0).abs() < EPS);
        assert!((v.y - 1.0).abs() < EPS);
        assert!((v.z + 1.0).abs() < EPS);
    }
}
