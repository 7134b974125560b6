//! In general, transformations make it possible to work in the most
//! convenient coordinate space. The many suns are generated around the
//! +X axis and moved to the sun position afterwards.
//!
//! ## 4 x 4 Matrices
//!
//! The **Matrix4x4** structure provides a low-level representation of
//! 4 x 4 matrices. It is an integral part of the **Transform** class.
//!
//! ## X, Y, And Z Axis Rotations
//!
//! Rotations follow the right-hand rule, the same convention the
//! Radiance `xform` command uses for `-ry` and `-rz`. Angles
//! are given in degrees.

// std
use std::ops::Mul;
// manysuns
use crate::core::geometry::{Point3f, Vector3f};
use crate::core::manysuns::radians;
use crate::core::manysuns::Float;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4x4 {
    pub m: [[Float; 4]; 4],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Matrix4x4 {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }
}

impl Matrix4x4 {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        t00: Float,
        t01: Float,
        t02: Float,
        t03: Float,
        t10: Float,
        t11: Float,
        t12: Float,
        t13: Float,
        t20: Float,
        t21: Float,
        t22: Float,
        t23: Float,
        t30: Float,
        t31: Float,
        t32: Float,
        t33: Float,
    ) -> Self {
        Matrix4x4 {
            m: [
                [t00, t01, t02, t03],
                [t10, t11, t12, t13],
                [t20, t21, t22, t23],
                [t30, t31, t32, t33],
            ],
        }
    }
}

/// Finally, we provide a function that multiplies two matrices
/// together.
pub fn mtx_mul(m1: &Matrix4x4, m2: &Matrix4x4) -> Matrix4x4 {
    let mut r: Matrix4x4 = Matrix4x4::default();
    for i in 0..4 {
        for j in 0..4 {
            r.m[i][j] = m1.m[i][0] * m2.m[0][j]
                + m1.m[i][1] * m2.m[1][j]
                + m1.m[i][2] * m2.m[2][j]
                + m1.m[i][3] * m2.m[3][j];
        }
    }
    r
}

/// Rigid transformations only.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Transform {
    pub m: Matrix4x4,
}

impl Transform {
    pub fn rotate_y(theta: Float) -> Transform {
        let sin_theta: Float = radians(theta).sin();
        let cos_theta: Float = radians(theta).cos();
        let m = Matrix4x4::new(
            cos_theta, 0.0, sin_theta, 0.0, 0.0, 1.0, 0.0, 0.0, -sin_theta, 0.0, cos_theta, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Transform { m }
    }
    pub fn rotate_z(theta: Float) -> Transform {
        let sin_theta: Float = radians(theta).sin();
        let cos_theta: Float = radians(theta).cos();
        let m = Matrix4x4::new(
            cos_theta, -sin_theta, 0.0, 0.0, sin_theta, cos_theta, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Transform { m }
    }
    /// Rotation about Y by `ry` degrees followed by rotation about Z
    /// by `rz` degrees, i.e. `xform -ry ry -rz rz`.
    pub fn rotate_y_then_z(ry: Float, rz: Float) -> Transform {
        Transform::rotate_z(rz) * Transform::rotate_y(ry)
    }
    pub fn transform_point(&self, p: &Point3f) -> Point3f {
        let x: Float = p.x;
        let y: Float = p.y;
        let z: Float = p.z;
        let xp: Float = self.m.m[0][0] * x + self.m.m[0][1] * y + self.m.m[0][2] * z + self.m.m[0][3];
        let yp: Float = self.m.m[1][0] * x + self.m.m[1][1] * y + self.m.m[1][2] * z + self.m.m[1][3];
        let zp: Float = self.m.m[2][0] * x + self.m.m[2][1] * y + self.m.m[2][2] * z + self.m.m[2][3];
        let wp: Float = self.m.m[3][0] * x + self.m.m[3][1] * y + self.m.m[3][2] * z + self.m.m[3][3];
        if wp == 1.0 as Float {
            Point3f {
                x: xp,
                y: yp,
                z: zp,
            }
        } else {
            let inv: Float = 1.0 as Float / wp;
            Point3f {
                x: inv * xp,
                y: inv * yp,
                z: inv * zp,
            }
        }
    }
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        let x: Float = v.x;
        let y: Float = v.y;
        let z: Float = v.z;
        Vector3f {
            x: self.m.m[0][0] * x + self.m.m[0][1] * y + self.m.m[0][2] * z,
            y: self.m.m[1][0] * x + self.m.m[1][1] * y + self.m.m[1][2] * z,
            z: self.m.m[2][0] * x + self.m.m[2][1] * y + self.m.m[2][2] * z,
        }
    }
}

impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            m: mtx_mul(&self.m, &rhs.m),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_vec_eq(a: &Vector3f, b: &Vector3f) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn rotate_y_lifts_x_axis_for_negative_angles() {
        let t = Transform::rotate_y(-30.0);
        let v = t.transform_vector(&Vector3f::new(1.0, 0.0, 0.0));
        assert_vec_eq(&v, &Vector3f::new(0.75_f64.sqrt(), 0.0, 0.5));
    }

    #[test]
    fn rotate_z_is_counter_clockwise() {
        let t = Transform::rotate_z(90.0);
        let v = t.transform_vector(&Vector3f::new(1.0, 0.0, 0.0));
        assert_vec_eq(&v, &Vector3f::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn composed_rotation_applies_y_first() {
        let t = Transform::rotate_y_then_z(-90.0, 90.0);
        // +X goes up to +Z first, the Z rotation leaves it there
        let v = t.transform_vector(&Vector3f::new(1.0, 0.0, 0.0));
        assert_vec_eq(&v, &Vector3f::new(0.0, 0.0, 1.0));
        let w = t.transform_vector(&Vector3f::new(0.0, 0.0, 1.0));
        assert_vec_eq(&w, &Vector3f::new(-0.0, -1.0, 0.0));
    }

    #[test]
    fn points_keep_their_distance_to_the_origin() {
        let t = Transform::rotate_y_then_z(-23.0, -211.0);
        let p = Point3f::new(0.3, -2.0, 5.0);
        let q = t.transform_point(&p);
        assert_abs_diff_eq!(
            Vector3f::from(q).length(),
            Vector3f::from(p).length(),
            epsilon = 1e-12
        );
        assert_eq!(Transform::default().transform_point(&p), p);
    }
}
