//! Almost all nontrivial graphics programs are built on a foundation
//! of geometric classes. The sun conversion only needs two of them:
//!
//! # Points
//!
//! A **point** is a zero-dimensional location in 3D space, like the
//! position of the irradiance receiver or the vertices of a polygon
//! which has to be rotated together with the many suns.
//!
//! # Vectors
//!
//! A **vector** is a direction with a length. Sun directions, view
//! directions, surface normals and all direction samples are vectors.
//!
//! ```rust
//! use manysuns::core::geometry::{vec3_dot_vec3f, Vector3f};
//!
//! let sun = Vector3f { x: 0.0, y: 3.0, z: 4.0 };
//! let up = Vector3f { x: 0.0, y: 0.0, z: 1.0 };
//! assert_eq!(sun.length(), 5.0);
//! assert_eq!(vec3_dot_vec3f(&sun.normalize(), &up), 0.8);
//! ```

// std
use std::fmt;
use std::ops;
// manysuns
use crate::core::manysuns::Float;

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Vector3f {
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Vector3f { x, y, z }
    }
    /// Build a vector from the first three values of a slice.
    pub fn from_slice(v: &[Float]) -> Option<Self> {
        if v.len() < 3 {
            None
        } else {
            Some(Vector3f {
                x: v[0],
                y: v[1],
                z: v[2],
            })
        }
    }
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
    /// Compute a new vector pointing in the same direction but with unit
    /// length.
    pub fn normalize(&self) -> Vector3f {
        *self / self.length()
    }
}

impl fmt::Display for Vector3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

impl From<Point3f> for Vector3f {
    fn from(p: Point3f) -> Self {
        Vector3f {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Point3f {
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Point3f { x, y, z }
    }
}

impl fmt::Display for Point3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

impl From<Vector3f> for Point3f {
    fn from(v: Vector3f) -> Self {
        Point3f {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl_op_ex!(+|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(-|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(+|a: &Point3f, b: &Vector3f| -> Point3f {
    Point3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(-|a: &Point3f, b: &Point3f| -> Vector3f {
    Vector3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(*|a: &Vector3f, b: Float| -> Vector3f {
    Vector3f {
        x: a.x * b,
        y: a.y * b,
        z: a.z * b,
    }
});

impl_op_ex!(/|a: &Vector3f, b: Float| -> Vector3f {
    assert_ne!(b, 0.0 as Float);
    let inv: Float = 1.0 as Float / b;
    Vector3f {
        x: a.x * inv,
        y: a.y * inv,
        z: a.z * inv,
    }
});

impl_op!(+= |a: &mut Vector3f, b: Vector3f| {
    a.x += b.x;
    a.y += b.y;
    a.z += b.z;
});

/// Product of the Euclidean magnitudes of the two vectors and the
/// cosine of the angle between them. A return value of zero means
/// both vectors are orthogonal, a value if one means they are
/// codirectional.
pub fn vec3_dot_vec3f(v1: &Vector3f, v2: &Vector3f) -> Float {
    v1.x * v2.x + v1.y * v2.y + v1.z * v2.z
}

/// Given two vectors in 3D, the cross product is a vector that is
/// perpendicular to both of them.
pub fn vec3_cross_vec3(v1: &Vector3f, v2: &Vector3f) -> Vector3f {
    Vector3f {
        x: (v1.y * v2.z) - (v1.z * v2.y),
        y: (v1.z * v2.x) - (v1.x * v2.z),
        z: (v1.x * v2.y) - (v1.y * v2.x),
    }
}

/// Angle between two vectors in radians, safe for nearly parallel
/// inputs.
pub fn vec3_angle_between(v1: &Vector3f, v2: &Vector3f) -> Float {
    let a: Vector3f = v1.normalize();
    let b: Vector3f = v2.normalize();
    // atan2(|a x b|, a . b)
    let cross: Float = vec3_cross_vec3(&a, &b).length();
    cross.atan2(vec3_dot_vec3f(&a, &b))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::manysuns::radians;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cross_product_is_right_handed() {
        let x = Vector3f::new(1.0, 0.0, 0.0);
        let y = Vector3f::new(0.0, 1.0, 0.0);
        assert_eq!(vec3_cross_vec3(&x, &y), Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn small_angles_survive() {
        let a = Vector3f::new(1.0, 0.0, 0.0);
        let b = Vector3f::new(1.0, radians(0.01).tan(), 0.0);
        assert_abs_diff_eq!(vec3_angle_between(&a, &b), radians(0.01), epsilon = 1e-15);
    }

    #[test]
    fn point_arithmetic() {
        let p = Point3f::new(1.0, 2.0, 3.0);
        let q = p + Vector3f::new(1.0, 1.0, 1.0);
        assert_eq!(q - p, Vector3f::new(1.0, 1.0, 1.0));
        assert!(Vector3f::from_slice(&[1.0, 2.0]).is_none());
    }
}
