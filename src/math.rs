use crate::error::CubeError;
use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, Mul, Neg, Sub};

/// 2D point or vector in bitmap space (y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(self * v.x, self * v.y)
    }
}

/// 3D point or vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const X: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Rotates the components one place: `(x, y, z) -> (z, x, y)`.
    ///
    /// For a signed basis vector this always yields a different, perpendicular
    /// basis vector.
    pub fn cyclic_shift(self) -> Vec3 {
        Vec3::new(self.z, self.x, self.y)
    }

    /// True for the six signed unit basis vectors (±X, ±Y, ±Z)
    pub fn is_signed_basis(self) -> bool {
        [Vec3::X, Vec3::Y, Vec3::Z]
            .iter()
            .any(|&axis| self == axis || self == -axis)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        Vec3::new(self * v.x, self * v.y, self * v.z)
    }
}

/// Row-major 3x3 rotation matrix.
///
/// Only ever built from [`Mat3::IDENTITY`], the axis generators, or products
/// of those, so it stays orthonormal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub fn rotate_x(theta: f64) -> Mat3 {
        let (sin, cos) = theta.sin_cos();
        Mat3 {
            m: [[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]],
        }
    }

    pub fn rotate_y(theta: f64) -> Mat3 {
        let (sin, cos) = theta.sin_cos();
        Mat3 {
            m: [[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]],
        }
    }

    pub fn rotate_z(theta: f64) -> Mat3 {
        let (sin, cos) = theta.sin_cos();
        Mat3 {
            m: [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]],
        }
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Mat3::IDENTITY
    }
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        let vector = [v.x, v.y, v.z];
        let mut result = [0.0; 3];
        for i in 0..3 {
            for j in 0..3 {
                result[i] += self.m[i][j] * vector[j];
            }
        }
        Vec3::new(result[0], result[1], result[2])
    }
}

/// Multiplies two 3x3 matrices; the right operand is applied first
impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let mut result = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    result[i][j] += self.m[i][k] * rhs.m[k][j];
                }
            }
        }
        Mat3 { m: result }
    }
}

/// Unit quaternion `w + xi + yj + zk`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Rotation by `angle` around the unit vector `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Quat {
        let (s, c) = (angle * 0.5).sin_cos();
        Quat {
            w: c,
            x: s * axis.x,
            y: s * axis.y,
            z: s * axis.z,
        }
    }

    pub fn conjugate(self) -> Quat {
        Quat {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    fn from_position(p: Vec3) -> Quat {
        Quat {
            w: 0.0,
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }

    fn to_position(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Hamilton product
impl Mul for Quat {
    type Output = Quat;

    fn mul(self, q: Quat) -> Quat {
        Quat {
            w: self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
            x: self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            y: self.w * q.y + self.y * q.w + self.z * q.x - self.x * q.z,
            z: self.w * q.z + self.z * q.w + self.x * q.y - self.y * q.x,
        }
    }
}

/// Common capability of the two rotation representations.
///
/// Matrix and quaternion forms are interchangeable at call sites but are not
/// mixed within one transform chain.
pub trait Rotation: Copy {
    fn identity() -> Self;

    /// Rotation by `theta` radians around one of the six signed basis axes
    fn around_axis(axis: Vec3, theta: f64) -> Result<Self, CubeError>;

    fn rotate(&self, v: Vec3) -> Vec3;

    /// `self` after `first`: `a.compose(&b).rotate(v) == a.rotate(b.rotate(v))`
    fn compose(&self, first: &Self) -> Self;
}

impl Rotation for Mat3 {
    fn identity() -> Self {
        Mat3::IDENTITY
    }

    fn around_axis(axis: Vec3, theta: f64) -> Result<Self, CubeError> {
        rotation_around_axis(axis, theta)
    }

    fn rotate(&self, v: Vec3) -> Vec3 {
        *self * v
    }

    fn compose(&self, first: &Self) -> Self {
        *self * *first
    }
}

impl Rotation for Quat {
    fn identity() -> Self {
        Quat::IDENTITY
    }

    fn around_axis(axis: Vec3, theta: f64) -> Result<Self, CubeError> {
        if !axis.is_signed_basis() {
            return Err(CubeError::InvalidAxis { axis });
        }
        Ok(Quat::from_axis_angle(axis, theta))
    }

    /// Sandwich product `q * p * q⁻¹`
    fn rotate(&self, v: Vec3) -> Vec3 {
        (*self * Quat::from_position(v) * self.conjugate()).to_position()
    }

    fn compose(&self, first: &Self) -> Self {
        *self * *first
    }
}

/// Dispatches to the matching signed axis generator.
///
/// Any axis other than ±X, ±Y or ±Z is rejected: free rotation is reserved
/// for orbiting the whole assembly.
pub fn rotation_around_axis(axis: Vec3, theta: f64) -> Result<Mat3, CubeError> {
    let rotation = if axis == Vec3::X {
        Mat3::rotate_x(theta)
    } else if axis == -Vec3::X {
        Mat3::rotate_x(-theta)
    } else if axis == Vec3::Y {
        Mat3::rotate_y(theta)
    } else if axis == -Vec3::Y {
        Mat3::rotate_y(-theta)
    } else if axis == Vec3::Z {
        Mat3::rotate_z(theta)
    } else if axis == -Vec3::Z {
        Mat3::rotate_z(-theta)
    } else {
        return Err(CubeError::InvalidAxis { axis });
    };
    Ok(rotation)
}

/// Number of quarter turns nearest to `theta`
pub fn quarter_turns(theta: f64) -> i64 {
    let low = (theta / FRAC_PI_2).floor();
    let high = low + 1.0;
    if theta - low * FRAC_PI_2 <= high * FRAC_PI_2 - theta {
        low as i64
    } else {
        high as i64
    }
}

/// Snaps `theta` to the closer bound of the half-pi bracket containing it
pub fn round_to_half_pi(theta: f64) -> f64 {
    quarter_turns(theta) as f64 * FRAC_PI_2
}

/// Forces every entry to exactly -1, 0 or 1
pub fn normalize_matrix_values(matrix: Mat3) -> Mat3 {
    let mut result = matrix;
    for row in result.m.iter_mut() {
        for value in row.iter_mut() {
            *value = if *value < -0.5 {
                -1.0
            } else if *value > 0.5 {
                1.0
            } else {
                0.0
            };
        }
    }
    result
}
