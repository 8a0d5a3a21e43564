//! Small vector and rotation helpers.
//!
//! Coordinates: +Y up, the avatar faces +Z and its left side is +X. Rotations
//! are Euler angles in radians applied in XYZ order (`R = Rx * Ry * Rz`).

/// A 3-component vector.
pub type Vec3 = [f64; 3];

pub const ZERO: Vec3 = [0.0, 0.0, 0.0];
pub const ONE: Vec3 = [1.0, 1.0, 1.0];

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

/// Component-wise product.
#[inline]
pub fn mul(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] * b[0], a[1] * b[1], a[2] * b[2]]
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn length(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

/// Unit vector in the direction of `a`, or +Y for a zero vector.
pub fn normalize(a: Vec3) -> Vec3 {
    let len = length(a);
    if len > 1e-12 {
        scale(a, 1.0 / len)
    } else {
        [0.0, 1.0, 0.0]
    }
}

/// Euler angles rotating local +Y onto `axis`.
pub fn euler_for_axis(axis: Vec3) -> Vec3 {
    let u = normalize(axis);
    [u[2].atan2(u[1]), 0.0, -u[0].clamp(-1.0, 1.0).asin()]
}

/// Row-major 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(pub [[f64; 3]; 3]);

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Rotation matrix from XYZ Euler angles.
    pub fn from_euler(rot: Vec3) -> Self {
        let (sx, cx) = rot[0].sin_cos();
        let (sy, cy) = rot[1].sin_cos();
        let (sz, cz) = rot[2].sin_cos();
        let rx = Mat3([[1.0, 0.0, 0.0], [0.0, cx, -sx], [0.0, sx, cx]]);
        let ry = Mat3([[cy, 0.0, sy], [0.0, 1.0, 0.0], [-sy, 0.0, cy]]);
        let rz = Mat3([[cz, -sz, 0.0], [sz, cz, 0.0], [0.0, 0.0, 1.0]]);
        rx.mul(&ry).mul(&rz)
    }

    /// Diagonal scale matrix.
    pub fn from_scale(s: Vec3) -> Self {
        Mat3([[s[0], 0.0, 0.0], [0.0, s[1], 0.0], [0.0, 0.0, s[2]]])
    }

    pub fn mul(&self, other: &Mat3) -> Mat3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[i][k] * other.0[k][j]).sum();
            }
        }
        Mat3(out)
    }

    pub fn apply(&self, v: Vec3) -> Vec3 {
        [
            dot(self.0[0], v),
            dot(self.0[1], v),
            dot(self.0[2], v),
        ]
    }

    pub fn transpose(&self) -> Mat3 {
        let m = self.0;
        Mat3([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Sum of absolute values per row, used to bound rotated boxes.
    pub fn abs_row_dot(&self, half_extents: Vec3) -> Vec3 {
        let m = self.0;
        [
            m[0][0].abs() * half_extents[0] + m[0][1].abs() * half_extents[1] + m[0][2].abs() * half_extents[2],
            m[1][0].abs() * half_extents[0] + m[1][1].abs() * half_extents[1] + m[1][2].abs() * half_extents[2],
            m[2][0].abs() * half_extents[0] + m[2][1].abs() * half_extents[1] + m[2][2].abs() * half_extents[2],
        ]
    }
}

/// Rigid transform: rotation followed by translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Mat3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: ZERO,
        rotation: Mat3::IDENTITY,
    };

    pub fn new(translation: Vec3, euler: Vec3) -> Self {
        Self {
            translation,
            rotation: Mat3::from_euler(euler),
        }
    }

    /// `self * child`: the child transform expressed in this frame.
    pub fn then(&self, child: &Transform) -> Transform {
        Transform {
            translation: add(self.translation, self.rotation.apply(child.translation)),
            rotation: self.rotation.mul(&child.rotation),
        }
    }

    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        add(self.translation, self.rotation.apply(p))
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty box that any union replaces.
    pub const EMPTY: Aabb = Aabb {
        min: [f64::INFINITY; 3],
        max: [f64::NEG_INFINITY; 3],
    };

    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: sub(center, half),
            max: add(center, half),
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }

    pub fn include_point(&mut self, p: Vec3) {
        for (i, v) in p.iter().enumerate() {
            self.min[i] = self.min[i].min(*v);
            self.max[i] = self.max[i].max(*v);
        }
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            ZERO
        } else {
            sub(self.max, self.min)
        }
    }

    pub fn center(&self) -> Vec3 {
        scale(add(self.min, self.max), 0.5)
    }

    /// True if the boxes overlap or touch within `tolerance`.
    pub fn touches(&self, other: &Aabb, tolerance: f64) -> bool {
        (0..3).all(|i| {
            self.min[i] <= other.max[i] + tolerance && other.min[i] <= self.max[i] + tolerance
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (0..3).all(|i| (a[i] - b[i]).abs() < 1e-9)
    }

    #[test]
    fn test_positive_z_roll_lifts_hanging_limb_to_left() {
        let m = Mat3::from_euler([0.0, 0.0, FRAC_PI_2]);
        assert!(approx(m.apply([0.0, -1.0, 0.0]), [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_negative_pitch_raises_limb_forward() {
        let m = Mat3::from_euler([-FRAC_PI_2, 0.0, 0.0]);
        assert!(approx(m.apply([0.0, -1.0, 0.0]), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let m = Mat3::from_euler([0.3, -1.1, 2.0]);
        let should_be_identity = m.mul(&m.transpose());
        for i in 0..3 {
            assert!(approx(should_be_identity.0[i], Mat3::IDENTITY.0[i]));
        }
    }

    #[test]
    fn test_euler_for_axis_maps_up_onto_axis() {
        for axis in [[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.3, 0.4, -0.5], [-0.6, 0.0, 0.8]] {
            let m = Mat3::from_euler(euler_for_axis(axis));
            assert!(approx(m.apply([0.0, 1.0, 0.0]), normalize(axis)), "{:?}", axis);
        }
    }

    #[test]
    fn test_transform_composition() {
        let parent = Transform::new([0.0, 1.0, 0.0], [0.0, 0.0, FRAC_PI_2]);
        let child = Transform::new([0.0, -0.5, 0.0], ZERO);
        let world = parent.then(&child);
        assert!(approx(world.translation, [0.5, 1.0, 0.0]));
    }

    #[test]
    fn test_aabb_union() {
        let a = Aabb::from_center_half(ZERO, ONE);
        let b = Aabb::from_center_half([3.0, 0.0, 0.0], ONE);
        let u = Aabb::EMPTY.union(&a).union(&b);
        assert_eq!(u.min, [-1.0, -1.0, -1.0]);
        assert_eq!(u.max, [4.0, 1.0, 1.0]);
        assert!(!a.touches(&b, 0.5));
        assert!(a.touches(&b, 1.0));
    }
}
