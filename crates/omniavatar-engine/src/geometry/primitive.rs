//! Primitive shape descriptors.

use omniavatar_spec::ClothingItem;
use serde::{Deserialize, Serialize};

use crate::math::{self, Aabb, Mat3, Transform, Vec3};

/// A primitive shape in its local frame. Elongated shapes run along local Y
/// and are centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Sphere, or a polar cap of one when `polar_extent < PI`. The cap covers
    /// the polar angles `[0, polar_extent]` measured from +Y.
    Sphere { radius: f64, polar_extent: f64 },
    /// Cylinder of `length` with hemispherical ends.
    Capsule { radius: f64, length: f64 },
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
    },
    /// Cone with its base at `-height/2` and apex at `+height/2`.
    Cone { radius: f64, height: f64 },
    Box { size: Vec3 },
}

impl Shape {
    pub fn sphere(radius: f64) -> Self {
        Shape::Sphere {
            radius,
            polar_extent: std::f64::consts::PI,
        }
    }

    pub fn cap(radius: f64, polar_extent: f64) -> Self {
        Shape::Sphere {
            radius,
            polar_extent: polar_extent.clamp(0.05, std::f64::consts::PI),
        }
    }

    pub fn capsule(radius: f64, length: f64) -> Self {
        Shape::Capsule { radius, length }
    }

    pub fn cylinder(radius_top: f64, radius_bottom: f64, height: f64) -> Self {
        Shape::Cylinder {
            radius_top,
            radius_bottom,
            height,
        }
    }

    pub fn cone(radius: f64, height: f64) -> Self {
        Shape::Cone { radius, height }
    }

    pub fn cuboid(x: f64, y: f64, z: f64) -> Self {
        Shape::Box { size: [x, y, z] }
    }

    /// Snake-case name of the shape kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Sphere { .. } => "sphere",
            Shape::Capsule { .. } => "capsule",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Cone { .. } => "cone",
            Shape::Box { .. } => "box",
        }
    }

    /// Local-frame axis-aligned bounds as `(center, half_extents)`.
    pub fn local_bounds(&self) -> (Vec3, Vec3) {
        match *self {
            Shape::Sphere {
                radius,
                polar_extent,
            } => {
                // Caps only reach down to the rim of their polar extent.
                let bottom = radius * polar_extent.cos();
                let lateral = if polar_extent >= std::f64::consts::FRAC_PI_2 {
                    radius
                } else {
                    radius * polar_extent.sin()
                };
                (
                    [0.0, (radius + bottom) / 2.0, 0.0],
                    [lateral, (radius - bottom) / 2.0, lateral],
                )
            }
            Shape::Capsule { radius, length } => {
                (math::ZERO, [radius, length / 2.0 + radius, radius])
            }
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => {
                let r = radius_top.max(radius_bottom);
                (math::ZERO, [r, height / 2.0, r])
            }
            Shape::Cone { radius, height } => (math::ZERO, [radius, height / 2.0, radius]),
            Shape::Box { size } => (math::ZERO, math::scale(size, 0.5)),
        }
    }

    /// Every dimension is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        let dims: Vec<f64> = match *self {
            Shape::Sphere {
                radius,
                polar_extent,
            } => vec![radius, polar_extent],
            Shape::Capsule { radius, length } => vec![radius, length],
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => vec![radius_top, radius_bottom, height],
            Shape::Cone { radius, height } => vec![radius, height],
            Shape::Box { size } => size.to_vec(),
        };
        dims.iter().all(|d| d.is_finite() && *d > 0.0)
    }

    /// Longest extent along local Y, used for strand length comparisons.
    pub fn axial_length(&self) -> f64 {
        let (_, half) = self.local_bounds();
        half[1] * 2.0
    }
}

/// What a primitive is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialRef {
    Skin,
    Hair,
    EyeWhite,
    Iris,
    Pupil,
    Lip,
    Tooth,
    Gold,
    Metal,
    Garment(ClothingItem),
}

impl MaterialRef {
    /// Stable key, e.g. `skin` or `garment_shirt01`.
    pub fn key(&self) -> String {
        match self {
            MaterialRef::Skin => "skin".to_string(),
            MaterialRef::Hair => "hair".to_string(),
            MaterialRef::EyeWhite => "eye_white".to_string(),
            MaterialRef::Iris => "iris".to_string(),
            MaterialRef::Pupil => "pupil".to_string(),
            MaterialRef::Lip => "lip".to_string(),
            MaterialRef::Tooth => "tooth".to_string(),
            MaterialRef::Gold => "gold".to_string(),
            MaterialRef::Metal => "metal".to_string(),
            MaterialRef::Garment(item) => format!("garment_{}", item.catalog_id()),
        }
    }
}

/// A named shape placed in its owner's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub name: String,
    pub shape: Shape,
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    /// Non-uniform scale applied in the primitive's local frame.
    pub scale: Vec3,
    pub material: MaterialRef,
}

impl Primitive {
    pub fn new(name: impl Into<String>, shape: Shape, material: MaterialRef) -> Self {
        Self {
            name: name.into(),
            shape,
            position: math::ZERO,
            rotation: math::ZERO,
            scale: math::ONE,
            material,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Transform of the primitive relative to its owner (scale excluded).
    pub fn local_transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// Bounds in the owner's frame.
    pub fn bounds_in(&self, owner: &Transform) -> Aabb {
        let world = owner.then(&self.local_transform());
        let (center, half) = self.shape.local_bounds();
        let center = math::mul(center, self.scale);
        let half = math::mul(half, self.scale.map(f64::abs));
        let world_center = world.apply_point(center);
        Aabb::from_center_half(world_center, world.rotation.abs_row_dot(half))
    }

    /// True if the shape and every transform component are valid.
    pub fn is_valid(&self) -> bool {
        self.shape.is_valid()
            && self
                .position
                .iter()
                .chain(self.rotation.iter())
                .all(|v| v.is_finite())
            && self.scale.iter().all(|s| s.is_finite() && *s > 0.0)
    }
}

/// Full linear part (rotation times scale) of a primitive in world space.
pub fn linear_part(world: &Transform, scale: Vec3) -> Mat3 {
    world.rotation.mul(&Mat3::from_scale(scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_capsule_bounds_include_caps() {
        let (c, h) = Shape::capsule(0.1, 0.4).local_bounds();
        assert_eq!(c, [0.0, 0.0, 0.0]);
        assert!((h[1] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_hemisphere_cap_bounds() {
        let (c, h) = Shape::cap(1.0, FRAC_PI_2).local_bounds();
        assert!((c[1] - 0.5).abs() < 1e-12);
        assert!((h[1] - 0.5).abs() < 1e-12);
        let (c, h) = Shape::sphere(1.0).local_bounds();
        assert!(c[1].abs() < 1e-12);
        assert!((h[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_small_cap_bounds() {
        let (c, h) = Shape::cap(1.0, PI / 3.0).local_bounds();
        // rim at y = cos(60 deg) = 0.5
        assert!((c[1] - 0.75).abs() < 1e-12);
        assert!((h[1] - 0.25).abs() < 1e-12);
        assert!((h[0] - (PI / 3.0).sin()).abs() < 1e-12);
    }

    #[test]
    fn test_rotated_bounds() {
        let p = Primitive::new("arm", Shape::capsule(0.05, 0.5), MaterialRef::Skin)
            .rotated([0.0, 0.0, FRAC_PI_2]);
        let b = p.bounds_in(&Transform::IDENTITY);
        assert!((b.max[0] - 0.3).abs() < 1e-9);
        assert!((b.max[1] - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_validity() {
        assert!(Shape::sphere(0.1).is_valid());
        assert!(!Shape::capsule(0.0, 1.0).is_valid());
        assert!(!Shape::cone(f64::NAN, 1.0).is_valid());
        let p = Primitive::new("x", Shape::sphere(1.0), MaterialRef::Hair).scaled([1.0, 0.0, 1.0]);
        assert!(!p.is_valid());
    }

    #[test]
    fn test_material_keys() {
        assert_eq!(MaterialRef::EyeWhite.key(), "eye_white");
        assert_eq!(
            MaterialRef::Garment(ClothingItem::Suit).key(),
            "garment_suit01"
        );
    }
}
