//! Clothing layering and fitting.
//!
//! Layering picks at most one garment per slot by priority. Fitting builds
//! each chosen garment as shells around the skin primitives of the parts it
//! covers, using the same radii plus a fixed clearance.

use std::f64::consts::FRAC_PI_2;

use omniavatar_spec::{ClothingItem, ClothingSlot, GarmentKind};
use serde::Serialize;
use tracing::debug;

use crate::dimensions::BodyDimensions;
use crate::geometry::{BodyPart, MaterialRef, Primitive, Shape};

/// The garments that render, one per slot at most.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayerSelection {
    pub upper: Option<ClothingItem>,
    pub lower: Option<ClothingItem>,
    pub full_body: Option<ClothingItem>,
    pub footwear: Option<ClothingItem>,
}

impl LayerSelection {
    /// Selected items, full body first.
    pub fn items(&self) -> Vec<ClothingItem> {
        [self.full_body, self.upper, self.lower, self.footwear]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Applies layering priority to a set of clothing ids.
///
/// Unknown ids are ignored. A full-body garment suppresses upper and lower.
pub fn select_layers<I, S>(ids: I) -> LayerSelection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selection = LayerSelection::default();
    for id in ids {
        let id = id.as_ref();
        let Some(item) = ClothingItem::from_catalog_id(id) else {
            debug!("ignoring unknown clothing id '{}'", id);
            continue;
        };
        let slot = match item.slot() {
            ClothingSlot::Upper => &mut selection.upper,
            ClothingSlot::Lower => &mut selection.lower,
            ClothingSlot::FullBody => &mut selection.full_body,
            ClothingSlot::Footwear => &mut selection.footwear,
        };
        if slot.map_or(true, |current| item.priority() > current.priority()) {
            *slot = Some(item);
        }
    }
    if selection.full_body.is_some() {
        selection.upper = None;
        selection.lower = None;
    }
    selection
}

/// Garment primitives attached to one body part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarmentPiece {
    pub part: BodyPart,
    pub primitives: Vec<Primitive>,
}

/// A fitted garment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Garment {
    pub item: ClothingItem,
    pub pieces: Vec<GarmentPiece>,
}

impl Garment {
    pub fn primitive_count(&self) -> usize {
        self.pieces.iter().map(|p| p.primitives.len()).sum()
    }
}

/// Fits the layered selection of `ids` to the body.
pub fn fit_clothing<I, S>(ids: I, dims: &BodyDimensions, clearance: f64) -> Vec<Garment>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let clearance = if clearance.is_finite() { clearance.max(0.0) } else { 0.0 };
    select_layers(ids)
        .items()
        .into_iter()
        .map(|item| fit_item(item, dims, clearance))
        .collect()
}

/// Fits a single garment regardless of layering.
pub fn fit_item(item: ClothingItem, dims: &BodyDimensions, clearance: f64) -> Garment {
    let mut tailor = Tailor {
        item,
        dims,
        c: clearance,
        pieces: Vec::new(),
    };
    match item.kind() {
        GarmentKind::TShirt => {
            tailor.torso(false);
            tailor.sleeves(false);
        }
        GarmentKind::Hoodie => {
            tailor.torso(false);
            tailor.sleeves(true);
            tailor.hood();
        }
        GarmentKind::Jacket => {
            tailor.torso(false);
            tailor.sleeves(true);
            tailor.collar();
        }
        GarmentKind::SuitJacket => {
            tailor.torso(false);
            tailor.sleeves(true);
            tailor.collar();
            tailor.lapels();
        }
        GarmentKind::Trousers => {
            tailor.seat();
            tailor.legs(true);
        }
        GarmentKind::Shorts => {
            tailor.seat();
            tailor.legs(false);
        }
        GarmentKind::Coverall => {
            tailor.torso(true);
            tailor.sleeves(true);
            tailor.seat();
            tailor.legs(true);
        }
        GarmentKind::Shoe => tailor.shoes(false),
        GarmentKind::Boot => tailor.shoes(true),
    }
    Garment {
        item,
        pieces: tailor.pieces,
    }
}

const ARMS: [(f64, &str, BodyPart, BodyPart); 2] = [
    (1.0, "left", BodyPart::LeftUpperArm, BodyPart::LeftForearm),
    (-1.0, "right", BodyPart::RightUpperArm, BodyPart::RightForearm),
];

const LEGS: [(&str, BodyPart, BodyPart, BodyPart); 2] = [
    ("left", BodyPart::LeftThigh, BodyPart::LeftCalf, BodyPart::LeftFoot),
    ("right", BodyPart::RightThigh, BodyPart::RightCalf, BodyPart::RightFoot),
];

/// Builds garment pieces in the local frames used by the body assembler.
struct Tailor<'a> {
    item: ClothingItem,
    dims: &'a BodyDimensions,
    c: f64,
    pieces: Vec<GarmentPiece>,
}

impl<'a> Tailor<'a> {
    /// Dimensions borrowed for `'a`, independent of `self`.
    fn body(&self) -> &'a BodyDimensions {
        self.dims
    }

    fn prim(&self, name: &str, shape: Shape) -> Primitive {
        Primitive::new(
            format!("{}_{}", self.item.catalog_id(), name),
            shape,
            MaterialRef::Garment(self.item),
        )
    }

    fn add(&mut self, part: BodyPart, primitive: Primitive) {
        match self.pieces.iter_mut().find(|p| p.part == part) {
            Some(piece) => piece.primitives.push(primitive),
            None => self.pieces.push(GarmentPiece {
                part,
                primitives: vec![primitive],
            }),
        }
    }

    fn torso(&mut self, with_hips: bool) {
        let t = &self.body().torso;
        let c = self.c;
        let chest_front = t.chest_depth / 2.0 + t.bust_radius * 0.5;
        let shoulder_radius = self.dims.arms.upper_radius * 1.1 + c;
        let chest = self
            .prim("chest", Shape::sphere(1.0))
            .at([0.0, t.chest_section * 0.5, 0.0])
            .rotated([t.back_curvature, 0.0, 0.0])
            .scaled([t.chest_width / 2.0 + c, t.chest_section * 0.6 + c, chest_front + c]);
        let shoulders = self
            .prim(
                "shoulders",
                Shape::capsule(
                    shoulder_radius,
                    (t.shoulder_width - 2.0 * shoulder_radius + 2.0 * c).max(0.01),
                ),
            )
            .at([0.0, t.chest_section - t.shoulder_drop, 0.0])
            .rotated([0.0, 0.0, FRAC_PI_2]);
        let waist = self
            .prim("waist", Shape::sphere(1.0))
            .at([0.0, t.waist_section * 0.5, 0.0])
            .scaled([
                t.waist_width / 2.0 + c,
                t.waist_section * 0.75 + c,
                t.waist_depth / 2.0 + c,
            ]);
        self.add(BodyPart::Chest, chest);
        self.add(BodyPart::Chest, shoulders);
        self.add(BodyPart::Waist, waist);
        if with_hips {
            let hips = self.hips_shell();
            self.add(BodyPart::Hips, hips);
        }
    }

    fn hips_shell(&self) -> Primitive {
        let t = &self.body().torso;
        let c = self.c;
        self.prim("hips", Shape::sphere(1.0))
            .at([0.0, t.hip_section * 0.35, 0.0])
            .scaled([
                t.hip_width / 2.0 + c,
                t.hip_section * 0.7 + c,
                t.hip_depth / 2.0 + c,
            ])
    }

    /// Hips plus the glutes, for anything worn on the lower body.
    fn seat(&mut self) {
        let t = &self.body().torso;
        let c = self.c;
        let seat = self
            .prim("seat", Shape::sphere(1.0))
            .at([0.0, t.hip_section * 0.2, -t.hip_depth * 0.3])
            .scaled([t.hip_width * 0.4 + c, t.glute_radius + c, t.glute_radius + c]);
        let hips = self.hips_shell();
        if !self
            .pieces
            .iter()
            .any(|p| p.part == BodyPart::Hips && p.primitives.iter().any(|q| q.name == hips.name))
        {
            self.add(BodyPart::Hips, hips);
        }
        self.add(BodyPart::Hips, seat);
    }

    fn sleeves(&mut self, full: bool) {
        let a = &self.body().arms;
        let c = self.c;
        for (_, label, upper, forearm) in ARMS {
            let length = if full { a.upper_length } else { a.upper_length * 0.4 };
            let sleeve = self
                .prim(&format!("{}_sleeve", label), Shape::capsule(a.upper_radius + c, length))
                .at([0.0, -length / 2.0, 0.0]);
            self.add(upper, sleeve);
            if full {
                let cuff_length = a.forearm_length * 0.9;
                let lower = self
                    .prim(
                        &format!("{}_lower_sleeve", label),
                        Shape::capsule(a.forearm_radius + c, cuff_length),
                    )
                    .at([0.0, -cuff_length / 2.0, 0.0]);
                self.add(forearm, lower);
            }
        }
    }

    fn hood(&mut self) {
        let t = &self.body().torso;
        let head = &self.body().head;
        let hood = self
            .prim("hood", Shape::cap(head.width * 1.1 + self.c, 1.6))
            .at([0.0, t.chest_section + t.neck_length * 0.4, -t.chest_depth * 0.35])
            .rotated([-0.9, 0.0, 0.0]);
        self.add(BodyPart::Chest, hood);
    }

    fn collar(&mut self) {
        let t = &self.body().torso;
        let collar = self
            .prim(
                "collar",
                Shape::cylinder(t.neck_radius + self.c * 2.0, t.neck_radius * 1.2 + self.c * 2.0, t.neck_length * 0.5),
            )
            .at([0.0, t.neck_length * 0.25, 0.0]);
        self.add(BodyPart::Neck, collar);
    }

    fn lapels(&mut self) {
        let t = &self.body().torso;
        let front = t.chest_depth / 2.0 + t.bust_radius * 0.5 + self.c * 1.5;
        for (side, label, _, _) in ARMS {
            let lapel = self
                .prim(
                    &format!("{}_lapel", label),
                    Shape::cuboid(t.chest_width * 0.12, t.chest_section * 0.55, self.c.max(0.004)),
                )
                .at([side * t.chest_width * 0.1, t.chest_section * 0.62, front])
                .rotated([0.0, 0.0, side * 0.25]);
            self.add(BodyPart::Chest, lapel);
        }
    }

    fn legs(&mut self, full: bool) {
        let l = &self.body().legs;
        let c = self.c;
        for (label, thigh, calf, _) in LEGS {
            let length = if full { l.thigh_length } else { l.thigh_length * 0.55 };
            let leg = self
                .prim(&format!("{}_leg", label), Shape::capsule(l.thigh_radius + c, length))
                .at([0.0, -length / 2.0, 0.0]);
            self.add(thigh, leg);
            if full {
                let lower = self
                    .prim(
                        &format!("{}_lower_leg", label),
                        Shape::cylinder(
                            l.calf_radius + c,
                            l.ankle_radius * 1.2 + c,
                            l.calf_length * 0.95,
                        ),
                    )
                    .at([0.0, -l.calf_length * 0.95 / 2.0, 0.0]);
                self.add(calf, lower);
            }
        }
    }

    fn shoes(&mut self, boot: bool) {
        let l = &self.body().legs;
        let c = self.c;
        let tall = l.foot_height + c;
        for (label, _, calf, foot) in LEGS {
            let shoe = self
                .prim(
                    &format!("{}_shoe", label),
                    Shape::cuboid(l.foot_width + 2.0 * c, tall, l.foot_length + 2.0 * c),
                )
                .at([0.0, -l.foot_height + tall / 2.0, l.foot_length * 0.3]);
            self.add(foot, shoe);
            if boot {
                let shaft_height = l.calf_length * 0.35;
                let shaft = self
                    .prim(
                        &format!("{}_shaft", label),
                        Shape::cylinder(l.ankle_radius * 1.3 + c, l.ankle_radius * 1.3 + c, shaft_height),
                    )
                    .at([0.0, -l.calf_length + shaft_height / 2.0, 0.0]);
                self.add(calf, shaft);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::compute_dimensions;
    use omniavatar_spec::AvatarProfile;
    use pretty_assertions::assert_eq;

    fn dims() -> BodyDimensions {
        compute_dimensions(&AvatarProfile::default())
    }

    #[test]
    fn test_upper_priority() {
        let sel = select_layers(["shirt01", "suit01", "hoodie01"]);
        assert_eq!(sel.upper, Some(ClothingItem::Suit));
        let sel = select_layers(["shirt01", "hoodie01"]);
        assert_eq!(sel.upper, Some(ClothingItem::Hoodie));
        let sel = select_layers(["jacket01", "shirt01"]);
        assert_eq!(sel.upper, Some(ClothingItem::Jacket));
    }

    #[test]
    fn test_worksuit_overrides_upper_and_lower() {
        let sel = select_layers(["jeans01", "worksuit01", "shirt01", "boots01"]);
        assert_eq!(
            sel,
            LayerSelection {
                upper: None,
                lower: None,
                full_body: Some(ClothingItem::Worksuit),
                footwear: Some(ClothingItem::Boots),
            }
        );
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let d = dims();
        let with = fit_clothing(["jeans01", "nonexistent_item"], &d, 0.008);
        let without = fit_clothing(["jeans01"], &d, 0.008);
        assert_eq!(with, without);
        assert!(fit_clothing(["nonexistent_item"], &d, 0.008).is_empty());
    }

    #[test]
    fn test_garments_clear_the_skin() {
        let d = dims();
        let garments = fit_clothing(["shirt01", "jeans01"], &d, 0.01);
        let shirt = &garments[0];
        assert_eq!(shirt.item, ClothingItem::Shirt);
        let sleeve = shirt
            .pieces
            .iter()
            .find(|p| p.part == BodyPart::LeftUpperArm)
            .map(|p| &p.primitives[0])
            .unwrap();
        match sleeve.shape {
            Shape::Capsule { radius, .. } => {
                assert!((radius - d.arms.upper_radius - 0.01).abs() < 1e-12)
            }
            _ => panic!("sleeves are capsules"),
        }
        assert!(garments
            .iter()
            .flat_map(|g| g.pieces.iter())
            .flat_map(|p| p.primitives.iter())
            .all(|p| p.is_valid() && matches!(p.material, MaterialRef::Garment(_))));
    }

    #[test]
    fn test_footwear_independent_and_boots_have_shafts() {
        let d = dims();
        let garments = fit_clothing(["boots01", "suit01"], &d, 0.008);
        assert_eq!(garments.len(), 2);
        let boots = garments
            .iter()
            .find(|g| g.item == ClothingItem::Boots)
            .unwrap();
        assert!(boots.pieces.iter().any(|p| p.part == BodyPart::LeftCalf));
        let shoes = fit_item(ClothingItem::Sneakers, &d, 0.008);
        assert!(shoes.pieces.iter().all(|p| p.part != BodyPart::LeftCalf));
    }

    #[test]
    fn test_shoes_rest_on_ground_plane() {
        let d = dims();
        let shoes = fit_item(ClothingItem::DressShoes, &d, 0.008);
        let shoe = &shoes.pieces[0].primitives[0];
        let Shape::Box { size } = shoe.shape else {
            panic!("shoes are boxes");
        };
        // The foot frame sits foot_height above the ground.
        assert!((shoe.position[1] - size[1] / 2.0 + d.legs.foot_height).abs() < 1e-12);
    }
}
