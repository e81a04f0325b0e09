//! Per-kind placement rules.
//!
//! Each asset kind has one rule in [`PLACEMENT_RULES`]: how it is scaled, the
//! additive anchor correction for each quarter turn, and where the corrected
//! base point lands in the world. Perforated tiles have no rule; they are
//! drawn as line groups (see [`crate::grid`]).
//!
//! ```text
//! base       = (x - W/2, y - L/2)
//! correction = rule.angle_offset(record, turn, floor)
//! translation = rule.anchor(record, base, correction)
//! ```

use glam::{Vec2, Vec3};
use serde::Serialize;
use tracing::warn;

use crate::error::{LayoutError, LayoutResult};
use crate::figure::{FigureKind, FigureRecord, QuarterTurn};
use crate::floor::FloorSpec;
use constants::placement::*;

/// Whether the placement followed a defined rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PlacementQuality {
    Exact,
    /// The angle is not a quarter turn; no anchor correction was applied.
    UnsupportedAngle(f32),
}

/// Scene transform for one asset figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FigurePlacement {
    pub kind: FigureKind,
    pub angle_offset: Vec2,
    pub translation: Vec3,
    pub scale: Vec3,
    /// Rotation about +Y in radians.
    pub rotation_y: f32,
    pub quality: PlacementQuality,
}

impl FigurePlacement {
    /// World-space axis-aligned size of an asset with the given native
    /// extent once this placement's scale and rotation are applied.
    pub fn world_extent(&self, native_extent: Vec3) -> Vec3 {
        let scaled = native_extent * self.scale;
        let (sin, cos) = self.rotation_y.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        Vec3::new(
            cos * scaled.x + sin * scaled.z,
            scaled.y,
            sin * scaled.x + cos * scaled.z,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScaleRule {
    /// Scale is the record's size; the asset is authored as a unit box.
    Absolute,
    /// Scale is record size over asset-native size.
    RatioToAsset,
}

type AngleOffsetFn = fn(&FigureRecord, QuarterTurn, &FloorSpec) -> Vec2;
type AnchorFn = fn(&FigureRecord, Vec2, Vec2) -> Vec3;

struct PlacementRule {
    kind: FigureKind,
    scale: ScaleRule,
    angle_offset: AngleOffsetFn,
    anchor: AnchorFn,
    /// Rules whose correction ignores the angle never flag unsupported angles.
    angle_dependent: bool,
}

static PLACEMENT_RULES: [PlacementRule; 4] = [
    PlacementRule {
        kind: FigureKind::Rack,
        scale: ScaleRule::Absolute,
        angle_offset: rack_offset,
        anchor: rack_anchor,
        angle_dependent: true,
    },
    PlacementRule {
        kind: FigureKind::Cooler,
        scale: ScaleRule::RatioToAsset,
        angle_offset: cooler_offset,
        anchor: cooler_anchor,
        angle_dependent: true,
    },
    PlacementRule {
        kind: FigureKind::RaisedFloor,
        scale: ScaleRule::RatioToAsset,
        angle_offset: raised_floor_offset,
        anchor: raised_floor_anchor,
        angle_dependent: true,
    },
    PlacementRule {
        kind: FigureKind::ElectricalPanel,
        scale: ScaleRule::RatioToAsset,
        angle_offset: no_offset,
        anchor: electrical_panel_anchor,
        angle_dependent: false,
    },
];

fn rule_for(kind: FigureKind) -> Option<&'static PlacementRule> {
    PLACEMENT_RULES.iter().find(|rule| rule.kind == kind)
}

fn rack_offset(r: &FigureRecord, turn: QuarterTurn, _floor: &FloorSpec) -> Vec2 {
    match turn {
        QuarterTurn::Deg0 | QuarterTurn::Deg180 => Vec2::new(
            RACK_AXIS_SWAP_FACTOR * (r.width - r.depth),
            RACK_AXIS_SWAP_FACTOR * (r.depth - r.width),
        ),
        QuarterTurn::Deg90 | QuarterTurn::Deg270 => Vec2::ZERO,
    }
}

fn rack_anchor(r: &FigureRecord, base: Vec2, offset: Vec2) -> Vec3 {
    Vec3::new(
        base.x + offset.x + r.depth / 2.0,
        FLOOR_CLEARANCE,
        base.y + offset.y + r.width / 2.0,
    )
}

fn cooler_offset(r: &FigureRecord, turn: QuarterTurn, _floor: &FloorSpec) -> Vec2 {
    match turn {
        QuarterTurn::Deg0 => Vec2::ZERO,
        QuarterTurn::Deg90 => Vec2::new(r.depth, r.width - r.depth),
        QuarterTurn::Deg180 => Vec2::new(r.width, -r.depth),
        QuarterTurn::Deg270 => Vec2::new(0.0, -r.depth),
    }
}

fn cooler_anchor(r: &FigureRecord, base: Vec2, offset: Vec2) -> Vec3 {
    Vec3::new(
        base.x + offset.x,
        FLOOR_CLEARANCE,
        base.y + offset.y + r.depth,
    )
}

fn raised_floor_offset(r: &FigureRecord, turn: QuarterTurn, floor: &FloorSpec) -> Vec2 {
    match turn {
        QuarterTurn::Deg0 => Vec2::ZERO,
        QuarterTurn::Deg90 => Vec2::new(
            -floor.width - r.width / RAISED_FLOOR_90_WIDTH_DIVISOR,
            floor.length + RAISED_FLOOR_90_DEPTH_FACTOR * r.depth,
        ),
        QuarterTurn::Deg180 => Vec2::new(r.width, -RAISED_FLOOR_180_DEPTH_FACTOR * r.depth),
        QuarterTurn::Deg270 => Vec2::new(
            -RAISED_FLOOR_270_WIDTH_FACTOR * r.width,
            -RAISED_FLOOR_270_DEPTH_FACTOR * r.depth,
        ),
    }
}

fn raised_floor_anchor(r: &FigureRecord, base: Vec2, offset: Vec2) -> Vec3 {
    Vec3::new(
        base.x + offset.x + RAISED_FLOOR_WIDTH_ANCHOR * r.width,
        FLOOR_CLEARANCE,
        base.y + offset.y - RAISED_FLOOR_DEPTH_ANCHOR * r.depth,
    )
}

fn no_offset(_r: &FigureRecord, _turn: QuarterTurn, _floor: &FloorSpec) -> Vec2 {
    Vec2::ZERO
}

fn electrical_panel_anchor(r: &FigureRecord, base: Vec2, _offset: Vec2) -> Vec3 {
    Vec3::new(
        base.x + r.width / 2.0,
        r.height / 2.0 + FLOOR_CLEARANCE,
        base.y + r.depth / ELECTRICAL_PANEL_DEPTH_DIVISOR,
    )
}

/// Place an asset figure.
///
/// `native_extent` is the bounding-box size of the loaded asset before any
/// transform; it is only consulted by ratio-scaled kinds.
pub fn place_figure(
    record: &FigureRecord,
    floor: &FloorSpec,
    native_extent: Vec3,
) -> LayoutResult<FigurePlacement> {
    let kind = record.validate()?;
    let rule = rule_for(kind).ok_or(LayoutError::NotAnAsset(record.id))?;

    let scale = match rule.scale {
        ScaleRule::Absolute => Vec3::new(record.width, record.height, record.depth),
        ScaleRule::RatioToAsset => {
            let usable = |v: f32| v.is_finite() && v > 0.0;
            if !native_extent.to_array().into_iter().all(usable) {
                return Err(LayoutError::DegenerateAsset {
                    kind: kind.name(),
                    extent: native_extent.to_array(),
                });
            }
            Vec3::new(record.width, record.height, record.depth) / native_extent
        }
    };

    let (angle_offset, quality) = match record.rotation.quarter() {
        Some(turn) => ((rule.angle_offset)(record, turn, floor), PlacementQuality::Exact),
        None if rule.angle_dependent => {
            let degrees = record.rotation.degrees();
            warn!(
                "Figure {} ({}) has unsupported angle {}, placing without correction",
                record.id, kind, degrees
            );
            (Vec2::ZERO, PlacementQuality::UnsupportedAngle(degrees))
        }
        None => (Vec2::ZERO, PlacementQuality::Exact),
    };

    let base = floor.base_point(record.position);
    Ok(FigurePlacement {
        kind,
        angle_offset,
        translation: (rule.anchor)(record, base, angle_offset),
        scale,
        rotation_y: record.rotation.radians(),
        quality,
    })
}

/// Axis-aligned box around a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl PointBounds {
    /// `None` when there are no points.
    pub fn of_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Rotation;

    fn record(kind: &str, angle: f32) -> FigureRecord {
        FigureRecord {
            id: 1,
            type_label: "X".into(),
            kind_name: kind.into(),
            position: Vec2::new(2.0, 3.0),
            width: 2.0,
            height: 1.5,
            depth: 1.0,
            rotation: Rotation::from_degrees(angle),
            colour: None,
            rack_id: 0,
        }
    }

    #[test]
    fn every_asset_kind_has_a_rule() {
        for kind in FigureKind::ALL {
            assert_eq!(rule_for(kind).is_some(), kind.is_asset(), "{kind}");
        }
    }

    #[test]
    fn unsupported_angle_keeps_zero_correction() {
        let floor = FloorSpec::new(20.0, 10.0);
        let p = place_figure(&record("cooler", 45.0), &floor, Vec3::ONE).unwrap();
        assert_eq!(p.angle_offset, Vec2::ZERO);
        assert_eq!(p.quality, PlacementQuality::UnsupportedAngle(45.0));
    }

    #[test]
    fn electrical_panel_ignores_angle() {
        let floor = FloorSpec::new(20.0, 10.0);
        let p = place_figure(&record("electrical_panel", 45.0), &floor, Vec3::ONE).unwrap();
        assert_eq!(p.quality, PlacementQuality::Exact);
        let expected = Vec3::new(-7.0, 0.76, -2.0 + 1.0 / 9.0);
        assert!(p.translation.abs_diff_eq(expected, 1e-5), "{:?}", p.translation);
    }

    #[test]
    fn degenerate_extent_is_rejected_for_ratio_kinds() {
        let floor = FloorSpec::new(20.0, 10.0);
        let err = place_figure(&record("cooler", 0.0), &floor, Vec3::new(1.0, 0.0, 1.0));
        assert!(matches!(err, Err(LayoutError::DegenerateAsset { .. })));
        // Racks scale absolutely and never look at the asset extent.
        assert!(place_figure(&record("rack", 0.0), &floor, Vec3::ZERO).is_ok());
    }

    #[test]
    fn perforated_tile_is_not_an_asset() {
        let floor = FloorSpec::new(20.0, 10.0);
        assert_eq!(
            place_figure(&record("perforated_tile", 0.0), &floor, Vec3::ONE),
            Err(LayoutError::NotAnAsset(1))
        );
    }

    #[test]
    fn world_extent_swaps_axes_on_quarter_turn() {
        let floor = FloorSpec::new(20.0, 10.0);
        let p = place_figure(&record("rack", 90.0), &floor, Vec3::ONE).unwrap();
        let e = p.world_extent(Vec3::ONE);
        assert!((e.x - 1.0).abs() < 1e-5);
        assert!((e.z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn point_bounds_span_min_to_max() {
        let pts = [Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, -2.0)];
        let bounds = PointBounds::of_points(pts).unwrap();
        assert_eq!(bounds.extent(), Vec3::new(4.0, 4.0, 4.0));
        assert_eq!(bounds.center(), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(PointBounds::of_points(Vec::new()), None);
    }
}
