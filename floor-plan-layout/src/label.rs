use glam::Vec3;

use crate::figure::{FigureKind, QuarterTurn, Rotation};
use constants::placement::{
    COOLER_LABEL_LIFT, ELECTRICAL_PANEL_LABEL_DROP, RACK_LABEL_LIFT, RAISED_FLOOR_LABEL_LIFT,
};

/// Where a figure's text label floats, from the placed position `p` and the
/// figure's world bounding-box size `e`.
///
/// Returns `None` for perforated tiles and unsupported angles. Raised floors
/// get an anchor even though they are not labelled by default.
pub fn label_anchor(
    kind: FigureKind,
    rotation: Rotation,
    p: Vec3,
    e: Vec3,
    floor_width: f32,
) -> Option<Vec3> {
    let turn = rotation.quarter();
    match kind {
        FigureKind::Rack => {
            let y = p.y + e.y + RACK_LABEL_LIFT;
            Some(match turn? {
                QuarterTurn::Deg0 => Vec3::new(p.x + e.x / 4.0, y, p.z - e.z / 4.0),
                QuarterTurn::Deg90 => Vec3::new(p.x - e.x / 8.0, y, p.z),
                QuarterTurn::Deg180 => Vec3::new(p.x + e.x / 8.0, y, p.z),
                QuarterTurn::Deg270 => Vec3::new(p.x + e.z / 10.0, y, p.z + e.x / 10.0),
            })
        }
        FigureKind::Cooler => {
            let y = p.y + e.y + COOLER_LABEL_LIFT;
            Some(match turn? {
                QuarterTurn::Deg0 => Vec3::new(p.x + e.x / 2.0, y, p.z - e.z / 2.0),
                QuarterTurn::Deg90 => Vec3::new(p.x - e.x / 2.0, y, p.z - e.z / 2.0),
                QuarterTurn::Deg180 => Vec3::new(p.x - e.x / 2.45, y, p.z + e.z / 2.0),
                QuarterTurn::Deg270 => Vec3::new(p.x + e.x / 2.0, y, p.z + e.z / 2.0),
            })
        }
        FigureKind::RaisedFloor => {
            turn?;
            Some(Vec3::new(
                p.x - e.x,
                p.y + e.y + RAISED_FLOOR_LABEL_LIFT,
                p.z + floor_width,
            ))
        }
        FigureKind::ElectricalPanel => {
            turn?;
            Some(Vec3::new(p.x, p.y + e.y - ELECTRICAL_PANEL_LABEL_DROP, p.z))
        }
        FigureKind::PerforatedTile => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rack_label_sits_above_the_box() {
        let a = label_anchor(
            FigureKind::Rack,
            Rotation::from_degrees(0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(4.0, 2.0, 8.0),
            10.0,
        );
        assert_eq!(a, Some(Vec3::new(2.0, 2.5, -1.0)));
    }

    #[test]
    fn no_label_for_tiles_or_odd_angles() {
        let p = Vec3::ZERO;
        let e = Vec3::ONE;
        assert_eq!(
            label_anchor(FigureKind::PerforatedTile, Rotation::default(), p, e, 1.0),
            None
        );
        assert_eq!(
            label_anchor(FigureKind::Cooler, Rotation::from_degrees(30.0), p, e, 1.0),
            None
        );
    }
}
