//! Line geometry for the floor grid and perforated tiles.
//!
//! Lines are generated with integer stepping so a long floor never drifts
//! from accumulated float error.

use glam::{Vec2, Vec3};

use crate::floor::FloorSpec;
use constants::placement::{
    FLOOR_CLEARANCE, GRID_LINE_STEP, GRID_OFFSET_DIVISOR, PERFORATED_TILE_LINE_SPACING,
    PERFORATED_TILE_LINES_PER_AXIS, PERFORATED_TILE_SIZE,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
}

/// Offsets `first, first + step, ...` up to and including `limit`.
fn stepped_offsets(first: f32, step: f32, limit: f32) -> impl Iterator<Item = f32> {
    let count = if first.is_finite() && limit.is_finite() && step > 0.0 && first <= limit {
        ((limit - first) / step).floor() as u32 + 1
    } else {
        0
    };
    (0..count).map(move |k| first + k as f32 * step)
}

/// Vertical lines at `x = i - W/2` for `i = gridx/60, gridx/60 + 1, ... <= W`
/// and horizontal lines at `z = j - L/2` likewise, all at floor clearance.
pub fn floor_grid_lines(floor: &FloorSpec) -> Vec<LineSegment> {
    let (half_w, half_l) = (floor.width / 2.0, floor.length / 2.0);
    let first_x = floor.grid_x / GRID_OFFSET_DIVISOR;
    let first_y = floor.grid_y / GRID_OFFSET_DIVISOR;

    let vertical = stepped_offsets(first_x, GRID_LINE_STEP, floor.width).map(|i| LineSegment {
        start: Vec3::new(i - half_w, FLOOR_CLEARANCE, -half_l),
        end: Vec3::new(i - half_w, FLOOR_CLEARANCE, half_l),
    });
    let horizontal =
        stepped_offsets(first_y, GRID_LINE_STEP, floor.length).map(|j| LineSegment {
            start: Vec3::new(-half_w, FLOOR_CLEARANCE, j - half_l),
            end: Vec3::new(half_w, FLOOR_CLEARANCE, j - half_l),
        });

    vertical.chain(horizontal).collect()
}

/// Cross-hatch for one perforated tile at floor-local `position`.
pub fn perforated_tile_lines(position: Vec2, floor: &FloorSpec) -> Vec<LineSegment> {
    let base = floor.base_point(position);
    let offsets =
        (0..PERFORATED_TILE_LINES_PER_AXIS).map(|k| k as f32 * PERFORATED_TILE_LINE_SPACING);

    let mut lines = Vec::with_capacity(2 * PERFORATED_TILE_LINES_PER_AXIS as usize);
    for offset in offsets {
        lines.push(LineSegment {
            start: Vec3::new(base.x + offset, FLOOR_CLEARANCE, base.y),
            end: Vec3::new(base.x + offset, FLOOR_CLEARANCE, base.y + PERFORATED_TILE_SIZE),
        });
        lines.push(LineSegment {
            start: Vec3::new(base.x, FLOOR_CLEARANCE, base.y + offset),
            end: Vec3::new(base.x + PERFORATED_TILE_SIZE, FLOOR_CLEARANCE, base.y + offset),
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_starts_at_offset_and_stops_at_floor_edge() {
        let mut floor = FloorSpec::new(4.0, 2.0);
        floor.grid_x = 30.0;
        floor.grid_y = 0.0;
        let lines = floor_grid_lines(&floor);
        // x: 0.5, 1.5, 2.5, 3.5; y: 0, 1, 2
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0].start, Vec3::new(-1.5, FLOOR_CLEARANCE, -1.0));
        assert_eq!(lines[3].start.x, 1.5);
        assert_eq!(lines[6].start.z, 1.0);
    }

    #[test]
    fn long_floor_has_exact_line_count() {
        let floor = FloorSpec::new(1000.0, 1.0);
        let vertical = floor_grid_lines(&floor)
            .into_iter()
            .filter(|l| l.start.z != l.end.z)
            .count();
        assert_eq!(vertical, 1001);
    }

    #[test]
    fn perforated_tile_has_eleven_lines_each_way() {
        let floor = FloorSpec::new(10.0, 10.0);
        let lines = perforated_tile_lines(Vec2::new(1.0, 1.0), &floor);
        assert_eq!(lines.len(), 22);
        assert!(lines.iter().all(|l| l.start.y == FLOOR_CLEARANCE));
        let max_x = lines.iter().map(|l| l.end.x).fold(f32::MIN, f32::max);
        assert!((max_x - (-3.0)).abs() < 1e-5);
    }
}
