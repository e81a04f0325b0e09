use glam::Vec2;
use serde::Serialize;

use crate::figure::FigureRecord;

/// Running maximum of every placed figure's footprint, measured from the
/// floor origin corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OccupiedBounds {
    pub max_x: f32,
    pub max_y: f32,
}

impl OccupiedBounds {
    /// Grow to contain `corner`. Returns whether anything changed.
    pub fn include(&mut self, corner: Vec2) -> bool {
        let mut changed = false;
        if corner.x > self.max_x {
            self.max_x = corner.x;
            changed = true;
        }
        if corner.y > self.max_y {
            self.max_y = corner.y;
            changed = true;
        }
        changed
    }

    pub fn include_record(&mut self, record: &FigureRecord) -> bool {
        self.include(record.footprint_max())
    }

    /// Recompute from zero over stored records.
    pub fn rescan<'a>(records: impl IntoIterator<Item = &'a FigureRecord>) -> Self {
        let mut bounds = Self::default();
        for record in records {
            bounds.include_record(record);
        }
        bounds
    }

    pub fn constraints(&self) -> FloorConstraints {
        FloorConstraints {
            min_width: self.max_x,
            min_length: self.max_y,
        }
    }
}

/// Smallest floor the current layout fits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FloorConstraints {
    pub min_width: f32,
    pub min_length: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_reports_growth_only() {
        let mut b = OccupiedBounds::default();
        assert!(b.include(Vec2::new(3.0, 1.0)));
        assert!(!b.include(Vec2::new(2.0, 1.0)));
        assert!(b.include(Vec2::new(2.0, 4.0)));
        assert_eq!(
            b.constraints(),
            FloorConstraints {
                min_width: 3.0,
                min_length: 4.0
            }
        );
    }

    #[test]
    fn negative_corners_never_shrink_below_zero() {
        let mut b = OccupiedBounds::default();
        assert!(!b.include(Vec2::new(-1.0, -2.0)));
        assert_eq!(b, OccupiedBounds::default());
    }
}
