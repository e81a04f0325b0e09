use glam::Vec2;
use serde::Serialize;

/// Screen rectangle occupied by the 3D view, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }

    /// Normalised device coordinates, or `None` for points outside the view
    /// (clicks on the side panel and the like).
    pub fn to_ndc(&self, point: Vec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 || !self.contains(point) {
            return None;
        }
        Some(Vec2::new(
            2.0 * (point.x - self.left) / self.width - 1.0,
            -(2.0 * (point.y - self.top) / self.height - 1.0),
        ))
    }

    /// Inverse of [`ViewportRect::to_ndc`].
    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.left + (ndc.x + 1.0) * 0.5 * self.width,
            self.top + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_and_corners_map_to_ndc() {
        let rect = ViewportRect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
        };
        assert_eq!(rect.to_ndc(Vec2::new(200.0, 100.0)), Some(Vec2::ZERO));
        assert_eq!(rect.to_ndc(Vec2::new(100.0, 50.0)), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(rect.to_ndc(Vec2::new(300.0, 150.0)), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(rect.from_ndc(Vec2::new(1.0, -1.0)), Vec2::new(300.0, 150.0));
    }

    #[test]
    fn points_outside_the_view_are_ignored() {
        let rect = ViewportRect {
            left: 0.0,
            top: 0.0,
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(rect.to_ndc(Vec2::new(900.0, 10.0)), None);
        assert_eq!(rect.to_ndc(Vec2::new(10.0, -1.0)), None);
    }
}
