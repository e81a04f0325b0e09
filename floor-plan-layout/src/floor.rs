use constants::coordinate_system::{floor_local_to_world, world_to_floor_local};
use constants::render_settings::DEFAULT_FLOOR_COLOUR;
use glam::{Vec2, Vec3};
use serde::Serialize;

/// Floor dimensions and appearance; immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorSpec {
    pub id: Option<i64>,
    pub name: String,
    pub site_name: String,
    pub width: f32,
    pub length: f32,
    /// Packed `0xRRGGBB`.
    pub colour: u32,
    pub grid_x: f32,
    pub grid_y: f32,
}

impl FloorSpec {
    pub fn new(width: f32, length: f32) -> Self {
        Self {
            id: None,
            name: String::new(),
            site_name: String::new(),
            width,
            length,
            colour: DEFAULT_FLOOR_COLOUR,
            grid_x: 0.0,
            grid_y: 0.0,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.length)
    }

    /// Base point of a floor-local position: `(x - W/2, y - L/2)` on world XZ.
    pub fn base_point(&self, local: Vec2) -> Vec2 {
        let (x, z) = floor_local_to_world(local.x, local.y, self.width, self.length);
        Vec2::new(x, z)
    }

    /// Floor-local tile coordinates of a world point on the floor plane.
    pub fn tile_at(&self, world: Vec3) -> Vec2 {
        let (x, y) = world_to_floor_local(world.x, world.z, self.width, self.length);
        Vec2::new(x, y)
    }
}

/// Parse a colour as stored by the floor form: hex digits with an optional `#`.
pub fn parse_hex_colour(raw: &str) -> Option<u32> {
    let digits = raw.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colour_with_or_without_hash() {
        assert_eq!(parse_hex_colour("a0b0c0"), Some(0xa0b0c0));
        assert_eq!(parse_hex_colour("#a0b0c0"), Some(0xa0b0c0));
        assert_eq!(parse_hex_colour("zzz"), None);
    }

    #[test]
    fn tile_inverts_base_point() {
        let floor = FloorSpec::new(20.0, 10.0);
        let base = floor.base_point(Vec2::new(3.0, 4.0));
        assert_eq!(base, Vec2::new(-7.0, -1.0));
        assert_eq!(
            floor.tile_at(Vec3::new(base.x, 0.0, base.y)),
            Vec2::new(3.0, 4.0)
        );
    }
}
