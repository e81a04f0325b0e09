/// Map a floor-local point (measured from the floor corner) into the world
/// XZ plane, where the floor is centred on the origin.
pub fn floor_local_to_world(x: f32, y: f32, floor_width: f32, floor_length: f32) -> (f32, f32) {
    (x - floor_width / 2.0, y - floor_length / 2.0)
}

/// Inverse of [`floor_local_to_world`]: world XZ back to floor-local tile coordinates.
pub fn world_to_floor_local(
    world_x: f32,
    world_z: f32,
    floor_width: f32,
    floor_length: f32,
) -> (f32, f32) {
    (world_x + floor_width / 2.0, world_z + floor_length / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_maps_to_negative_half_extent() {
        assert_eq!(floor_local_to_world(0.0, 0.0, 10.0, 8.0), (-5.0, -4.0));
        assert_eq!(world_to_floor_local(-5.0, -4.0, 10.0, 8.0), (0.0, 0.0));
    }
}
