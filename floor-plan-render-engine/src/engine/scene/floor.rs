use bevy::prelude::*;
use floor_plan_layout::FloorSpec;

use super::colour::packed_colour;

#[derive(Component)]
pub struct FloorSurface;

/// Unlit double-sided plane centred on the origin.
pub fn spawn_floor(
    commands: &mut Commands,
    floor: &FloorSpec,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: packed_colour(floor.colour),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(floor.width, floor.length))),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        FloorSurface,
        Name::new("Floor"),
    ));
}
