use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::view::NoFrustumCulling;
use constants::render_settings::GRID_LINE_COLOUR;
use floor_plan_layout::FloorSpec;
use floor_plan_layout::grid::{LineSegment, floor_grid_lines};

use super::colour::packed_colour;

#[derive(Component)]
pub struct GroundGrid;

/// Pack line segments into one line-list mesh.
pub fn line_list_mesh(lines: &[LineSegment]) -> Mesh {
    let positions: Vec<[f32; 3]> = lines
        .iter()
        .flat_map(|line| [line.start.to_array(), line.end.to_array()])
        .collect();

    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

pub fn spawn_floor_grid(
    commands: &mut Commands,
    floor: &FloorSpec,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let lines = floor_grid_lines(floor);
    debug!("Floor grid: {} lines", lines.len());

    let grid_material = materials.add(StandardMaterial {
        base_color: packed_colour(GRID_LINE_COLOUR),
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(line_list_mesh(&lines))),
        MeshMaterial3d(grid_material),
        Visibility::Visible,
        NoFrustumCulling,
        Transform::IDENTITY,
        GroundGrid,
        Name::new("FloorGrid"),
    ));
}
