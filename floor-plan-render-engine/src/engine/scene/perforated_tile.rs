use bevy::prelude::*;
use constants::placement::{FLOOR_CLEARANCE, PERFORATED_TILE_SIZE};
use constants::render_settings::PERFORATED_TILE_COLOUR;
use floor_plan_layout::grid::perforated_tile_lines;
use floor_plan_layout::{FigureKind, FigureRecord, FloorSpec};

use super::colour::packed_colour;
use super::grid::line_list_mesh;
use crate::tools::figure_manager::state::{FigureTag, TileHitBox};

pub fn create_tile_material(
    materials: &mut ResMut<Assets<StandardMaterial>>,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: packed_colour(PERFORATED_TILE_COLOUR),
        unlit: true,
        ..default()
    })
}

/// Line meshes are not ray-cast, so each tile carries a thin box in world
/// space for picking.
pub fn spawn_perforated_tile(
    commands: &mut Commands,
    record: &FigureRecord,
    floor: &FloorSpec,
    meshes: &mut ResMut<Assets<Mesh>>,
    material: &Handle<StandardMaterial>,
) -> Entity {
    let lines = perforated_tile_lines(record.position, floor);
    let base = floor.base_point(record.position);

    commands
        .spawn((
            Mesh3d(meshes.add(line_list_mesh(&lines))),
            MeshMaterial3d(material.clone()),
            Transform::IDENTITY,
            FigureTag {
                id: record.id,
                kind: FigureKind::PerforatedTile,
            },
            TileHitBox {
                min: Vec3::new(base.x, 0.0, base.y),
                max: Vec3::new(
                    base.x + PERFORATED_TILE_SIZE,
                    FLOOR_CLEARANCE * 2.0,
                    base.y + PERFORATED_TILE_SIZE,
                ),
            },
            Name::new(format!("Perforated tile {}", record.id)),
        ))
        .id()
}
