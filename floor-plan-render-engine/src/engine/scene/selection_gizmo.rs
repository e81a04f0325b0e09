use bevy::prelude::*;
use constants::render_settings::SELECTION_COLOUR;

use super::colour::packed_colour;
use crate::tools::figure_manager::state::{FigureBounds, Selected, TileHitBox};

/// Outline the selected figure's box: the asset's native bounds under its
/// placed transform, or the tile's pick box.
pub fn draw_selection_gizmo(
    mut gizmos: Gizmos,
    figures: Query<(&GlobalTransform, &FigureBounds), With<Selected>>,
    tiles: Query<&TileHitBox, With<Selected>>,
) {
    let colour = packed_colour(SELECTION_COLOUR);

    for (transform, bounds) in &figures {
        let local = Transform::from_translation(bounds.native.center())
            .with_scale(bounds.native.extent());
        gizmos.cuboid(*transform * local, colour);
    }

    for tile in &tiles {
        let center = (tile.min + tile.max) * 0.5;
        let size = tile.max - tile.min;
        gizmos.cuboid(Transform::from_translation(center).with_scale(size), colour);
    }
}
