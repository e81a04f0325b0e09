use bevy::prelude::*;
use constants::render_settings::rgb_bytes;

/// Packed `0xRRGGBB` to a Bevy colour.
pub fn packed_colour(colour: u32) -> Color {
    let [r, g, b] = rgb_bytes(colour);
    Color::srgb_u8(r, g, b)
}

/// Base colour override for every material in a figure's scene.
#[derive(Component, Debug, Clone, Copy)]
pub struct ColourOverride(pub u32);

#[derive(Component)]
pub struct ColourApplied;

/// glTF scenes spawn their meshes a few frames after the root, so the
/// override is retried until the figure has material-carrying descendants.
/// Materials are cloned so figures sharing an asset keep their own colour.
pub fn apply_colour_overrides(
    mut commands: Commands,
    figures: Query<(Entity, &ColourOverride), Without<ColourApplied>>,
    children: Query<&Children>,
    mut mesh_materials: Query<&mut MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, colour) in &figures {
        let mut applied = false;
        for descendant in children.iter_descendants(entity) {
            let Ok(mut mesh_material) = mesh_materials.get_mut(descendant) else {
                continue;
            };
            let Some(source) = materials.get(&mesh_material.0) else {
                continue;
            };
            let mut material = source.clone();
            material.base_color = packed_colour(colour.0);
            mesh_material.0 = materials.add(material);
            applied = true;
        }
        if applied {
            commands.entity(entity).insert(ColourApplied);
        }
    }
}
