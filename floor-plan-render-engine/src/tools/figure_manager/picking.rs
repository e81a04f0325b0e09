use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use floor_plan_layout::FigureId;
use floor_plan_layout::hit::{nearest_hit, ray_aabb_hit_t};

use super::state::{FigureLayout, TileHitBox};
use crate::engine::scene::floor::FloorSurface;
use crate::engine::scene::grid::GroundGrid;

/// Cast `ray` against every figure and resolve the nearest hit to its
/// figure id.
pub fn pick_figure(
    ray: Ray3d,
    ray_cast: &mut MeshRayCast,
    tiles: &Query<(Entity, &TileHitBox)>,
    scenery: &Query<(), Or<(With<FloorSurface>, With<GroundGrid>)>>,
    parents: &Query<&ChildOf>,
    layout: &FigureLayout,
) -> Option<FigureId> {
    let origin = ray.origin;
    let direction = ray.direction.as_vec3();

    let filter = |entity: Entity| !scenery.contains(entity) && !tiles.contains(entity);
    let settings = MeshRayCastSettings::default().with_filter(&filter);
    let mesh_hits: Vec<(Entity, f32)> = ray_cast
        .cast_ray(ray, &settings)
        .iter()
        .map(|(entity, hit)| (*entity, hit.distance))
        .collect();

    let tile_hits = tiles.iter().filter_map(|(entity, hit_box)| {
        ray_aabb_hit_t(origin, direction, hit_box.min, hit_box.max).map(|t| (entity, t))
    });

    let (hit, distance) = nearest_hit(mesh_hits.into_iter().chain(tile_hits))?;
    let id = layout.resolve_click(hit, |entity| parents.get(entity).ok().map(ChildOf::parent));
    match id {
        Some(id) => debug!("Picked figure {} at distance {:.2}", id, distance),
        None => debug!("Hit {:?} does not belong to a figure", hit),
    }
    id
}
