use std::collections::HashMap;

use bevy::asset::LoadState;
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;

use crate::engine::core::settings::ViewerSettings;
use crate::engine::loading::gltf_bounds::gltf_native_bounds;
use crate::engine::scene::colour::ColourOverride;
use crate::engine::scene::labels::spawn_figure_label;
use crate::tools::figure_manager::state::{
    FigureBounds, FigureLayout, FigureTag, FloorConstraintsChanged,
};
use constants::path::model_path;
use floor_plan_layout::label::label_anchor;
use floor_plan_layout::placement::PointBounds;
use floor_plan_layout::{FigureKind, FigureRecord, PlacedFigure, PlacementQuality, place_figure};

/// Asset figures waiting for their glTF.
#[derive(Resource, Default)]
pub struct FigureQueue {
    /// Parsed but not yet requested.
    pub queued: Vec<FigureRecord>,
    /// Requested; placed once the kind's asset is ready.
    loading: Vec<FigureRecord>,
    reported: bool,
}

struct KindAsset {
    gltf: Handle<Gltf>,
    /// Measured once per kind, on first completed load.
    native_bounds: Option<PointBounds>,
    failed: bool,
}

/// One glTF per figure kind, shared by every figure of that kind.
#[derive(Resource, Default)]
pub struct FigureAssetCache {
    assets: HashMap<FigureKind, KindAsset>,
}

impl FigureAssetCache {
    fn request(&mut self, kind: FigureKind, asset_server: &AssetServer) {
        self.assets.entry(kind).or_insert_with(|| {
            let path = model_path(kind.name());
            info!("Loading {} asset from: {}", kind, path);
            KindAsset {
                gltf: asset_server.load(path),
                native_bounds: None,
                failed: false,
            }
        });
    }
}

enum AssetStatus {
    Loading,
    Ready(Handle<Scene>, PointBounds),
    Failed,
}

/// Start loads for queued figures, one request per kind.
pub fn request_figure_assets(
    mut queue: ResMut<FigureQueue>,
    mut cache: ResMut<FigureAssetCache>,
    mut layout: ResMut<FigureLayout>,
    asset_server: Res<AssetServer>,
) {
    if queue.queued.is_empty() {
        return;
    }

    let queued = std::mem::take(&mut queue.queued);
    for record in queued {
        let kind = match record.kind() {
            Ok(kind) => kind,
            Err(err) => {
                error!("Skipping figure: {}", err);
                continue;
            }
        };
        if !layout.begin_load(record.id) {
            warn!("Figure {} is already loading or placed", record.id);
            continue;
        }
        cache.request(kind, &asset_server);
        queue.loading.push(record);
    }
}

fn asset_status(
    kind_asset: &mut KindAsset,
    kind: FigureKind,
    asset_server: &AssetServer,
    gltfs: &Assets<Gltf>,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
) -> AssetStatus {
    if kind_asset.failed {
        return AssetStatus::Failed;
    }
    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&kind_asset.gltf) {
        error!("Failed to load {} asset: {}", kind, err);
        kind_asset.failed = true;
        return AssetStatus::Failed;
    }
    if !asset_server.is_loaded_with_dependencies(&kind_asset.gltf) {
        return AssetStatus::Loading;
    }
    let Some(gltf) = gltfs.get(&kind_asset.gltf) else {
        return AssetStatus::Loading;
    };
    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        error!("{} asset has no scene", kind);
        kind_asset.failed = true;
        return AssetStatus::Failed;
    };

    if kind_asset.native_bounds.is_none() {
        kind_asset.native_bounds = gltf_native_bounds(gltf, nodes, gltf_meshes, meshes);
        match kind_asset.native_bounds {
            Some(bounds) => debug!("{} asset native extent: {:?}", kind, bounds.extent()),
            None => {
                error!("{} asset has no mesh geometry", kind);
                kind_asset.failed = true;
                return AssetStatus::Failed;
            }
        }
    }

    match kind_asset.native_bounds {
        Some(bounds) => AssetStatus::Ready(scene, bounds),
        None => AssetStatus::Loading,
    }
}

/// Place every loading figure whose asset is ready.
///
/// A completion is discarded when the figure is no longer pending in the
/// layout, e.g. it was removed while its asset was still loading.
pub fn place_loaded_figures(
    mut commands: Commands,
    mut queue: ResMut<FigureQueue>,
    mut cache: ResMut<FigureAssetCache>,
    mut layout: ResMut<FigureLayout>,
    settings: Res<ViewerSettings>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    meshes: Res<Assets<Mesh>>,
    mut constraints_events: EventWriter<FloorConstraintsChanged>,
) {
    if queue.loading.is_empty() {
        if !queue.reported && queue.queued.is_empty() && layout.pending_count() == 0 {
            queue.reported = true;
            info!("✓ All figures loaded: {} placed", layout.figures().len());
        }
        return;
    }

    let loading = std::mem::take(&mut queue.loading);
    let mut grew = false;

    for record in loading {
        if !layout.is_pending(record.id) {
            debug!("Dropping figure {} (no longer pending)", record.id);
            continue;
        }
        let Ok(kind) = record.kind() else {
            layout.cancel_load(record.id);
            continue;
        };
        let Some(kind_asset) = cache.assets.get_mut(&kind) else {
            layout.cancel_load(record.id);
            continue;
        };

        let status = asset_status(
            kind_asset,
            kind,
            &asset_server,
            &gltfs,
            &nodes,
            &gltf_meshes,
            &meshes,
        );
        let (scene, native_bounds) = match status {
            AssetStatus::Loading => {
                queue.loading.push(record);
                continue;
            }
            AssetStatus::Failed => {
                warn!("Skipping figure {} ({}): asset unavailable", record.id, kind);
                layout.cancel_load(record.id);
                continue;
            }
            AssetStatus::Ready(scene, bounds) => (scene, bounds),
        };
        let native_extent = native_bounds.extent();

        if !layout.complete_load(record.id) {
            continue;
        }

        let placement = match place_figure(&record, layout.floor(), native_extent) {
            Ok(placement) => placement,
            Err(err) => {
                error!("Skipping figure: {}", err);
                continue;
            }
        };

        let mut entity_commands = commands.spawn((
            SceneRoot(scene),
            Transform {
                translation: placement.translation,
                rotation: Quat::from_rotation_y(placement.rotation_y),
                scale: placement.scale,
            },
            FigureTag {
                id: record.id,
                kind,
            },
            FigureBounds {
                native: native_bounds,
            },
            Name::new(format!("Figure {} ({})", record.id, record.type_label)),
        ));
        match record.colour_rgb() {
            Ok(Some(colour)) => {
                entity_commands.insert(ColourOverride(colour));
            }
            Ok(None) => {}
            Err(raw) => warn!(
                "Figure {} colour '{}' is not a hex colour, keeping the asset colours",
                record.id, raw
            ),
        }
        let entity = entity_commands.id();

        let anchor = label_anchor(
            kind,
            record.rotation,
            placement.translation,
            placement.world_extent(native_extent),
            layout.floor().width,
        );
        let type_label = record.type_label.clone();
        let id = record.id;

        match layout.insert_placed(PlacedFigure {
            record,
            kind,
            placement: Some(placement),
            node: entity,
        }) {
            Ok(changed) => grew |= changed,
            Err(err) => {
                warn!("{}", err);
                commands.entity(entity).despawn();
                continue;
            }
        }

        if let PlacementQuality::UnsupportedAngle(angle) = placement.quality {
            warn!("Figure {} placed without correction at {} degrees", id, angle);
        } else {
            info!("Placed figure {} ({}) '{}'", id, kind, type_label);
        }

        if settings.labels_enabled && kind.shows_label() {
            if let Some(anchor) = anchor {
                let label = spawn_figure_label(&mut commands, id, &type_label, anchor);
                if let Ok(Some(previous)) = layout.attach_label(id, label) {
                    commands.entity(previous).despawn();
                }
            }
        }
    }

    if grew {
        constraints_events.write(FloorConstraintsChanged(layout.constraints()));
    }
}
