use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::floor_document::FloorDocument;
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::core::app_state::AppState;
use crate::engine::core::settings::ViewerSettings;
use crate::engine::loading::figure_loader::FigureQueue;
use crate::engine::scene::floor::spawn_floor;
use crate::engine::scene::grid::spawn_floor_grid;
use crate::engine::scene::perforated_tile::{create_tile_material, spawn_perforated_tile};
use crate::tools::figure_manager::state::{FigureLayout, FloorConstraintsChanged};
use floor_plan_layout::host_data::HostDataBlock;
use floor_plan_layout::{FigureKind, PlacedFigure, SceneLayout};

/// Where the host data block comes from and whether it was consumed.
#[derive(Resource, Default)]
pub struct FloorDataLoader {
    handle: Option<Handle<FloorDocument>>,
    inline: Option<String>,
    finished: bool,
}

// Start the loading process
pub fn start_loading(
    mut loader: ResMut<FloorDataLoader>,
    asset_server: Res<AssetServer>,
    settings: Res<ViewerSettings>,
) {
    #[cfg(target_arch = "wasm32")]
    {
        use crate::rpc::host::read_floor_data_element;
        use constants::path::FLOOR_DATA_ELEMENT_ID;

        if let Some(json) = read_floor_data_element() {
            info!("Reading floor data from #{}", FLOOR_DATA_ELEMENT_ID);
            loader.inline = Some(json);
            return;
        }
        warn!(
            "No #{} element on the page, falling back to {}",
            FLOOR_DATA_ELEMENT_ID, settings.floor_data_path
        );
    }

    info!("Loading floor data from: {}", settings.floor_data_path);
    loader.handle = Some(asset_server.load(settings.floor_data_path.clone()));
}

/// Pull the block from whichever source is active. `None` while still loading.
fn poll_floor_data(
    loader: &mut FloorDataLoader,
    documents: &Assets<FloorDocument>,
    asset_server: &AssetServer,
) -> Option<Result<HostDataBlock, String>> {
    if let Some(json) = loader.inline.take() {
        return Some(HostDataBlock::parse(&json).map_err(|e| e.to_string()));
    }

    let handle = loader.handle.as_ref()?;
    if let Some(document) = documents.get(handle) {
        return Some(Ok(document.0.clone()));
    }
    match asset_server.get_load_state(handle) {
        Some(LoadState::Failed(err)) => Some(Err(err.to_string())),
        _ => None,
    }
}

/// Build the floor, grid and perforated tiles once the host data block is
/// available, queue the asset figures and switch to `AppState::Running`.
///
/// Unusable floor data is logged and the viewer stays in `Loading`.
pub fn build_floor_when_ready(
    mut commands: Commands,
    mut loader: ResMut<FloorDataLoader>,
    documents: Res<Assets<FloorDocument>>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut queue: ResMut<FigureQueue>,
    mut orbit: ResMut<OrbitCamera>,
    mut constraints_events: EventWriter<FloorConstraintsChanged>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loader.finished {
        return;
    }

    let Some(polled) = poll_floor_data(&mut loader, &documents, &asset_server) else {
        return;
    };
    loader.finished = true;

    let block = match polled {
        Ok(block) => block,
        Err(err) => {
            error!("Failed to load floor data: {}", err);
            return;
        }
    };
    let floor = match block.floor_spec() {
        Ok(floor) => floor,
        Err(err) => {
            error!("{}", err);
            return;
        }
    };

    info!(
        "✓ Floor '{}' ({} x {}) with {} figure records",
        floor.name,
        floor.width,
        floor.length,
        block.figures.len()
    );

    spawn_floor(&mut commands, &floor, &mut meshes, &mut materials);
    spawn_floor_grid(&mut commands, &floor, &mut meshes, &mut materials);
    orbit.frame_floor(floor.width, floor.length);

    let mut layout = SceneLayout::new(floor.clone());
    let tile_material = create_tile_material(&mut materials);

    for record in block.figure_records() {
        let kind = match record.validate() {
            Ok(kind) => kind,
            Err(err) => {
                error!("Skipping figure: {}", err);
                continue;
            }
        };

        if kind != FigureKind::PerforatedTile {
            queue.queued.push(record);
            continue;
        }

        let entity =
            spawn_perforated_tile(&mut commands, &record, &floor, &mut meshes, &tile_material);
        let id = record.id;
        if let Err(err) = layout.insert_placed(PlacedFigure {
            record,
            kind,
            placement: None,
            node: entity,
        }) {
            warn!("{}", err);
            commands.entity(entity).despawn();
        } else {
            debug!("Placed perforated tile {}", id);
        }
    }

    constraints_events.write(FloorConstraintsChanged(layout.constraints()));
    commands.insert_resource(FigureLayout(layout));
    next_state.set(AppState::Running);
}
