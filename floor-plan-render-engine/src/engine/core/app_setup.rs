use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::assets::floor_document::FloorDocument;
use crate::engine::camera::orbit_camera::{
    OrbitCamera, ViewportInset, orbit_camera_controller, report_pointer_tile, spawn_orbit_camera,
};
use crate::engine::core::app_state::{AppState, log_state_transitions};
use crate::engine::core::settings::ViewerSettings;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::figure_loader::{
    FigureAssetCache, FigureQueue, place_loaded_figures, request_figure_assets,
};
use crate::engine::loading::floor_data_loader::{
    FloorDataLoader, build_floor_when_ready, start_loading,
};
use crate::engine::scene::colour::apply_colour_overrides;
use crate::engine::scene::labels::update_label_positions;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::selection_gizmo::draw_selection_gizmo;
// Crate tools modules
use crate::tools::figure_manager::FigureManagerPlugin;
// Host bridge modules
use crate::rpc::backend::BackendPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers the host data block as a loadable asset type for native builds.
        .add_plugins(JsonAssetPlugin::<FloorDocument>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(BackendPlugin)
        .add_plugins(FigureManagerPlugin);

    // Initialise resources early
    app.init_resource::<ViewerSettings>()
        .init_resource::<FloorDataLoader>()
        .init_resource::<FigureAssetCache>()
        .init_resource::<FigureQueue>()
        .init_resource::<OrbitCamera>()
        .init_resource::<ViewportInset>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            build_floor_when_ready.run_if(in_state(AppState::Loading)),
        )
        .add_systems(Update, log_state_transitions);

    let runtime_systems = (
        (request_figure_assets, place_loaded_figures).chain(),
        apply_colour_overrides,
        orbit_camera_controller,
        report_pointer_tile,
        update_label_positions.after(orbit_camera_controller),
        draw_selection_gizmo,
    );

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_orbit_camera(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
