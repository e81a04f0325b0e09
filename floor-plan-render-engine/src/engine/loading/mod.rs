//! Floor data and figure asset loading.
//!
//! Loading runs in two phases. While `AppState::Loading`, the host data block
//! is read, the floor, grid and perforated tiles are built and every asset
//! figure is queued. Once `AppState::Running`, figure assets stream in and are
//! placed as soon as their glTF and its dependencies are ready.
//!
//! ```text
//! start_loading ──> build_floor_when_ready ──> AppState::Running
//!                                                   │
//!                     request_figure_assets ────────┤  begin_load(id)
//!                     place_loaded_figures  ────────┘  complete_load(id) -> spawn
//! ```

/// Host data block reading and floor scene construction.
pub mod floor_data_loader;

/// Per-kind glTF loading, placement and spawning of asset figures.
pub mod figure_loader;

/// Native bounding box of a loaded glTF scene.
pub mod gltf_bounds;
