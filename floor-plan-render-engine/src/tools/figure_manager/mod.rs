//! Figure selection, deletion and editing.
//!
//! ## Selection
//!
//! A left click that did not drag the camera casts a ray through the cursor.
//! Asset meshes are ray-cast against their triangles, perforated tiles
//! against their pick boxes; the nearest hit wins. The hit entity is then
//! walked up through `ChildOf` until it reaches a figure root, so a click on
//! any primitive of a multi-part asset selects the same figure.
//!
//! ```text
//! click ──> pick_figure() ──> SelectionRequest::Select(id)
//! RPC   ──────────────────────┘        │
//!                                      └─> apply_selection_requests()
//!                                           ├─> SceneLayout::select
//!                                           ├─> Selected marker moves
//!                                           └─> figure_selected notification
//! ```
//!
//! Clicking empty space keeps the current selection; `Escape` or the
//! `clear_selection` request clears it.
//!
//! ## Deletion
//!
//! The figure and its label are despawned, the layout re-scans the occupied
//! bounds, the new minimum floor size is published and the backend is told.
//!
//! ## Editing
//!
//! Drafts are validated against the floor before anything is sent. A valid
//! save is confirmed, persisted and followed by a page reload.

/// Delete requests for the selected figure.
pub mod deletion;

/// Save requests for edits of the selected figure, and rack navigation.
pub mod edit;

/// UI button interactions for the side panel (native only).
pub mod interactions;

/// Ray picking against figure meshes and perforated tiles.
pub mod picking;

/// Click and keyboard selection, and selection bookkeeping.
pub mod selection;

/// Resources, events and components shared by the figure manager.
pub mod state;

/// Side panel spawning and refresh (native only).
pub mod ui;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;

use deletion::{delete_on_key, handle_delete_requests};
use edit::{handle_save_edit_requests, handle_view_rack_requests};
use selection::{apply_selection_requests, deselect_on_escape, select_on_click};
use state::{
    DeleteSelectedRequest, FigureManagerUiState, FloorConstraintsChanged, SaveEditRequest,
    SelectionRequest, ViewRackRequest,
};

#[cfg(not(target_arch = "wasm32"))]
use interactions::{
    clear_selection_button_interaction, collapse_button_interaction, delete_button_interaction,
    view_rack_button_interaction,
};
#[cfg(not(target_arch = "wasm32"))]
use ui::{apply_collapse_state, reflect_constraints, reflect_selection, spawn_figure_manager_ui};

/// Registers the figure manager resources, events and systems.
pub struct FigureManagerPlugin;

impl Plugin for FigureManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FigureManagerUiState>()
            .add_event::<FloorConstraintsChanged>()
            .add_event::<SelectionRequest>()
            .add_event::<DeleteSelectedRequest>()
            .add_event::<SaveEditRequest>()
            .add_event::<ViewRackRequest>()
            .add_systems(Update, selection::publish_floor_constraints)
            .add_systems(
                Update,
                (
                    // World
                    select_on_click,
                    deselect_on_escape,
                    delete_on_key,
                    apply_selection_requests,
                    handle_delete_requests,
                    handle_save_edit_requests,
                    handle_view_rack_requests,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );

        // Side panel only for native builds.
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(Startup, spawn_figure_manager_ui).add_systems(
                Update,
                (
                    // Native Only UI
                    collapse_button_interaction,
                    apply_collapse_state,
                    delete_button_interaction,
                    view_rack_button_interaction,
                    clear_selection_button_interaction,
                    reflect_selection,
                    reflect_constraints,
                ),
            );
        }
    }
}
