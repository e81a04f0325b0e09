use bevy::picking::mesh_picking::ray_cast::MeshRayCast;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::picking::pick_figure;
use super::state::*;
use crate::engine::camera::orbit_camera::{OrbitCamera, ViewportInset, view_rect};
use crate::engine::scene::floor::FloorSurface;
use crate::engine::scene::grid::GroundGrid;
use crate::rpc::web_rpc::WebRpcInterface;

// Selects the figure under the cursor on a left click that did not drag
pub fn select_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    orbit: Res<OrbitCamera>,
    inset: Res<ViewportInset>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut ray_cast: MeshRayCast,
    tiles: Query<(Entity, &TileHitBox)>,
    scenery: Query<(), Or<(With<FloorSurface>, With<GroundGrid>)>>,
    parents: Query<&ChildOf>,
    layout: Res<FigureLayout>,
    mut selection_events: EventWriter<SelectionRequest>,
) {
    if !buttons.just_released(MouseButton::Left) || !orbit.is_click() {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    // Clicks on the side panel never reach the scene.
    if view_rect(window, &inset).to_ndc(cursor_pos).is_none() {
        return;
    }
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };

    if let Some(id) = pick_figure(ray, &mut ray_cast, &tiles, &scenery, &parents, &layout) {
        selection_events.write(SelectionRequest::Select(id));
    }
}

// Deselect on Escape key press
pub fn deselect_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut selection_events: EventWriter<SelectionRequest>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        selection_events.write(SelectionRequest::Clear);
    }
}

/// Apply selection changes to the layout, the `Selected` marker and the host.
pub fn apply_selection_requests(
    mut requests: EventReader<SelectionRequest>,
    mut layout: ResMut<FigureLayout>,
    selected: Query<Entity, With<Selected>>,
    mut commands: Commands,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for request in requests.read() {
        match *request {
            SelectionRequest::Select(id) => {
                let node = match layout.select(id) {
                    Ok(figure) => {
                        info!(
                            "Selected figure {} ({}) '{}'",
                            id, figure.kind, figure.record.type_label
                        );
                        figure.node
                    }
                    Err(err) => {
                        warn!("{}", err);
                        continue;
                    }
                };
                clear_marker(&mut commands, &selected);
                commands.entity(node).insert(Selected);
                if let Some(payload) = selection_payload(&layout) {
                    rpc_interface.send_notification("figure_selected", payload);
                }
            }
            SelectionRequest::Clear => {
                clear_marker(&mut commands, &selected);
                if let Some(previous) = layout.clear_selection() {
                    debug!("Cleared selection of figure {}", previous);
                    rpc_interface.send_notification(
                        "selection_cleared",
                        serde_json::json!({ "id": previous }),
                    );
                }
            }
        }
    }
}

fn clear_marker(commands: &mut Commands, selected: &Query<Entity, With<Selected>>) {
    for entity in selected {
        commands.entity(entity).remove::<Selected>();
    }
}

/// Forward minimum floor size changes to the host page.
pub fn publish_floor_constraints(
    mut events: EventReader<FloorConstraintsChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    // Only the latest value matters.
    let Some(FloorConstraintsChanged(constraints)) = events.read().last().copied() else {
        return;
    };
    info!(
        "Floor constraints: min width {}, min length {}",
        constraints.min_width, constraints.min_length
    );
    rpc_interface.send_notification(
        "floor_constraints_changed",
        serde_json::json!({
            "min_width": constraints.min_width,
            "min_length": constraints.min_length,
        }),
    );
}
