use bevy::prelude::*;
use floor_plan_layout::backend::delete_figure;

use super::state::*;
use crate::rpc::backend::BackendDispatch;
use crate::rpc::host;
use crate::rpc::web_rpc::WebRpcInterface;

pub fn delete_on_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut delete_events: EventWriter<DeleteSelectedRequest>,
) {
    if keyboard.just_pressed(KeyCode::Delete) {
        delete_events.write(DeleteSelectedRequest { confirmed: None });
    }
}

/// Remove the selected figure from the scene, the layout and the backend.
pub fn handle_delete_requests(
    mut requests: EventReader<DeleteSelectedRequest>,
    mut layout: ResMut<FigureLayout>,
    mut commands: Commands,
    mut backend: EventWriter<BackendDispatch>,
    mut constraints_changed: EventWriter<FloorConstraintsChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for request in requests.read() {
        let Some(figure) = layout.selected() else {
            host::alert("Please select a figure to delete.");
            continue;
        };
        let id = figure.id();

        let confirmed = request.confirmed.unwrap_or_else(|| {
            host::confirm(&format!(
                "Delete the selected figure {}?",
                figure.record.type_label
            ))
        });
        if !confirmed {
            debug!("Delete of figure {} cancelled", id);
            continue;
        }

        let removed = match layout.remove(id) {
            Ok(removed) => removed,
            Err(err) => {
                error!("Failed to delete figure {}: {}", id, err);
                continue;
            }
        };

        commands.entity(removed.figure.node).despawn();
        if let Some(label) = removed.label {
            commands.entity(label).despawn();
        }

        backend.write(BackendDispatch(delete_figure(id)));
        constraints_changed.write(FloorConstraintsChanged(removed.constraints));
        rpc_interface.send_notification(
            "figure_deleted",
            serde_json::json!({
                "figure": figure_summary(&removed.figure),
                "constraints": removed.constraints,
            }),
        );
    }
}
