use bevy::prelude::*;
use floor_plan_layout::backend::{edit_figure, rack_page_path};

use super::state::*;
use crate::rpc::backend::BackendDispatch;
use crate::rpc::host;
use crate::rpc::web_rpc::WebRpcInterface;

/// Validate, confirm and persist an edit of the selected figure. The page
/// reloads once the backend accepts it.
pub fn handle_save_edit_requests(
    mut requests: EventReader<SaveEditRequest>,
    layout: Res<FigureLayout>,
    mut backend: EventWriter<BackendDispatch>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for request in requests.read() {
        let Some(figure) = layout.selected() else {
            host::alert("Please select a figure to edit.");
            continue;
        };
        let id = figure.id();

        // Re-validated here; the draft may have been queued before a floor change.
        let backend_request = match edit_figure(id, &request.draft, layout.floor()) {
            Ok(backend_request) => backend_request,
            Err(err) => {
                warn!("Edit of figure {} rejected: {}", id, err);
                rpc_interface.send_notification(
                    "edit_validation",
                    serde_json::json!({
                        "id": id,
                        "validation": request.draft.validate(layout.floor()),
                    }),
                );
                continue;
            }
        };

        let confirmed = request.confirmed.unwrap_or_else(|| {
            host::confirm(&format!(
                "Update the selected figure '{}'?",
                figure.record.type_label
            ))
        });
        if !confirmed {
            debug!("Edit of figure {} cancelled", id);
            continue;
        }

        info!("Saving edit of figure {} ({})", id, figure.kind);
        backend.write(BackendDispatch(backend_request));
    }
}

/// Open the rack management page for the selected rack.
pub fn handle_view_rack_requests(
    mut requests: EventReader<ViewRackRequest>,
    layout: Res<FigureLayout>,
) {
    for _ in requests.read() {
        let Some(figure) = layout.selected() else {
            host::alert("Please select a figure to view.");
            continue;
        };
        match rack_page_path(layout.floor(), &figure.record) {
            Some(path) => host::navigate(&path),
            None => warn!("Figure {} is not a rack", figure.id()),
        }
    }
}
