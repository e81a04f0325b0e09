use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use floor_plan_layout::backend::{add_figure, update_floor};
use floor_plan_layout::forms::{
    AddFigureDraft, FigureDraft, FloorResizeDraft, add_figure_defaults,
};
use floor_plan_layout::{FigureId, FigureKind, SceneLayout};
use serde::{Deserialize, Serialize};

use crate::rpc::backend::BackendDispatch;
use crate::tools::figure_manager::state::{
    DeleteSelectedRequest, FigureLayout, SaveEditRequest, SelectionRequest, ViewRackRequest,
    figure_summary, selection_payload,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the RPC layer between the viewer and its embedding page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available"),
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Requests that change the scene are forwarded to the figure manager.
#[derive(SystemParam)]
struct RpcActions<'w> {
    selection: EventWriter<'w, SelectionRequest>,
    delete: EventWriter<'w, DeleteSelectedRequest>,
    save_edit: EventWriter<'w, SaveEditRequest>,
    view_rack: EventWriter<'w, ViewRackRequest>,
    backend: EventWriter<'w, BackendDispatch>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    layout: Option<Res<FigureLayout>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut actions: RpcActions,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Processing method: {}", request.method)
                    }),
                );

                let layout = layout.as_deref().map(|l| &l.0);
                if let Some(response) = handle_rpc_request(&request, layout, &mut actions) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("RPC parse error: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
                // The id cannot be recovered from an unparseable request.
                rpc_interface.queue_response(create_error_response(
                    serde_json::Value::Null,
                    -32600,
                    "Invalid request",
                    Some(serde_json::json!({ "reason": parse_error.to_string() })),
                ));
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(
    request: &RpcRequest,
    layout: Option<&SceneLayout<Entity>>,
    actions: &mut RpcActions,
) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    if request.jsonrpc != "2.0" {
        return Some(create_error_response(id, -32600, "Invalid request", None));
    }

    let result = match request.method.as_str() {
        "get_floor" => handle_get_floor(layout),
        "get_figures" => handle_get_figures(layout),
        "get_selected_figure" => handle_get_selected_figure(layout),
        "get_constraints" => handle_get_constraints(layout),
        "select_figure" => handle_select_figure(&request.params, layout, actions),
        "clear_selection" => {
            actions.selection.write(SelectionRequest::Clear);
            Ok(serde_json::json!({ "success": true }))
        }
        "delete_selected_figure" => {
            handle_delete_selected_figure(&request.params, layout, actions)
        }
        "validate_edit" => handle_validate_edit(&request.params, layout),
        "save_edit" => handle_save_edit(&request.params, layout, actions),
        "add_figure_defaults" => handle_add_figure_defaults(&request.params),
        "add_figure" => handle_add_figure(&request.params, layout, actions),
        "update_floor" => handle_update_floor(&request.params, layout, actions),
        "view_rack" => handle_view_rack(layout, actions),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn loaded(layout: Option<&SceneLayout<Entity>>) -> Result<&SceneLayout<Entity>, RpcError> {
    layout.ok_or_else(|| RpcError::internal_error("Floor data not loaded"))
}

fn handle_get_floor(layout: Option<&SceneLayout<Entity>>) -> Result<serde_json::Value, RpcError> {
    let layout = loaded(layout)?;
    Ok(serde_json::json!({
        "floor": layout.floor(),
        "constraints": layout.constraints(),
    }))
}

fn handle_get_figures(
    layout: Option<&SceneLayout<Entity>>,
) -> Result<serde_json::Value, RpcError> {
    let layout = loaded(layout)?;
    let figures: Vec<_> = layout.figures().iter().map(figure_summary).collect();
    Ok(serde_json::json!({
        "figures": figures,
        "pending": layout.pending_count(),
    }))
}

fn handle_get_selected_figure(
    layout: Option<&SceneLayout<Entity>>,
) -> Result<serde_json::Value, RpcError> {
    let layout = loaded(layout)?;
    Ok(selection_payload(layout).unwrap_or(serde_json::Value::Null))
}

fn handle_get_constraints(
    layout: Option<&SceneLayout<Entity>>,
) -> Result<serde_json::Value, RpcError> {
    let layout = loaded(layout)?;
    serde_json::to_value(layout.constraints())
        .map_err(|e| RpcError::internal_error(&e.to_string()))
}

fn handle_select_figure(
    params: &serde_json::Value,
    layout: Option<&SceneLayout<Entity>>,
    actions: &mut RpcActions,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SelectParams {
        id: FigureId,
    }

    let layout = loaded(layout)?;
    let select_params = serde_json::from_value::<SelectParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;
    if layout.figure(select_params.id).is_none() {
        return Err(RpcError::invalid_params(&format!(
            "Unknown figure: {}",
            select_params.id
        )));
    }

    actions
        .selection
        .write(SelectionRequest::Select(select_params.id));
    Ok(serde_json::json!({ "success": true, "id": select_params.id }))
}

fn handle_delete_selected_figure(
    params: &serde_json::Value,
    layout: Option<&SceneLayout<Entity>>,
    actions: &mut RpcActions,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize, Default)]
    struct DeleteParams {
        #[serde(default)]
        confirmed: Option<bool>,
    }

    let layout = loaded(layout)?;
    let delete_params = if params.is_null() {
        DeleteParams::default()
    } else {
        serde_json::from_value::<DeleteParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected optional 'confirmed' parameter"))?
    };
    let Some(selected) = layout.selected() else {
        return Err(RpcError::invalid_params("Please select a figure to delete."));
    };

    actions.delete.write(DeleteSelectedRequest {
        confirmed: delete_params.confirmed,
    });
    Ok(serde_json::json!({ "success": true, "id": selected.id() }))
}

#[derive(Deserialize)]
struct DraftParams<T> {
    draft: T,
    #[serde(default)]
    confirmed: Option<bool>,
}

fn handle_validate_edit(
    params: &serde_json::Value,
    layout: Option<&SceneLayout<Entity>>,
) -> Result<serde_json::Value, RpcError> {
    let layout = loaded(layout)?;
    let draft_params = serde_json::from_value::<DraftParams<FigureDraft>>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'draft' parameter"))?;
    let validation = draft_params.draft.validate(layout.floor());
    serde_json::to_value(validation).map_err(|e| RpcError::internal_error(&e.to_string()))
}

fn handle_save_edit(
    params: &serde_json::Value,
    layout: Option<&SceneLayout<Entity>>,
    actions: &mut RpcActions,
) -> Result<serde_json::Value, RpcError> {
    let layout = loaded(layout)?;
    let draft_params = serde_json::from_value::<DraftParams<FigureDraft>>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'draft' parameter"))?;
    let Some(selected) = layout.selected() else {
        return Err(RpcError::invalid_params("Please select a figure to edit."));
    };

    let validation = draft_params.draft.validate(layout.floor());
    if validation.edit_error {
        return Err(RpcError {
            code: -32602,
            message: "Edit rejected".to_string(),
            data: serde_json::to_value(&validation).ok(),
        });
    }

    actions.save_edit.write(SaveEditRequest {
        draft: draft_params.draft,
        confirmed: draft_params.confirmed,
    });
    Ok(serde_json::json!({ "success": true, "id": selected.id() }))
}

fn handle_add_figure_defaults(params: &serde_json::Value) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct KindParams {
        figure_name: String,
    }

    let kind_params = serde_json::from_value::<KindParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'figure_name' parameter"))?;
    let kind = FigureKind::from_name(&kind_params.figure_name).ok_or_else(|| {
        RpcError::invalid_params(&format!("Unknown figure kind: {}", kind_params.figure_name))
    })?;
    serde_json::to_value(add_figure_defaults(kind))
        .map_err(|e| RpcError::internal_error(&e.to_string()))
}

fn handle_add_figure(
    params: &serde_json::Value,
    layout: Option<&SceneLayout<Entity>>,
    actions: &mut RpcActions,
) -> Result<serde_json::Value, RpcError> {
    let layout = loaded(layout)?;
    let draft_params = serde_json::from_value::<DraftParams<AddFigureDraft>>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'draft' parameter"))?;
    let limits = draft_params.draft.limits(layout.floor());

    info!(
        "Adding {} '{}'",
        draft_params.draft.figure_name, draft_params.draft.figure_type
    );
    actions.backend.write(BackendDispatch(add_figure(&draft_params.draft)));
    Ok(serde_json::json!({ "success": true, "limits": limits }))
}

fn handle_update_floor(
    params: &serde_json::Value,
    layout: Option<&SceneLayout<Entity>>,
    actions: &mut RpcActions,
) -> Result<serde_json::Value, RpcError> {
    let layout = loaded(layout)?;
    let draft_params = serde_json::from_value::<DraftParams<FloorResizeDraft>>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'draft' parameter"))?;
    let constraints = layout.constraints();
    draft_params.draft.validate(constraints).map_err(|e| RpcError {
        code: -32602,
        message: e.to_string(),
        data: serde_json::to_value(constraints).ok(),
    })?;

    actions
        .backend
        .write(BackendDispatch(update_floor(&draft_params.draft)));
    Ok(serde_json::json!({ "success": true }))
}

fn handle_view_rack(
    layout: Option<&SceneLayout<Entity>>,
    actions: &mut RpcActions,
) -> Result<serde_json::Value, RpcError> {
    let layout = loaded(layout)?;
    let Some(selected) = layout.selected() else {
        return Err(RpcError::invalid_params("Please select a figure to view."));
    };
    if !selected.record.is_rack() {
        return Err(RpcError::invalid_params("Only racks have a rack page"));
    }

    actions.view_rack.write(ViewRackRequest);
    Ok(serde_json::json!({ "success": true, "id": selected.id() }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No host page natively.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floor_plan_layout::{FigureRecord, FloorSpec, PlacedFigure, Rotation};

    fn layout_with_rack() -> SceneLayout<Entity> {
        let mut layout = SceneLayout::new(FloorSpec::new(10.0, 8.0));
        layout
            .insert_placed(PlacedFigure {
                record: FigureRecord {
                    id: 7,
                    type_label: "Rack A1".into(),
                    kind_name: "rack".into(),
                    position: Vec2::new(2.0, 3.0),
                    width: 2.0,
                    height: 2.0,
                    depth: 1.0,
                    rotation: Rotation::from_degrees(0.0),
                    colour: None,
                    rack_id: 0,
                },
                kind: FigureKind::Rack,
                placement: None,
                node: Entity::from_raw(1),
            })
            .unwrap();
        layout
    }

    #[test]
    fn queries_fail_before_floor_loads() {
        let err = handle_get_floor(None).unwrap_err();
        assert_eq!(err.code, -32603);
    }

    #[test]
    fn figures_and_constraints_reflect_layout() {
        let layout = layout_with_rack();
        let figures = handle_get_figures(Some(&layout)).unwrap();
        assert_eq!(figures["figures"][0]["id"], 7);
        assert_eq!(figures["figures"][0]["figure_name"], "rack");

        let constraints = handle_get_constraints(Some(&layout)).unwrap();
        assert_eq!(constraints["min_width"], 4.0);
        assert_eq!(constraints["min_length"], 4.0);
    }

    #[test]
    fn selected_figure_is_null_without_selection() {
        let mut layout = layout_with_rack();
        assert!(handle_get_selected_figure(Some(&layout)).unwrap().is_null());

        layout.select(7).unwrap();
        let payload = handle_get_selected_figure(Some(&layout)).unwrap();
        assert_eq!(payload["figure"]["figure_type"], "Rack A1");
        assert_eq!(payload["draft"]["color"], "none");
        assert_eq!(payload["validation"]["edit_error"], false);
    }

    #[test]
    fn validate_edit_reports_overrun() {
        let layout = layout_with_rack();
        let params = serde_json::json!({
            "draft": {
                "x_position": 9.0, "y_position": 1.0,
                "width": 2.0, "height": 1.0, "depth": 1.0,
                "angle": 0.0, "color": "none"
            }
        });
        let result = handle_validate_edit(&params, Some(&layout)).unwrap();
        assert_eq!(result["edit_error"], true);
        assert_eq!(result["limits"]["x_max"], 8.0);
    }

    #[test]
    fn add_figure_defaults_rejects_unknown_kind() {
        let ok = handle_add_figure_defaults(&serde_json::json!({ "figure_name": "raised_floor" }))
            .unwrap();
        assert_eq!(ok["height"], 1.0);

        let err =
            handle_add_figure_defaults(&serde_json::json!({ "figure_name": "sofa" })).unwrap_err();
        assert_eq!(err.code, -32602);
    }
}
