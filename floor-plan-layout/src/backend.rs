//! Backend requests as plain values.
//!
//! The render engine decides how to execute them (`fetch` in the browser, a
//! logged dry run natively); building them here keeps the validation gate in
//! one place: an invalid edit never produces a request.

use serde::Serialize;
use url::form_urlencoded;

use crate::error::EditError;
use crate::figure::{FigureId, FigureRecord};
use crate::floor::FloorSpec;
use crate::forms::{AddFigureDraft, FigureDraft, FloorResizeDraft};
use constants::path::{
    ADD_FIGURE_ENDPOINT, ASSIGN_RACK_ROUTE, DELETE_FIGURE_ENDPOINT, EDIT_FIGURE_ENDPOINT,
    EDIT_RACK_ROUTE, UPDATE_FLOOR_ENDPOINT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    pub fn encode(&self) -> String {
        match self {
            RequestBody::Json(value) => value.to_string(),
            RequestBody::Form(pairs) => form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter())
                .finish(),
        }
    }
}

/// What the page should do once a request succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OnSuccess {
    Nothing,
    ReloadPage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<RequestBody>,
    pub on_success: OnSuccess,
}

pub fn delete_figure(id: FigureId) -> BackendRequest {
    BackendRequest {
        method: HttpMethod::Delete,
        path: format!("{}/{}/", DELETE_FIGURE_ENDPOINT, id),
        body: None,
        on_success: OnSuccess::Nothing,
    }
}

/// Validate the draft against the floor and build the edit request. An
/// invalid draft yields the first validation error and no request.
pub fn edit_figure(
    id: FigureId,
    draft: &FigureDraft,
    floor: &FloorSpec,
) -> Result<BackendRequest, EditError> {
    draft.validate(floor).into_result()?;
    let body = serde_json::json!({
        "x_position": draft.x_position,
        "y_position": draft.y_position,
        "width": draft.width,
        "height": draft.height,
        "depth": draft.depth,
        "angle": draft.angle,
        "color": draft.color,
    });
    Ok(BackendRequest {
        method: HttpMethod::Put,
        path: format!("{}/{}/", EDIT_FIGURE_ENDPOINT, id),
        body: Some(RequestBody::Json(body)),
        on_success: OnSuccess::ReloadPage,
    })
}

pub fn add_figure(draft: &AddFigureDraft) -> BackendRequest {
    let pairs = vec![
        ("floor_id".to_string(), draft.floor_id.to_string()),
        ("x_position".to_string(), draft.x_position.to_string()),
        ("y_position".to_string(), draft.y_position.to_string()),
        ("height".to_string(), draft.height.to_string()),
        ("width".to_string(), draft.width.to_string()),
        ("depth".to_string(), draft.depth.to_string()),
        ("figure_type".to_string(), draft.figure_type.clone()),
        ("figure_color".to_string(), draft.figure_color.clone()),
        ("angle".to_string(), draft.angle.to_string()),
        ("figure_name".to_string(), draft.figure_name.name().to_string()),
    ];
    BackendRequest {
        method: HttpMethod::Post,
        path: ADD_FIGURE_ENDPOINT.to_string(),
        body: Some(RequestBody::Form(pairs)),
        on_success: OnSuccess::ReloadPage,
    }
}

/// The stored floor colour never carries a leading `#`.
pub fn update_floor(draft: &FloorResizeDraft) -> BackendRequest {
    let pairs = vec![
        ("floor_id".to_string(), draft.floor_id.to_string()),
        ("width".to_string(), draft.width.to_string()),
        ("length".to_string(), draft.length.to_string()),
        ("gridx".to_string(), draft.gridx.to_string()),
        ("gridy".to_string(), draft.gridy.to_string()),
        (
            "color".to_string(),
            draft.color.trim_start_matches('#').to_string(),
        ),
    ];
    BackendRequest {
        method: HttpMethod::Post,
        path: UPDATE_FLOOR_ENDPOINT.to_string(),
        body: Some(RequestBody::Form(pairs)),
        on_success: OnSuccess::ReloadPage,
    }
}

/// Rack management page for a rack figure; `None` for other kinds.
pub fn rack_page_path(floor: &FloorSpec, figure: &FigureRecord) -> Option<String> {
    if !figure.is_rack() {
        return None;
    }
    Some(if figure.rack_id == 0 {
        format!(
            "{}/{}/{}/{}",
            ASSIGN_RACK_ROUTE, floor.site_name, floor.name, figure.id
        )
    } else {
        format!(
            "{}/{}/{}/{}",
            EDIT_RACK_ROUTE, floor.site_name, floor.name, figure.rack_id
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::FigureKind;

    #[test]
    fn form_body_is_url_encoded() {
        let draft = AddFigureDraft {
            floor_id: 3,
            x_position: 1.5,
            y_position: 2.0,
            height: 1.0,
            width: 1.0,
            depth: 1.0,
            figure_type: "Rack A&B".into(),
            figure_color: "#ff0000".into(),
            angle: 90.0,
            figure_name: FigureKind::Rack,
        };
        let body = add_figure(&draft).body.unwrap();
        let encoded = body.encode();
        assert!(encoded.contains("figure_type=Rack+A%26B"));
        assert!(encoded.contains("figure_color=%23ff0000"));
        assert!(encoded.contains("figure_name=rack"));
        assert_eq!(body.content_type(), "application/x-www-form-urlencoded");
    }

    #[test]
    fn floor_update_strips_hash() {
        let req = update_floor(&FloorResizeDraft {
            floor_id: 1,
            width: 10.0,
            length: 8.0,
            gridx: 0.0,
            gridy: 0.0,
            color: "#a0b0c0".into(),
        });
        assert!(req.body.unwrap().encode().ends_with("color=a0b0c0"));
    }

    #[test]
    fn delete_path_has_trailing_slash() {
        let req = delete_figure(42);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "/delete_figure/42/");
        assert!(req.body.is_none());
    }
}
