use bevy::prelude::*;
use constants::render_settings::{PANEL_CLOSED_WIDTH, PANEL_OPEN_WIDTH};
use floor_plan_layout::forms::{FigureDraft, edit_field_visibility};
use floor_plan_layout::placement::PointBounds;
use floor_plan_layout::{FigureId, FigureKind, FloorConstraints, PlacedFigure, SceneLayout};

// Resources
/// All layout state for the loaded floor, keyed by figure entity.
#[derive(Resource, Deref, DerefMut)]
pub struct FigureLayout(pub SceneLayout<Entity>);

#[derive(Resource)]
pub struct FigureManagerUiState {
    pub collapsed: bool,
    pub open_width: f32,
    pub closed_width: f32,
}
impl Default for FigureManagerUiState {
    fn default() -> Self {
        Self {
            collapsed: false,
            open_width: PANEL_OPEN_WIDTH,
            closed_width: PANEL_CLOSED_WIDTH,
        }
    }
}

impl FigureManagerUiState {
    pub fn width(&self) -> f32 {
        if self.collapsed {
            self.closed_width
        } else {
            self.open_width
        }
    }
}

// Events
/// Minimum floor size changed (figures loaded or deleted).
#[derive(Event, Debug, Clone, Copy)]
pub struct FloorConstraintsChanged(pub FloorConstraints);

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SelectionRequest {
    Select(FigureId),
    Clear,
}

/// `confirmed: None` asks the user first.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeleteSelectedRequest {
    pub confirmed: Option<bool>,
}

/// Persist an edit of the selected figure. `confirmed: None` asks first.
#[derive(Event, Debug, Clone)]
pub struct SaveEditRequest {
    pub draft: FigureDraft,
    pub confirmed: Option<bool>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ViewRackRequest;

// Components
/// Root entity of a placed figure.
#[derive(Component, Debug, Clone, Copy)]
pub struct FigureTag {
    pub id: FigureId,
    pub kind: FigureKind,
}

/// Asset-native bounds of a figure's glTF scene.
#[derive(Component, Debug, Clone, Copy)]
pub struct FigureBounds {
    pub native: PointBounds,
}

/// World-space pick box for a perforated tile.
#[derive(Component, Debug, Clone, Copy)]
pub struct TileHitBox {
    pub min: Vec3,
    pub max: Vec3,
}

#[derive(Component)]
pub struct Selected;

#[derive(Component)]
pub struct FigureManagerRoot;
#[derive(Component)]
pub struct FigureManagerBody;
#[derive(Component)]
pub struct HeaderNode;
#[derive(Component)]
pub struct TitleText;
#[derive(Component)]
pub struct CollapseButton;
#[derive(Component)]
pub struct CollapseLabel;
#[derive(Component)]
pub struct SelectedFigureText;
#[derive(Component)]
pub struct FigureDetailsText;
#[derive(Component)]
pub struct ConstraintsText;
#[derive(Component)]
pub struct DeleteButton;
#[derive(Component)]
pub struct ViewRackButton;
#[derive(Component)]
pub struct ClearSelectionButton;

/// JSON view of a placed figure for the host page.
pub fn figure_summary(figure: &PlacedFigure<Entity>) -> serde_json::Value {
    let record = &figure.record;
    serde_json::json!({
        "id": record.id,
        "figure_type": record.type_label,
        "figure_name": figure.kind,
        "x_position": record.position.x,
        "y_position": record.position.y,
        "width": record.width,
        "height": record.height,
        "depth": record.depth,
        "angle": record.rotation.degrees(),
        "color": record.colour,
        "rack_id": record.rack_id,
        "placement_quality": figure.placement.map(|p| p.quality),
    })
}

/// Summary plus the prefilled edit form for the selected figure.
pub fn selection_payload(layout: &SceneLayout<Entity>) -> Option<serde_json::Value> {
    let figure = layout.selected()?;
    let draft = FigureDraft::from_record(&figure.record);
    let validation = draft.validate(layout.floor());
    Some(serde_json::json!({
        "figure": figure_summary(figure),
        "draft": draft,
        "visibility": edit_field_visibility(figure.kind),
        "validation": validation,
    }))
}
