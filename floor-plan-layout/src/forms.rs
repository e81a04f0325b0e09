//! Edit, add and floor-resize form drafts.
//!
//! The same X/Y limit rule drives both the edit and the add form: if the
//! footprint overruns the floor, the position limit shrinks to
//! `floor - size`. Only the edit form turns a shrunk limit into an error.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bounds::FloorConstraints;
use crate::error::EditError;
use crate::figure::{FigureKind, FigureRecord, Rotation};
use crate::floor::FloorSpec;
use constants::placement::{FIXED_TILE_FOOTPRINT, RAISED_FLOOR_DEFAULT_HEIGHT};

/// Largest valid X/Y position inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionLimits {
    pub x_max: f32,
    pub y_max: f32,
}

impl PositionLimits {
    pub fn unconstrained(floor: &FloorSpec) -> Self {
        Self {
            x_max: floor.width,
            y_max: floor.length,
        }
    }
}

pub fn position_limits(
    position: Vec2,
    width: f32,
    depth: f32,
    rotation: Rotation,
    floor: &FloorSpec,
) -> PositionLimits {
    let mut limits = PositionLimits::unconstrained(floor);
    let Some(turn) = rotation.quarter() else {
        return limits;
    };
    let far = if turn.is_sideways() {
        position + Vec2::new(depth, width)
    } else {
        position + Vec2::new(width, depth)
    };
    if far.x > floor.width {
        limits.x_max = floor.width - width;
    }
    if far.y > floor.length {
        limits.y_max = floor.length - depth;
    }
    limits
}

/// Edit form contents, also the `PUT /edit_figure/{id}/` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureDraft {
    pub x_position: f32,
    pub y_position: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub angle: f32,
    pub color: String,
}

impl FigureDraft {
    pub fn from_record(record: &FigureRecord) -> Self {
        Self {
            x_position: record.position.x,
            y_position: record.position.y,
            width: record.width,
            height: record.height,
            depth: record.depth,
            angle: record.rotation.degrees(),
            color: record.colour.clone().unwrap_or_else(|| "none".to_string()),
        }
    }

    pub fn rotation(&self) -> Rotation {
        Rotation::from_degrees(self.angle)
    }

    pub fn limits(&self, floor: &FloorSpec) -> PositionLimits {
        position_limits(
            Vec2::new(self.x_position, self.y_position),
            self.width,
            self.depth,
            self.rotation(),
            floor,
        )
    }

    /// Live validation; `edit_error` blocks saving.
    pub fn validate(&self, floor: &FloorSpec) -> EditValidation {
        let limits = self.limits(floor);
        let mut errors = Vec::new();

        let fields = [
            ("x_position", self.x_position),
            ("y_position", self.y_position),
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                errors.push(EditError::InvalidValue { field, value });
            }
        }

        if let Rotation::Unsupported(angle) = self.rotation() {
            errors.push(EditError::UnsupportedAngle(angle));
        }

        if limits.x_max != floor.width
            || limits.y_max != floor.length
            || self.x_position > floor.width
            || self.y_position > floor.length
        {
            errors.push(EditError::OutOfBounds {
                x_max: limits.x_max,
                y_max: limits.y_max,
            });
        }

        debug!("Edit validation: {} error(s)", errors.len());
        EditValidation {
            limits,
            edit_error: !errors.is_empty(),
            messages: errors.iter().map(ToString::to_string).collect(),
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditValidation {
    pub limits: PositionLimits,
    pub edit_error: bool,
    pub messages: Vec<String>,
    #[serde(skip)]
    pub errors: Vec<EditError>,
}

impl EditValidation {
    pub fn into_result(self) -> Result<PositionLimits, EditError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.limits),
        }
    }
}

/// Which inputs a form shows for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldVisibility {
    pub width: bool,
    pub height: bool,
    pub depth: bool,
    pub angle: bool,
    pub color: bool,
    pub figure_type: bool,
}

impl FieldVisibility {
    const ALL: Self = Self {
        width: true,
        height: true,
        depth: true,
        angle: true,
        color: true,
        figure_type: true,
    };
}

/// Edit form: fixed-footprint kinds hide size, angle and colour but keep
/// their type label editable.
pub fn edit_field_visibility(kind: FigureKind) -> FieldVisibility {
    if kind.has_fixed_footprint() {
        FieldVisibility {
            width: false,
            height: false,
            depth: false,
            angle: false,
            color: false,
            figure_type: true,
        }
    } else {
        FieldVisibility::ALL
    }
}

/// Prefilled values for the add form when an asset kind is chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddFigureDefaults {
    pub figure_name: FigureKind,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub depth: Option<f32>,
    pub figure_type: Option<String>,
    pub visibility: FieldVisibility,
}

pub fn add_figure_defaults(kind: FigureKind) -> AddFigureDefaults {
    let hidden = FieldVisibility {
        width: false,
        height: false,
        depth: false,
        angle: false,
        color: false,
        figure_type: false,
    };
    match kind {
        FigureKind::PerforatedTile => AddFigureDefaults {
            figure_name: kind,
            width: Some(FIXED_TILE_FOOTPRINT),
            height: Some(0.0),
            depth: Some(FIXED_TILE_FOOTPRINT),
            figure_type: Some(kind.display_label()),
            visibility: hidden,
        },
        FigureKind::RaisedFloor => AddFigureDefaults {
            figure_name: kind,
            width: Some(FIXED_TILE_FOOTPRINT),
            height: Some(RAISED_FLOOR_DEFAULT_HEIGHT),
            depth: Some(FIXED_TILE_FOOTPRINT),
            figure_type: Some(kind.display_label()),
            visibility: hidden,
        },
        _ => AddFigureDefaults {
            figure_name: kind,
            width: None,
            height: None,
            depth: None,
            figure_type: None,
            visibility: FieldVisibility::ALL,
        },
    }
}

/// Add form contents, posted form-encoded to `/add_figure/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFigureDraft {
    pub floor_id: i64,
    pub x_position: f32,
    pub y_position: f32,
    pub height: f32,
    pub width: f32,
    pub depth: f32,
    pub figure_type: String,
    pub figure_color: String,
    pub angle: f32,
    pub figure_name: FigureKind,
}

impl AddFigureDraft {
    /// Same limit rule as the edit form, without an error flag.
    pub fn limits(&self, floor: &FloorSpec) -> PositionLimits {
        position_limits(
            Vec2::new(self.x_position, self.y_position),
            self.width,
            self.depth,
            Rotation::from_degrees(self.angle),
            floor,
        )
    }
}

/// Floor form contents, posted form-encoded to `/update_floor/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorResizeDraft {
    pub floor_id: i64,
    pub width: f32,
    pub length: f32,
    pub gridx: f32,
    pub gridy: f32,
    pub color: String,
}

impl FloorResizeDraft {
    /// The floor may not shrink below the occupied bounds.
    pub fn validate(&self, constraints: FloorConstraints) -> Result<(), EditError> {
        for (field, value) in [("width", self.width), ("length", self.length)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EditError::InvalidValue { field, value });
            }
        }
        if self.width < constraints.min_width || self.length < constraints.min_length {
            return Err(EditError::FloorTooSmall {
                min_width: constraints.min_width,
                min_length: constraints.min_length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(x: f32, y: f32, angle: f32) -> FigureDraft {
        FigureDraft {
            x_position: x,
            y_position: y,
            width: 2.0,
            height: 1.0,
            depth: 1.0,
            angle,
            color: "none".into(),
        }
    }

    #[test]
    fn in_bounds_draft_has_no_error() {
        let floor = FloorSpec::new(10.0, 10.0);
        let v = draft(8.0, 9.0, 0.0).validate(&floor);
        assert!(!v.edit_error, "{:?}", v.messages);
        assert_eq!(v.limits, PositionLimits::unconstrained(&floor));
    }

    #[test]
    fn overrun_shrinks_limit_and_flags() {
        let floor = FloorSpec::new(10.0, 10.0);
        let v = draft(9.0, 0.0, 0.0).validate(&floor);
        assert!(v.edit_error);
        assert_eq!(v.limits.x_max, 8.0);
        assert_eq!(v.limits.y_max, 10.0);
    }

    #[test]
    fn sideways_turn_uses_depth_along_x() {
        let floor = FloorSpec::new(10.0, 10.0);
        // depth 1 along x fits at x = 9 when rotated.
        let v = draft(9.0, 0.0, 90.0).validate(&floor);
        assert!(!v.edit_error, "{:?}", v.messages);
    }

    #[test]
    fn unsupported_angle_and_negative_values_flag() {
        let floor = FloorSpec::new(10.0, 10.0);
        let v = draft(1.0, 1.0, 45.0).validate(&floor);
        assert_eq!(v.errors, vec![EditError::UnsupportedAngle(45.0)]);

        let mut d = draft(1.0, 1.0, 0.0);
        d.height = -1.0;
        assert!(d.validate(&floor).edit_error);
    }

    #[test]
    fn fixed_footprint_kinds_prefill_and_hide() {
        let tile = add_figure_defaults(FigureKind::PerforatedTile);
        assert_eq!(tile.height, Some(0.0));
        assert_eq!(tile.figure_type.as_deref(), Some("Perforated Tile"));
        assert!(!tile.visibility.width);

        let raised = add_figure_defaults(FigureKind::RaisedFloor);
        assert_eq!(raised.height, Some(1.0));
        assert_eq!(raised.figure_type.as_deref(), Some("Raised Floor"));

        let rack = add_figure_defaults(FigureKind::Rack);
        assert_eq!(rack.width, None);
        assert!(rack.visibility.angle);

        assert!(!edit_field_visibility(FigureKind::RaisedFloor).color);
        assert!(edit_field_visibility(FigureKind::Cooler).color);
    }

    #[test]
    fn floor_cannot_shrink_below_occupied() {
        let draft = FloorResizeDraft {
            floor_id: 1,
            width: 5.0,
            length: 20.0,
            gridx: 0.0,
            gridy: 0.0,
            color: "#ffffff".into(),
        };
        let constraints = FloorConstraints {
            min_width: 6.0,
            min_length: 3.0,
        };
        assert!(matches!(
            draft.validate(constraints),
            Err(EditError::FloorTooSmall { .. })
        ));
    }
}
