use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::floor::parse_hex_colour;

/// Primary key of a figure record on the backend.
pub type FigureId = i64;

/// Closed set of placeable asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    Rack,
    Cooler,
    RaisedFloor,
    ElectricalPanel,
    PerforatedTile,
}

impl FigureKind {
    pub const ALL: [FigureKind; 5] = [
        FigureKind::Rack,
        FigureKind::Cooler,
        FigureKind::RaisedFloor,
        FigureKind::ElectricalPanel,
        FigureKind::PerforatedTile,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The `figure_name` wire value, also the asset folder name.
    pub fn name(self) -> &'static str {
        match self {
            FigureKind::Rack => "rack",
            FigureKind::Cooler => "cooler",
            FigureKind::RaisedFloor => "raised_floor",
            FigureKind::ElectricalPanel => "electrical_panel",
            FigureKind::PerforatedTile => "perforated_tile",
        }
    }

    pub fn display_label(self) -> String {
        constants::figure::get_figure_label(self.name())
    }

    /// Everything except perforated tiles is loaded from a glTF asset.
    pub fn is_asset(self) -> bool {
        self != FigureKind::PerforatedTile
    }

    /// Raised floors and perforated tiles always occupy a 1x1 tile and
    /// expose no size, angle or colour inputs.
    pub fn has_fixed_footprint(self) -> bool {
        matches!(self, FigureKind::RaisedFloor | FigureKind::PerforatedTile)
    }

    pub fn shows_label(self) -> bool {
        !matches!(self, FigureKind::RaisedFloor | FigureKind::PerforatedTile)
    }
}

impl std::fmt::Display for FigureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuarterTurn {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl QuarterTurn {
    pub fn degrees(self) -> f32 {
        match self {
            QuarterTurn::Deg0 => 0.0,
            QuarterTurn::Deg90 => 90.0,
            QuarterTurn::Deg180 => 180.0,
            QuarterTurn::Deg270 => 270.0,
        }
    }

    /// 90° and 270° swap the footprint's width and depth.
    pub fn is_sideways(self) -> bool {
        matches!(self, QuarterTurn::Deg90 | QuarterTurn::Deg270)
    }
}

/// Wire rotation classified into a quarter turn or kept as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation {
    Quarter(QuarterTurn),
    Unsupported(f32),
}

impl Rotation {
    pub fn from_degrees(degrees: f32) -> Self {
        // Exact comparison: 89.9 is not a quarter turn.
        let turn = if degrees == 0.0 {
            QuarterTurn::Deg0
        } else if degrees == 90.0 {
            QuarterTurn::Deg90
        } else if degrees == 180.0 {
            QuarterTurn::Deg180
        } else if degrees == 270.0 {
            QuarterTurn::Deg270
        } else {
            return Rotation::Unsupported(degrees);
        };
        Rotation::Quarter(turn)
    }

    pub fn degrees(self) -> f32 {
        match self {
            Rotation::Quarter(turn) => turn.degrees(),
            Rotation::Unsupported(degrees) => degrees,
        }
    }

    /// Rotation about +Y in radians; unsupported angles still rotate the asset.
    pub fn radians(self) -> f32 {
        self.degrees().to_radians()
    }

    pub fn quarter(self) -> Option<QuarterTurn> {
        match self {
            Rotation::Quarter(turn) => Some(turn),
            Rotation::Unsupported(_) => None,
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Quarter(QuarterTurn::Deg0)
    }
}

/// One figure as delivered by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureRecord {
    pub id: FigureId,
    /// Free-text type label shown on the figure, e.g. "Rack A1".
    pub type_label: String,
    /// Raw `figure_name`; see [`FigureRecord::kind`].
    pub kind_name: String,
    /// Floor-local position of the footprint corner.
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub rotation: Rotation,
    /// `None` when the server sent "none" in any case.
    pub colour: Option<String>,
    /// Owning rack, 0 when unassigned.
    pub rack_id: i64,
}

impl FigureRecord {
    pub fn kind(&self) -> LayoutResult<FigureKind> {
        FigureKind::from_name(&self.kind_name).ok_or_else(|| LayoutError::UnknownKind {
            id: self.id,
            name: self.kind_name.clone(),
        })
    }

    /// Check the kind and that every number used by placement is finite.
    pub fn validate(&self) -> LayoutResult<FigureKind> {
        let kind = self.kind()?;
        let fields = [
            ("x_position", self.position.x),
            ("y_position", self.position.y),
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("angle", self.rotation.degrees()),
        ];
        if let Some((field, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(LayoutError::InvalidDimensions {
                id: self.id,
                reason: format!("{field} is {value}"),
            });
        }
        Ok(kind)
    }

    /// Size of the occupied rectangle after rotation.
    pub fn footprint(&self) -> Option<Vec2> {
        let turn = self.rotation.quarter()?;
        Some(if turn.is_sideways() {
            Vec2::new(self.depth, self.width)
        } else {
            Vec2::new(self.width, self.depth)
        })
    }

    /// Far corner of the footprint in floor-local units. Unsupported angles
    /// contribute only their position.
    pub fn footprint_max(&self) -> Vec2 {
        match self.footprint() {
            Some(size) => self.position + size,
            None => self.position,
        }
    }

    pub fn is_rack(&self) -> bool {
        matches!(self.kind(), Ok(FigureKind::Rack))
    }

    /// Packed `0xRRGGBB` override. `Err` carries an override that is not a
    /// hex colour (a CSS name, say) so the caller can report it.
    pub fn colour_rgb(&self) -> Result<Option<u32>, &str> {
        match self.colour.as_deref() {
            None => Ok(None),
            Some(raw) => parse_hex_colour(raw).map(Some).ok_or(raw),
        }
    }
}

/// `"none"`, `"None"` and friends mean no colour override.
pub fn colour_override(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(angle: f32) -> FigureRecord {
        FigureRecord {
            id: 1,
            type_label: "Rack A1".into(),
            kind_name: "rack".into(),
            position: Vec2::new(2.0, 3.0),
            width: 2.0,
            height: 2.2,
            depth: 1.0,
            rotation: Rotation::from_degrees(angle),
            colour: None,
            rack_id: 0,
        }
    }

    #[test]
    fn classifies_quarter_turns_exactly() {
        assert_eq!(
            Rotation::from_degrees(90.0),
            Rotation::Quarter(QuarterTurn::Deg90)
        );
        assert_eq!(Rotation::from_degrees(45.0), Rotation::Unsupported(45.0));
        assert_eq!(Rotation::from_degrees(360.0), Rotation::Unsupported(360.0));
    }

    #[test]
    fn footprint_swaps_on_sideways_turns() {
        assert_eq!(record(0.0).footprint_max(), Vec2::new(4.0, 4.0));
        assert_eq!(record(90.0).footprint_max(), Vec2::new(3.0, 5.0));
        assert_eq!(record(180.0).footprint_max(), Vec2::new(4.0, 4.0));
        assert_eq!(record(270.0).footprint_max(), Vec2::new(3.0, 5.0));
        assert_eq!(record(45.0).footprint_max(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn rejects_unknown_kind_and_nan() {
        let mut r = record(0.0);
        r.kind_name = "chair".into();
        assert!(matches!(r.validate(), Err(LayoutError::UnknownKind { .. })));

        let mut r = record(0.0);
        r.width = f32::NAN;
        assert!(matches!(
            r.validate(),
            Err(LayoutError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn colour_none_in_any_case() {
        assert_eq!(colour_override("none"), None);
        assert_eq!(colour_override("NONE"), None);
        assert_eq!(colour_override("None"), None);
        assert_eq!(colour_override("#ff0000"), Some("#ff0000".to_string()));
    }

    #[test]
    fn non_hex_override_is_reported() {
        let mut r = record(0.0);
        assert_eq!(r.colour_rgb(), Ok(None));

        r.colour = Some("#3366cc".into());
        assert_eq!(r.colour_rgb(), Ok(Some(0x3366cc)));

        r.colour = Some("tomato".into());
        assert_eq!(r.colour_rgb(), Err("tomato"));
    }
}
