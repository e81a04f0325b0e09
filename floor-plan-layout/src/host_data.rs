//! Host data block: `{ "floor": {...}, "figures": [...] }` where each entry
//! has the serializer shape `{ "model", "pk", "fields": {...} }`.
//!
//! Numbers are accepted either as JSON numbers or numeric strings; anything
//! else parses as NaN and is rejected later by validation.

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::error::HostDataError;
use crate::figure::{FigureId, FigureRecord, Rotation, colour_override};
use crate::floor::{FloorSpec, parse_hex_colour};
use constants::render_settings::DEFAULT_FLOOR_COLOUR;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostDataBlock {
    pub floor: FloorEntry,
    /// Entries that do not fit the figure shape are logged and dropped.
    #[serde(default, deserialize_with = "skip_malformed_figures")]
    pub figures: Vec<FigureEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorEntry {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub pk: Option<i64>,
    pub fields: FloorFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorFields {
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "lenient_f32")]
    pub width: f32,
    #[serde(deserialize_with = "lenient_f32")]
    pub length: f32,
    #[serde(default)]
    pub color: String,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub gridx: f32,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub gridy: f32,
    #[serde(default)]
    pub site_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureEntry {
    #[serde(default)]
    pub model: Option<String>,
    pub pk: FigureId,
    pub fields: FigureFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureFields {
    #[serde(default = "missing_number", deserialize_with = "lenient_f32")]
    pub x_position: f32,
    #[serde(default = "missing_number", deserialize_with = "lenient_f32")]
    pub y_position: f32,
    #[serde(default = "missing_number", deserialize_with = "lenient_f32")]
    pub width: f32,
    #[serde(default = "missing_number", deserialize_with = "lenient_f32")]
    pub height: f32,
    #[serde(default = "missing_number", deserialize_with = "lenient_f32")]
    pub depth: f32,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub angle: f32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub figure_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub figure_name: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub rack_id: i64,
}

impl HostDataBlock {
    pub fn parse(json: &str) -> Result<Self, HostDataError> {
        let block: HostDataBlock = serde_json::from_str(json)?;
        info!(
            "Parsed floor data: '{}' with {} figures",
            block.floor.fields.name,
            block.figures.len()
        );
        Ok(block)
    }

    /// Floor dimensions must be finite and positive; a bad colour falls back
    /// to the default floor colour.
    pub fn floor_spec(&self) -> Result<FloorSpec, HostDataError> {
        let fields = &self.floor.fields;
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(fields.width) || !valid(fields.length) {
            return Err(HostDataError::InvalidFloorDimensions {
                width: fields.width,
                length: fields.length,
            });
        }

        let colour = parse_hex_colour(&fields.color).unwrap_or_else(|| {
            warn!(
                "Floor colour '{}' is not a hex colour, using default",
                fields.color
            );
            DEFAULT_FLOOR_COLOUR
        });

        Ok(FloorSpec {
            id: self.floor.pk,
            name: fields.name.clone(),
            site_name: fields.site_name.clone(),
            width: fields.width,
            length: fields.length,
            colour,
            grid_x: finite_or_zero(fields.gridx),
            grid_y: finite_or_zero(fields.gridy),
        })
    }

    pub fn figure_records(&self) -> Vec<FigureRecord> {
        self.figures.iter().map(FigureEntry::to_record).collect()
    }
}

impl FigureEntry {
    pub fn to_record(&self) -> FigureRecord {
        let f = &self.fields;
        FigureRecord {
            id: self.pk,
            type_label: f.figure_type.clone(),
            kind_name: f.figure_name.clone(),
            position: Vec2::new(f.x_position, f.y_position),
            width: f.width,
            height: f.height,
            depth: f.depth,
            rotation: Rotation::from_degrees(f.angle),
            colour: colour_override(&f.color),
            rack_id: f.rack_id,
        }
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Missing numbers reach validation as NaN and only that figure is skipped.
fn missing_number() -> f32 {
    f32::NAN
}

fn skip_malformed_figures<'de, D>(deserializer: D) -> Result<Vec<FigureEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<FigureEntry>(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping figure entry {}: {}", index, err);
                None
            }
        })
        .collect())
}

/// `null` becomes empty; numbers and other scalars keep their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn lenient_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => n as f32,
        Some(NumberOrString::Text(s)) => s.trim().parse::<f32>().unwrap_or(f32::NAN),
        None => f32::NAN,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) if n.is_finite() => n as i64,
        Some(NumberOrString::Text(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::figure::FigureKind;

    const BLOCK: &str = r##"{
        "floor": {"model": "myapp.floor", "pk": 7, "fields": {
            "name": "F1", "width": 20.0, "length": "12", "color": "a0a0a0",
            "gridx": 30, "gridy": 60, "site_name": "North"}},
        "figures": [
            {"model": "myapp.figure", "pk": 1, "fields": {
                "x_position": 2, "y_position": 3, "height": 2.2, "width": 2,
                "depth": 1, "figure_type": "Rack A1", "color": "None",
                "angle": 90, "figure_name": "rack", "rack_id": 0}},
            {"model": "myapp.figure", "pk": 2, "fields": {
                "x_position": "abc", "y_position": 3, "height": 1, "width": 1,
                "depth": 1, "figure_type": "Tile", "color": "#00ff00",
                "angle": 0, "figure_name": "perforated_tile", "rack_id": "12"}}
        ]
    }"##;

    #[test]
    fn parses_serializer_shape() {
        let block = HostDataBlock::parse(BLOCK).unwrap();
        let floor = block.floor_spec().unwrap();
        assert_eq!(floor.id, Some(7));
        assert_eq!(floor.length, 12.0);
        assert_eq!(floor.colour, 0xa0a0a0);
        assert_eq!(floor.site_name, "North");

        let records = block.figure_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].colour, None);
        assert_eq!(records[0].rotation.degrees(), 90.0);
        assert!(records[1].position.x.is_nan());
        assert_eq!(records[1].rack_id, 12);
        assert_eq!(records[1].colour.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn bad_figure_entry_does_not_sink_the_block() {
        let json = r#"{
            "floor": {"pk": 1, "fields": {"width": 10, "length": 10}},
            "figures": [
                {"pk": 1, "fields": {
                    "x_position": 1, "y_position": 1, "width": 1, "height": 2,
                    "depth": 1, "figure_type": "Rack A1", "color": "none",
                    "angle": 0, "figure_name": "rack", "rack_id": 0}},
                {"pk": 2, "fields": {
                    "x_position": 4, "y_position": 4, "width": 1, "height": 2,
                    "figure_type": 5, "color": null, "angle": 0,
                    "figure_name": "cooler"}},
                {"fields": {"figure_name": "rack"}},
                "not an object"
            ]
        }"#;
        let block = HostDataBlock::parse(json).unwrap();
        let records = block.figure_records();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].type_label, "Rack A1");
        assert_eq!(records[0].validate(), Ok(FigureKind::Rack));

        // Missing depth and null colour only affect the cooler.
        assert_eq!(records[1].type_label, "5");
        assert_eq!(records[1].colour, None);
        assert!(records[1].depth.is_nan());
        assert!(matches!(
            records[1].validate(),
            Err(LayoutError::InvalidDimensions { id: 2, .. })
        ));
    }

    #[test]
    fn rejects_non_positive_floor() {
        let json = r#"{"floor": {"fields": {"width": 0, "length": 5}}, "figures": []}"#;
        let block = HostDataBlock::parse(json).unwrap();
        assert!(matches!(
            block.floor_spec(),
            Err(HostDataError::InvalidFloorDimensions { .. })
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            HostDataBlock::parse("{not json"),
            Err(HostDataError::Json(_))
        ));
    }
}
