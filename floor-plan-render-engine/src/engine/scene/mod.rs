//! Scene elements built from the floor data.

/// Figure colour overrides applied to spawned glTF materials.
pub mod colour;

/// Floor plane.
pub mod floor;

/// Floor measurement grid as a single line-list mesh.
pub mod grid;

/// Screen-space text labels anchored above figures.
pub mod labels;

/// Ambient and point lights.
pub mod lighting;

/// Cross-hatched perforated tiles and their pick boxes.
pub mod perforated_tile;

/// Outline drawn around the selected figure.
pub mod selection_gizmo;
