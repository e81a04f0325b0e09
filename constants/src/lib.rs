//! Shared tuning values for the floor plan viewer.
//!
//! Everything here is plain data so both the layout library and the render
//! engine can depend on it without pulling in an engine.

/// Figure catalog: asset kind names and their display labels.
pub mod figure;

/// Floor-local to world coordinate mapping.
pub mod coordinate_system;

/// Per-type placement multipliers, grid and perforated tile spacing.
pub mod placement;

/// Asset, host data and backend endpoint paths.
pub mod path;

/// Colours, lights, camera defaults and UI sizes.
pub mod render_settings;
