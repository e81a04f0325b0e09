//! Error handling for the floor plan layout engine.
//!
//! - Layout errors: a figure record that cannot be placed
//! - Host data errors: the page-supplied JSON block is unusable
//! - Edit errors: a form draft that must not reach the backend
//!
//! All error types use `thiserror`; none of them are raised as panics.

use thiserror::Error;

use crate::figure::FigureId;

/// Placement and scene layout errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Position or size is not a finite number
    #[error("Invalid dimensions for figure {id}: {reason}")]
    InvalidDimensions {
        /// The offending figure.
        id: FigureId,
        /// Which value was rejected.
        reason: String,
    },

    /// `figure_name` is not one of the known asset kinds
    #[error("Unknown figure kind '{name}' for figure {id}")]
    UnknownKind {
        /// The offending figure.
        id: FigureId,
        /// The unrecognised kind name.
        name: String,
    },

    /// The loaded asset has a zero or non-finite bounding box
    #[error("Degenerate asset extent for '{kind}': {extent:?}")]
    DegenerateAsset {
        /// Asset kind name.
        kind: &'static str,
        /// Asset-native bounding box size.
        extent: [f32; 3],
    },

    /// Perforated tiles are line groups and have no asset transform
    #[error("Figure {0} is a perforated tile and has no asset placement")]
    NotAnAsset(FigureId),

    /// The figure was never placed or was already removed
    #[error("Figure {0} is not part of the layout")]
    UnknownFigure(FigureId),

    /// A figure with this id is already placed
    #[error("Figure {0} is already placed")]
    DuplicateFigure(FigureId),
}

/// Host data block errors.
#[derive(Error, Debug)]
pub enum HostDataError {
    /// The block is not valid JSON or does not match the expected shape
    #[error("Failed to parse floor data: {0}")]
    Json(#[from] serde_json::Error),

    /// Floor width or length is missing, negative or non-finite
    #[error("Invalid floor dimensions: width={width}, length={length}")]
    InvalidFloorDimensions {
        /// Floor width as parsed.
        width: f32,
        /// Floor length as parsed.
        length: f32,
    },
}

/// Reasons an edit draft is rejected before any request is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// Nothing is selected
    #[error("Please select a figure to edit.")]
    NoSelection,

    /// The footprint leaves the floor
    #[error("Figure exceeds the floor: x must be at most {x_max}, y at most {y_max}")]
    OutOfBounds {
        /// Largest valid X position.
        x_max: f32,
        /// Largest valid Y position.
        y_max: f32,
    },

    /// The angle is not a quarter turn
    #[error("Unsupported rotation angle {0}")]
    UnsupportedAngle(f32),

    /// A floor resize would cut through placed figures
    #[error("Floor must be at least {min_width} x {min_length}")]
    FloorTooSmall {
        /// Occupied width.
        min_width: f32,
        /// Occupied length.
        min_length: f32,
    },

    /// A numeric field is negative or non-finite
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// The form field name.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

/// Result type for placement and layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
