//! Layout engine for data-center floor plans.
//!
//! Turns server-supplied figure records (position, size, rotation) into
//! scene transforms, tracks the occupied floor bounds, resolves clicks to
//! figures and validates the edit/add/floor forms. Nothing in here touches a
//! renderer; scene nodes are opaque handles supplied by the caller.
//!
//! ## Coordinate frames
//!
//! ```text
//! floor-local (x, y)           world (x, z)
//!   (0,0) ── x ──> W             floor centred on the origin
//!     │                          world.x = x - W/2
//!     y                          world.z = y - L/2
//!     v  L                       world.y = height above floor
//! ```

/// Backend request construction (delete, edit, add, floor update, rack routes).
pub mod backend;

/// Occupied floor bounds and floor-resize constraints.
pub mod bounds;

/// Error types for parsing, placement and form validation.
pub mod error;

/// Edit and add form drafts, defaults and validation.
pub mod forms;

/// Figure kinds, rotations and records.
pub mod figure;

/// Floor specification.
pub mod floor;

/// Floor grid and perforated tile line generation.
pub mod grid;

/// Ray tests and click resolution through a node hierarchy.
pub mod hit;

/// Host data block in the serializer shape delivered by the page.
pub mod host_data;

/// Label anchor positions per figure kind and rotation.
pub mod label;

/// Scene layout ownership: placed figures, labels, pending loads, selection.
pub mod layout;

/// Per-kind placement rules.
pub mod placement;

/// Viewport to normalised device coordinates and floor tiles.
pub mod pointer;

pub use bounds::{FloorConstraints, OccupiedBounds};
pub use error::{EditError, HostDataError, LayoutError, LayoutResult};
pub use figure::{FigureId, FigureKind, FigureRecord, QuarterTurn, Rotation};
pub use floor::FloorSpec;
pub use layout::{PlacedFigure, RemovedFigure, SceneLayout};
pub use placement::{FigurePlacement, PlacementQuality, place_figure};
