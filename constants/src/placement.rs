/// Height at which figures, grid lines and tiles sit above the floor plane.
pub const FLOOR_CLEARANCE: f32 = 0.01;

/// Rack anchor shift applied at 0°/180° as a fraction of (w - d).
pub const RACK_AXIS_SWAP_FACTOR: f32 = 0.5;

// Raised floor tiles are authored with their origin far from the footprint,
// these multipliers pull the asset back onto the requested tile.
pub const RAISED_FLOOR_90_WIDTH_DIVISOR: f32 = 1.01;
pub const RAISED_FLOOR_90_DEPTH_FACTOR: f32 = 0.75;
pub const RAISED_FLOOR_180_DEPTH_FACTOR: f32 = 1.06;
pub const RAISED_FLOOR_270_WIDTH_FACTOR: f32 = 0.09;
pub const RAISED_FLOOR_270_DEPTH_FACTOR: f32 = 0.6;
pub const RAISED_FLOOR_WIDTH_ANCHOR: f32 = 1.515;
pub const RAISED_FLOOR_DEPTH_ANCHOR: f32 = 3.85;

/// Electrical panels sit `depth / 9` in front of their base point.
pub const ELECTRICAL_PANEL_DEPTH_DIVISOR: f32 = 9.0;

/// Perforated tiles are a fixed 1x1 cross-hatch.
pub const PERFORATED_TILE_SIZE: f32 = 1.0;
pub const PERFORATED_TILE_LINE_SPACING: f32 = 0.1;
pub const PERFORATED_TILE_LINES_PER_AXIS: u32 = 11;

/// First grid line offset is `grid / GRID_OFFSET_DIVISOR`.
pub const GRID_OFFSET_DIVISOR: f32 = 60.0;
pub const GRID_LINE_STEP: f32 = 1.0;

/// Raised floor and perforated tile add-form footprint.
pub const FIXED_TILE_FOOTPRINT: f32 = 1.0;
pub const RAISED_FLOOR_DEFAULT_HEIGHT: f32 = 1.0;

/// Label heights above the figure's bounding box.
pub const RACK_LABEL_LIFT: f32 = 0.5;
pub const COOLER_LABEL_LIFT: f32 = 0.2;
pub const RAISED_FLOOR_LABEL_LIFT: f32 = 0.15;
pub const ELECTRICAL_PANEL_LABEL_DROP: f32 = 0.2;
