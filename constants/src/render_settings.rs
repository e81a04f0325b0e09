pub const BACKGROUND_COLOUR: u32 = 0xf0f0f0;
pub const DEFAULT_FLOOR_COLOUR: u32 = 0xcccccc;
pub const GRID_LINE_COLOUR: u32 = 0x000000;
pub const PERFORATED_TILE_COLOUR: u32 = 0x0000ff;
pub const SELECTION_COLOUR: u32 = 0xffff00;

pub const AMBIENT_LIGHT_COLOUR: u32 = 0x404040;
pub const AMBIENT_LIGHT_BRIGHTNESS: f32 = 400.0;
pub const POINT_LIGHT_INTENSITY: f32 = 2_000_000.0;
pub const POINT_LIGHT_RANGE: f32 = 200.0;
pub const POINT_LIGHT_POSITIONS: [[f32; 3]; 4] = [
    [10.0, 10.0, 10.0],
    [-10.0, 10.0, -10.0],
    [10.0, 10.0, -10.0],
    [-10.0, 10.0, 10.0],
];

pub const CAMERA_START: [f32; 3] = [0.0, 5.0, 10.0];
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_MIN_RADIUS: f32 = 1.0;
pub const CAMERA_MAX_RADIUS: f32 = 500.0;

pub const LABEL_FONT_SIZE: f32 = 14.0;
pub const LABEL_COLOUR: u32 = 0x000000;

pub const PANEL_OPEN_WIDTH: f32 = 280.0;
pub const PANEL_CLOSED_WIDTH: f32 = 32.0;

/// Split a packed `0xRRGGBB` colour into byte channels.
pub const fn rgb_bytes(colour: u32) -> [u8; 3] {
    [
        ((colour >> 16) & 0xff) as u8,
        ((colour >> 8) & 0xff) as u8,
        (colour & 0xff) as u8,
    ]
}
