use bevy::prelude::*;
use constants::path::FLOOR_DATA_PATH;

/// Runtime knobs that do not belong in the floor data.
#[derive(Resource, Debug, Clone)]
pub struct ViewerSettings {
    /// Float a type label above each figure.
    pub labels_enabled: bool,
    /// Prefix for backend requests; empty means same origin.
    pub backend_base_url: String,
    /// Native builds load the host data block from this asset path.
    pub floor_data_path: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            labels_enabled: true,
            backend_base_url: String::new(),
            floor_data_path: FLOOR_DATA_PATH.to_string(),
        }
    }
}
