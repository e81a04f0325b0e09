/// Directory under the asset root holding one folder per figure kind.
pub const MODEL_DIRECTORY: &str = "models";
pub const MODEL_SCENE_FILE: &str = "scene.gltf";

/// Native builds read the host data block from this asset.
pub const FLOOR_DATA_PATH: &str = "floor_data.json";

/// WASM builds read the host data block from this DOM element.
pub const FLOOR_DATA_ELEMENT_ID: &str = "floor-data";

pub const DELETE_FIGURE_ENDPOINT: &str = "/delete_figure";
pub const EDIT_FIGURE_ENDPOINT: &str = "/edit_figure";
pub const ADD_FIGURE_ENDPOINT: &str = "/add_figure/";
pub const UPDATE_FLOOR_ENDPOINT: &str = "/update_floor/";
pub const ASSIGN_RACK_ROUTE: &str = "/mtx/assign_rack";
pub const EDIT_RACK_ROUTE: &str = "/mtx/edit_rack";

pub fn model_path(figure_name: &str) -> String {
    format!("{}/{}/{}", MODEL_DIRECTORY, figure_name, MODEL_SCENE_FILE)
}
