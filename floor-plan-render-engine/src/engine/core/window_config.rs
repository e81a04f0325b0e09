use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#bevy".to_owned()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Floor Plan Viewer".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
