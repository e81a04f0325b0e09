//! Page-level browser calls: dialogs, navigation and the embedded host data
//! block. Native builds have no page, so dialogs are logged and confirmations
//! accept.

use bevy::prelude::*;

#[cfg(target_arch = "wasm32")]
use web_sys::window;

/// Blocking yes/no dialog.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        match window().map(|w| w.confirm_with_message(message)) {
            Some(Ok(answer)) => answer,
            Some(Err(e)) => {
                error!("Confirm dialog failed: {:?}", e);
                false
            }
            None => {
                error!("Window object not available");
                false
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        info!("Confirm: {} (accepted)", message);
        true
    }
}

pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(Err(e)) = window().map(|w| w.alert_with_message(message)) {
            error!("Alert dialog failed: {:?}", e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        warn!("{}", message);
    }
}

pub fn navigate(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        match window() {
            Some(w) => {
                if let Err(e) = w.location().set_href(path) {
                    error!("Failed to navigate to {}: {:?}", path, e);
                }
            }
            None => error!("Window object not available"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        info!("Navigate to: {}", path);
    }
}

pub fn reload_page() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(Err(e)) = window().map(|w| w.location().reload()) {
            error!("Failed to reload page: {:?}", e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        info!("Reload requested; restart the viewer to pick up changes");
    }
}

/// Text content of `<script id="floor-data">`, if the page embeds one.
#[cfg(target_arch = "wasm32")]
pub fn read_floor_data_element() -> Option<String> {
    use constants::path::FLOOR_DATA_ELEMENT_ID;

    window()?
        .document()?
        .get_element_by_id(FLOOR_DATA_ELEMENT_ID)?
        .text_content()
        .filter(|text| !text.trim().is_empty())
}
