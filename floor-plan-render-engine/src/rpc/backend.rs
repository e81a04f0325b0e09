//! Execution of backend requests built by the layout crate.
//!
//! WASM builds send them with `fetch` against the page origin (or the
//! configured base URL); native builds log a dry run. There are no retries
//! or timeouts; failures are logged.

use bevy::prelude::*;
use floor_plan_layout::backend::{BackendRequest, OnSuccess};

use crate::engine::core::settings::ViewerSettings;

/// A request ready to be sent.
#[derive(Event, Debug, Clone)]
pub struct BackendDispatch(pub BackendRequest);

pub struct BackendPlugin;

impl Plugin for BackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BackendDispatch>()
            .add_systems(Update, execute_backend_requests);
    }
}

fn execute_backend_requests(
    mut requests: EventReader<BackendDispatch>,
    settings: Res<ViewerSettings>,
) {
    for BackendDispatch(request) in requests.read() {
        let url = format!("{}{}", settings.backend_base_url, request.path);
        info!("→ {} {}", request.method.as_str(), url);

        #[cfg(target_arch = "wasm32")]
        {
            let request = request.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match send_request(&request, &url).await {
                    Ok(()) => {
                        info!("✓ {} {} succeeded", request.method.as_str(), url);
                        if request.on_success == OnSuccess::ReloadPage {
                            super::host::reload_page();
                        }
                    }
                    Err(e) => error!("{} {} failed: {}", request.method.as_str(), url, e),
                }
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let body = request
                .body
                .as_ref()
                .map(|b| b.encode())
                .unwrap_or_default();
            info!("Dry run (no backend on native): body={}", body);
            if request.on_success == OnSuccess::ReloadPage {
                super::host::reload_page();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn send_request(request: &BackendRequest, url: &str) -> Result<(), String> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, Response};

    let js_err = |e: JsValue| format!("{:?}", e);

    let init = RequestInit::new();
    init.set_method(request.method.as_str());

    let headers = Headers::new().map_err(js_err)?;
    if let Some(body) = &request.body {
        headers
            .set("Content-Type", body.content_type())
            .map_err(js_err)?;
        init.set_body(&JsValue::from_str(&body.encode()));
    }
    init.set_headers(&headers);

    let fetch_request = Request::new_with_str_and_init(url, &init).map_err(js_err)?;
    let window = web_sys::window().ok_or_else(|| "Window object not available".to_string())?;
    let response = JsFuture::from(window.fetch_with_request(&fetch_request))
        .await
        .map_err(js_err)?;
    let response: Response = response.dyn_into().map_err(js_err)?;

    if response.ok() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()))
    }
}
