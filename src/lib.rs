use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod pages;
pub mod utils;

use app::SiteController;
use components::notification::Severity;

#[wasm_bindgen(start)]
pub fn start() {
    if let Err(e) = SiteController::init() {
        gloo_console::error!(format!("Failed to start site behaviour: {}", e));
    }
}

/// Lets other scripts on the page raise a toast: `showNotification(message, kind?)`.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) {
    let severity = kind
        .as_deref()
        .map(Severity::parse)
        .unwrap_or_default();
    match SiteController::init() {
        Ok(controller) => controller.notify(message, severity),
        Err(e) => log::error!("Cannot show notification: {}", e),
    }
}
