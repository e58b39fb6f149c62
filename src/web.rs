//! Browser bindings
//!
//! The page owns the DOM: it forwards input events here and redraws from
//! `view()` on every animation frame.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::ui::Controller;

/// Longest frame gap fed to the engine; larger gaps (hidden tab) are dropped
const MAX_FRAME_MS: f64 = 250.0;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Click Order (web) starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    ui: Controller,
    last_frame: Option<f64>,
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        WebGame {
            ui: Controller::from_settings(&settings),
            last_frame: None,
        }
    }

    /// Count input changed
    pub fn set_target_count(&mut self, raw: &str) {
        self.ui.set_target_count(raw);
    }

    pub fn start(&mut self) {
        self.ui.request_start();
    }

    pub fn click(&mut self, index: usize) {
        self.ui.request_click(index);
    }

    pub fn toggle_autoplay(&mut self) {
        self.ui.request_autoplay_toggle();
    }

    pub fn reset(&mut self) {
        self.ui.request_reset();
    }

    /// Advance timers; pass the `requestAnimationFrame` timestamp (ms)
    pub fn frame(&mut self, now_ms: f64) {
        if let Some(last) = self.last_frame {
            let dt_ms = (now_ms - last).clamp(0.0, MAX_FRAME_MS);
            self.ui.update(Duration::from_secs_f64(dt_ms / 1000.0));
        }
        self.last_frame = Some(now_ms);
    }

    /// Current HUD and visible targets as a plain JS object
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let json = serde_json::to_string(&self.ui.view())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        js_sys::JSON::parse(&json)
    }
}
