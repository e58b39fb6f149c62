//! Click Order - a timed "click the numbers in order" memory game
//!
//! Core modules:
//! - `sim`: Game state machine (layout, timers, countdowns, autoplay)
//! - `settings`: Data-driven configuration
//! - `ui`: Presentation adapter (input parsing, HUD and target view models)
//! - `web`: Browser bindings (wasm32 only)

pub mod settings;
pub mod sim;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{GameConfig, Settings};
pub use sim::{Game, GameEvent, GameStatus, Target, TargetState};
pub use ui::Controller;

/// Game configuration constants
pub mod consts {
    /// Play area dimensions (pixels)
    pub const AREA_WIDTH: f32 = 400.0;
    pub const AREA_HEIGHT: f32 = 300.0;

    /// Target diameter (pixels); also the minimum Chebyshev spacing
    pub const TARGET_SIZE: f32 = 25.0;

    /// Seconds a clicked target stays on screen
    pub const COUNTDOWN_SECS: f32 = 3.0;

    /// Active targets vanish once their countdown would reach this value
    pub const COUNTDOWN_FLOOR: f32 = 0.1;

    /// Clock and countdown cadence
    pub const TICK_INTERVAL_MS: u64 = 100;

    /// Delay between automatic clicks
    pub const AUTOPLAY_DELAY_MS: u64 = 400;

    /// Largest target count accepted from the input box
    pub const MAX_TARGET_COUNT: u32 = 99_999;

    /// Placement attempts per target before overlap is accepted
    pub const PLACEMENT_ATTEMPTS: u32 = 100;
}

/// Round to one decimal place (the game's display and accumulation precision)
#[inline]
pub fn round_tenths(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
