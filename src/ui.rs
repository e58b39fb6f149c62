//! Presentation adapter
//!
//! Sits between a front-end (DOM, terminal, test harness) and the engine:
//! turns raw user intents into engine calls, and the engine state into plain
//! view models a renderer can draw without knowing the rules.

use std::time::Duration;

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{Game, GameStatus, Target, TargetState};

/// Parse the target-count input box. Anything outside `1..=cap` yields 0,
/// which keeps the start button disabled.
pub fn parse_target_count(raw: &str, cap: u32) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if (1..=i64::from(cap)).contains(&n) => n as u32,
        _ => 0,
    }
}

/// Title colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Neutral,
    /// Red
    Danger,
    /// Green
    Success,
}

/// Header contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub title: &'static str,
    pub tone: Tone,
    /// Elapsed time, e.g. `"12.3s"`
    pub time_label: String,
    /// Count input is read-only during a round
    pub input_locked: bool,
    pub start_label: &'static str,
    pub start_enabled: bool,
    /// Autoplay button caption; `None` hides the button
    pub autoplay_label: Option<&'static str>,
    /// Show the button that returns a finished game to `Ready`
    pub show_reset: bool,
}

/// One drawable target (hidden targets are never emitted)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetView {
    pub index: usize,
    pub left: f32,
    pub top: f32,
    pub size: f32,
    /// `index + 1`, or the countdown with one decimal once active
    pub label: String,
    /// Fades with the countdown; 1.0 for untouched targets
    pub opacity: f32,
    pub active: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub hud: Hud,
    pub targets: Vec<TargetView>,
}

/// Owns the game plus the raw input state of the header widgets
#[derive(Debug)]
pub struct Controller {
    game: Game,
    input: String,
    requested: u32,
}

impl Controller {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            input: String::new(),
            requested: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Game::from_settings(settings))
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access for wiring observers
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Raw text of the count input
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Parsed target count (0 = invalid)
    pub fn requested_count(&self) -> u32 {
        self.requested
    }

    // === Inbound intents ===

    pub fn set_target_count(&mut self, raw: &str) {
        if self.input_locked() {
            return;
        }
        self.input = raw.to_string();
        self.requested = parse_target_count(raw, self.game.config().max_target_count);
    }

    pub fn request_start(&mut self) {
        if self.requested == 0 {
            return;
        }
        self.game.start(self.requested as usize);
    }

    /// Forward a click on a visible target
    pub fn request_click(&mut self, index: usize) {
        let visible = self
            .game
            .targets()
            .get(index)
            .is_some_and(|t| !t.is_hidden());
        if visible {
            self.game.click(index);
        }
    }

    pub fn request_autoplay_toggle(&mut self) {
        self.game.toggle_autoplay();
    }

    /// Leave a finished game and go back to `Ready`
    pub fn request_reset(&mut self) {
        if self.game.status().is_terminal() {
            self.game.reset();
        }
    }

    /// Pump the engine timers with real elapsed time
    pub fn update(&mut self, dt: Duration) {
        self.game.update(dt);
    }

    // === Outbound view model ===

    fn input_locked(&self) -> bool {
        self.game.status() == GameStatus::Playing
    }

    pub fn hud(&self) -> Hud {
        let status = self.game.status();
        let (title, tone) = match status {
            GameStatus::GameOver => ("GAME OVER", Tone::Danger),
            GameStatus::Win => ("ALL CLEARED", Tone::Success),
            GameStatus::Ready | GameStatus::Playing => ("LET'S PLAY", Tone::Neutral),
        };
        let playing = status == GameStatus::Playing;

        Hud {
            title,
            tone,
            time_label: format!("{:.1}s", self.game.elapsed()),
            input_locked: playing,
            start_label: if playing { "Restart" } else { "Start" },
            start_enabled: self.requested > 0,
            autoplay_label: playing.then(|| {
                if self.game.autoplay_enabled() {
                    "Autoplay Off"
                } else {
                    "Autoplay On"
                }
            }),
            show_reset: status.is_terminal(),
        }
    }

    pub fn target_views(&self) -> Vec<TargetView> {
        let config = self.game.config();
        self.game
            .targets()
            .iter()
            .filter_map(|t| target_view(t, config.area.target_size, config.countdown_secs))
            .collect()
    }

    pub fn view(&self) -> View {
        View {
            hud: self.hud(),
            targets: self.target_views(),
        }
    }
}

fn target_view(target: &Target, size: f32, countdown_secs: f32) -> Option<TargetView> {
    let (label, opacity, active) = match target.state {
        TargetState::Hidden => return None,
        TargetState::Normal => ((target.index + 1).to_string(), 1.0, false),
        TargetState::Active { countdown } => (
            format!("{:.1}", countdown),
            (countdown / countdown_secs).clamp(0.0, 1.0),
            true,
        ),
    };
    Some(TargetView {
        index: target.index,
        left: target.left(),
        top: target.top(),
        size,
        label,
        opacity,
        active,
    })
}
