//! Game engine
//!
//! `Game` owns every piece of mutable state plus the three timers that run
//! while a round is in progress:
//! - the elapsed-time clock (periodic),
//! - the countdown process shared by all active targets (periodic, exists
//!   only while something is active),
//! - the autoplay click (one-shot, re-armed after each successful click).
//!
//! Any exit from `Playing` drops all three before observers hear about it.

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::autoplay::Autoplay;
use super::layout;
use super::state::{GameEvent, GameStatus, Snapshot, Target, TargetState};
use super::timer::Interval;
use crate::consts::COUNTDOWN_FLOOR;
use crate::round_tenths;
use crate::settings::{GameConfig, Settings};

/// Callback invoked after every engine event with a read-only view of the game
pub type Observer = Box<dyn FnMut(&GameEvent, &Game)>;

pub struct Game {
    config: GameConfig,
    rng: Pcg32,
    targets: Vec<Target>,
    status: GameStatus,
    /// Seconds since start, kept at one decimal
    elapsed: f32,
    /// Next index the player must click
    next_index: usize,
    /// First target that is not yet hidden. Targets hide in click order,
    /// so everything in `first_live..next_index` is active.
    first_live: usize,
    autoplay: Autoplay,
    clock: Option<Interval>,
    countdown: Option<Interval>,
    observers: Vec<Observer>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("status", &self.status)
            .field("elapsed", &self.elapsed)
            .field("targets", &self.targets.len())
            .field("next_index", &self.next_index)
            .field("autoplay", &self.autoplay.is_enabled())
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Create a game in `Ready` with a seeded layout RNG
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            targets: Vec::new(),
            status: GameStatus::Ready,
            elapsed: 0.0,
            next_index: 0,
            first_live: 0,
            autoplay: Autoplay::default(),
            clock: None,
            countdown: None,
            observers: Vec::new(),
        }
    }

    /// Create a game from settings, drawing a seed from entropy if none is set
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Layout seed: {}", seed);
        Self::new(settings.game_config(), seed)
    }

    /// Register an observer; it is called after every subsequent event
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&GameEvent, &Game) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // === Read access ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay.is_enabled()
    }

    /// Whether an automatic click is currently scheduled
    pub fn autoplay_armed(&self) -> bool {
        self.autoplay.is_armed()
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_some()
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            elapsed: self.elapsed,
            targets: self.targets.clone(),
            next_index: self.next_index,
            autoplay: self.autoplay.is_enabled(),
        }
    }

    // === Transitions ===

    /// Begin a new round with `count` freshly placed targets.
    /// Ignored for zero or for counts above the configured cap.
    pub fn start(&mut self, count: usize) {
        if count == 0 {
            log::debug!("Start ignored: no targets requested");
            return;
        }
        if count > self.config.max_target_count as usize {
            log::warn!(
                "Start ignored: {} targets exceeds cap of {}",
                count,
                self.config.max_target_count
            );
            return;
        }

        // Restarting mid-round keeps autoplay running
        let keep_autoplay = self.status == GameStatus::Playing && self.autoplay.is_enabled();

        let layout = layout::generate(count, &self.config.area, &mut self.rng);
        self.targets = layout.into_targets();
        self.elapsed = 0.0;
        self.next_index = 0;
        self.first_live = 0;
        self.status = GameStatus::Playing;
        self.clock = Some(Interval::new(self.config.tick_interval));
        self.countdown = None;

        let autoplay_dropped = if keep_autoplay {
            self.autoplay.arm(self.config.autoplay_delay);
            false
        } else {
            self.autoplay.disable()
        };

        log::info!("Started round with {} targets", count);
        self.emit(GameEvent::Started {
            target_count: count,
        });
        if autoplay_dropped {
            self.emit(GameEvent::AutoplayChanged { enabled: false });
        }
    }

    /// Click target `index`. Anything but the next expected target ends the
    /// round; indices with no target behind them are ignored.
    pub fn click(&mut self, index: usize) {
        if self.status != GameStatus::Playing {
            return;
        }
        if index >= self.targets.len() {
            log::debug!("Click on missing target {} ignored", index);
            return;
        }

        if index != self.next_index {
            log::info!(
                "Wrong target: clicked {} while {} was expected",
                index + 1,
                self.next_index + 1
            );
            let expected = self.next_index;
            self.finish(
                GameStatus::GameOver,
                GameEvent::WrongTarget {
                    expected,
                    clicked: index,
                },
            );
            return;
        }

        self.targets[index].state = TargetState::Active {
            countdown: self.config.countdown_secs,
        };
        self.next_index += 1;

        if self.countdown.is_none() {
            self.countdown = Some(Interval::new(self.config.tick_interval));
        }
        if self.next_index < self.targets.len() {
            self.autoplay.arm(self.config.autoplay_delay);
        } else {
            self.autoplay.cancel();
        }

        log::debug!("Target {} activated", index + 1);
        self.emit(GameEvent::TargetActivated { index });
    }

    /// Advance the clock and every active countdown by `delta` seconds.
    ///
    /// Values are rounded to tenths after each step, so `delta` is expected at
    /// the tenth-second cadence; anything under 0.05s is lost. Frame-rate hosts
    /// should call [`Game::update`] instead, which runs both halves from the
    /// owned timers. Negative or non-finite deltas are ignored.
    pub fn tick(&mut self, delta: f32) {
        if self.status != GameStatus::Playing || !(delta > 0.0 && delta.is_finite()) {
            return;
        }
        self.advance_clock(delta);
        self.advance_countdowns(delta);
    }

    /// Switch autoplay on or off. Only effective while playing.
    pub fn set_autoplay(&mut self, enabled: bool) {
        if self.status != GameStatus::Playing || enabled == self.autoplay.is_enabled() {
            return;
        }

        if enabled {
            self.autoplay.enable();
            if self.next_index < self.targets.len() {
                self.autoplay.arm(self.config.autoplay_delay);
            }
        } else {
            self.autoplay.disable();
        }

        log::info!("Autoplay {}", if enabled { "on" } else { "off" });
        self.emit(GameEvent::AutoplayChanged { enabled });
    }

    pub fn toggle_autoplay(&mut self) {
        self.set_autoplay(!self.autoplay.is_enabled());
    }

    /// Drop the round and return to `Ready`
    pub fn reset(&mut self) {
        self.targets.clear();
        self.status = GameStatus::Ready;
        self.elapsed = 0.0;
        self.next_index = 0;
        self.first_live = 0;
        self.clock = None;
        self.countdown = None;
        self.autoplay.disable();

        log::info!("Game reset");
        self.emit(GameEvent::Reset);
    }

    /// Run the owned timers for `dt` of real time, firing each due timer in
    /// time order. Ties fire clock, then countdown, then autoplay.
    pub fn update(&mut self, dt: Duration) {
        let mut remaining = dt;
        while self.status == GameStatus::Playing {
            let Some(step) = self.next_due() else {
                break;
            };
            if step > remaining {
                self.run_timers(remaining);
                break;
            }
            remaining -= step;
            self.run_timers(step);
        }
    }

    // === Internals ===

    fn next_due(&self) -> Option<Duration> {
        [
            self.clock.as_ref().map(Interval::due_in),
            self.countdown.as_ref().map(Interval::due_in),
            self.autoplay.due_in(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn run_timers(&mut self, dt: Duration) {
        let clock_fired = self.clock.as_mut().is_some_and(|c| c.advance(dt));
        let countdown_fired = self.countdown.as_mut().is_some_and(|c| c.advance(dt));
        let autoplay_fired = self.autoplay.advance(dt);

        let secs = self.config.tick_secs();
        if clock_fired {
            self.advance_clock(secs);
        }
        if countdown_fired && self.status == GameStatus::Playing {
            self.advance_countdowns(secs);
        }
        if autoplay_fired && self.status == GameStatus::Playing {
            let index = self.next_index;
            log::debug!("Autoplay clicks target {}", index + 1);
            self.click(index);
        }
    }

    fn advance_clock(&mut self, delta: f32) {
        self.elapsed = round_tenths(self.elapsed + delta);
        self.emit(GameEvent::Ticked {
            elapsed: self.elapsed,
        });
    }

    fn advance_countdowns(&mut self, delta: f32) {
        let mut hidden = Vec::new();
        for target in &mut self.targets[self.first_live..self.next_index] {
            if let TargetState::Active { countdown } = target.state {
                let left = round_tenths(countdown - delta);
                target.state = if left <= COUNTDOWN_FLOOR {
                    hidden.push(target.index);
                    TargetState::Hidden
                } else {
                    TargetState::Active { countdown: left }
                };
            }
        }
        while self
            .targets
            .get(self.first_live)
            .is_some_and(Target::is_hidden)
        {
            self.first_live += 1;
        }

        if self.first_live == self.next_index {
            self.countdown = None;
        }

        for index in hidden {
            log::debug!("Target {} hidden", index + 1);
            self.emit(GameEvent::TargetHidden { index });
        }

        if self.first_live == self.targets.len() {
            log::info!("All {} targets cleared in {:.1}s", self.targets.len(), self.elapsed);
            let elapsed = self.elapsed;
            self.finish(GameStatus::Win, GameEvent::Cleared { elapsed });
        }
    }

    /// Enter a terminal status: stop every timer, force autoplay off, notify
    fn finish(&mut self, status: GameStatus, event: GameEvent) {
        self.status = status;
        self.clock = None;
        self.countdown = None;
        let autoplay_dropped = self.autoplay.disable();

        self.emit(event);
        if autoplay_dropped {
            self.emit(GameEvent::AutoplayChanged { enabled: false });
        }
    }

    fn emit(&mut self, event: GameEvent) {
        if self.observers.is_empty() {
            return;
        }
        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            observer(&event, self);
        }
        self.observers = observers;
    }
}
