//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Seeded RNG only (layouts are reproducible from the seed)
//! - Time enters only through `Game::tick` / `Game::update`
//! - Observers get read-only access after each transition

pub mod autoplay;
pub mod engine;
pub mod layout;
pub mod state;
pub mod timer;

pub use autoplay::Autoplay;
pub use engine::{Game, Observer};
pub use layout::{Layout, PlayArea, generate};
pub use state::{GameEvent, GameStatus, Snapshot, Target, TargetState};
pub use timer::{Delay, Interval};
