//! Game state and core types
//!
//! Everything the presentation layer may read lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// No targets yet, waiting for a start request
    #[default]
    Ready,
    /// Targets on screen, clock running
    Playing,
    /// A target was clicked out of order
    GameOver,
    /// Every target counted down and vanished
    Win,
}

impl GameStatus {
    /// True for `GameOver` and `Win`
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Win)
    }
}

/// Lifecycle of a single target. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetState {
    /// Waiting to be clicked
    Normal,
    /// Clicked in order; vanishes when the countdown runs out
    Active { countdown: f32 },
    /// Gone from the play area
    Hidden,
}

/// A numbered target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Position in the click order (0-based)
    pub index: usize,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub state: TargetState,
}

impl Target {
    pub fn new(index: usize, pos: Vec2) -> Self {
        Self {
            index,
            pos,
            state: TargetState::Normal,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Remaining seconds, present only while active
    pub fn countdown(&self) -> Option<f32> {
        match self.state {
            TargetState::Active { countdown } => Some(countdown),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TargetState::Active { .. })
    }

    pub fn is_hidden(&self) -> bool {
        self.state == TargetState::Hidden
    }

    /// Chebyshev distance between top-left corners
    #[inline]
    pub fn chebyshev_distance(&self, other: &Target) -> f32 {
        let d = (self.pos - other.pos).abs();
        d.x.max(d.y)
    }
}

/// Notifications emitted by the engine after each transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new round began
    Started { target_count: usize },
    /// Elapsed-time clock advanced
    Ticked { elapsed: f32 },
    /// Target clicked in order, countdown begins
    TargetActivated { index: usize },
    /// Target countdown ran out
    TargetHidden { index: usize },
    /// Out-of-order click ended the round
    WrongTarget { expected: usize, clicked: usize },
    /// All targets cleared
    Cleared { elapsed: f32 },
    /// Autoplay switched on or off
    AutoplayChanged { enabled: bool },
    /// Back to `Ready` with no targets
    Reset,
}

/// Read-only copy of the observable game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    /// Seconds since start, one decimal
    pub elapsed: f32,
    pub targets: Vec<Target>,
    pub next_index: usize,
    pub autoplay: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_only_when_active() {
        let mut target = Target::new(0, Vec2::new(10.0, 20.0));
        assert_eq!(target.countdown(), None);
        assert_eq!((target.left(), target.top()), (10.0, 20.0));

        target.state = TargetState::Active { countdown: 2.5 };
        assert_eq!(target.countdown(), Some(2.5));
        assert!(target.is_active());

        target.state = TargetState::Hidden;
        assert_eq!(target.countdown(), None);
        assert!(target.is_hidden());
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = Target::new(0, Vec2::new(0.0, 0.0));
        let b = Target::new(1, Vec2::new(-30.0, 12.0));
        assert_eq!(a.chebyshev_distance(&b), 30.0);
        assert_eq!(b.chebyshev_distance(&a), 30.0);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!GameStatus::Ready.is_terminal());
        assert!(!GameStatus::Playing.is_terminal());
        assert!(GameStatus::GameOver.is_terminal());
        assert!(GameStatus::Win.is_terminal());
    }
}
