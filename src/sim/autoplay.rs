//! Autoplay driver
//!
//! Clicks the next expected target on a fixed delay. The engine re-arms it
//! after every successful click and drops the pending click whenever the game
//! leaves `Playing`, so a stale click can never land on a new round.

use std::time::Duration;

use super::timer::Delay;

#[derive(Debug, Clone, Default)]
pub struct Autoplay {
    enabled: bool,
    pending: Option<Delay>,
}

impl Autoplay {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether an automatic click is scheduled
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Switch on; does not schedule anything by itself
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Switch off and drop any scheduled click. Returns whether it was on.
    pub fn disable(&mut self) -> bool {
        self.pending = None;
        std::mem::replace(&mut self.enabled, false)
    }

    /// Schedule the next click `delay` from now, replacing any pending one
    pub fn arm(&mut self, delay: Duration) {
        if self.enabled {
            self.pending = Some(Delay::new(delay));
        }
    }

    /// Drop the scheduled click but stay enabled
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn due_in(&self) -> Option<Duration> {
        self.pending.as_ref().map(Delay::due_in)
    }

    /// Advance the pending delay. Returns true when a click is due; the
    /// delay is consumed and must be re-armed by the caller.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let fired = self.pending.as_mut().is_some_and(|delay| delay.advance(dt));
        if fired {
            self.pending = None;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(400);

    #[test]
    fn test_arm_requires_enabled() {
        let mut autoplay = Autoplay::default();
        autoplay.arm(DELAY);
        assert!(!autoplay.is_armed());

        autoplay.enable();
        autoplay.arm(DELAY);
        assert!(autoplay.is_armed());
        assert_eq!(autoplay.due_in(), Some(DELAY));
    }

    #[test]
    fn test_fires_once_then_needs_rearm() {
        let mut autoplay = Autoplay::default();
        autoplay.enable();
        autoplay.arm(DELAY);
        assert!(!autoplay.advance(Duration::from_millis(300)));
        assert!(autoplay.advance(Duration::from_millis(100)));
        assert!(!autoplay.is_armed());
        assert!(!autoplay.advance(DELAY));
    }

    #[test]
    fn test_disable_drops_pending_click() {
        let mut autoplay = Autoplay::default();
        autoplay.enable();
        autoplay.arm(DELAY);
        assert!(autoplay.disable());
        assert!(!autoplay.is_enabled());
        assert!(!autoplay.advance(DELAY));
        assert!(!autoplay.disable());
    }
}
