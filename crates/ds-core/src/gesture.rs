/// How long a press must be held before it counts as sustained, in
/// milliseconds.
pub const HOLD_DURATION_MS: u64 = 550;

/// Classification of one completed interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Press released before the hold deadline.
    Short,
    /// Hold deadline elapsed while still pressed.
    Sustained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Pressed,
    /// The sustained action already fired; the trailing release must not
    /// fire the short action as well.
    HoldFired,
}

/// Press/release disambiguation per interactive element.
///
/// The tracker itself is pure and event-driven; the caller owns the timer.
/// [`press`](Self::press) returns a generation token the caller arms a
/// [`HOLD_DURATION_MS`] timer with, and [`hold_elapsed`](Self::hold_elapsed)
/// ignores tokens from superseded cycles, so a stale timer callback can
/// never fire into a later interaction.
///
/// Exactly one outcome fires per cycle, never both and never a double.
///
/// ```text
/// Idle ──press──→ Pressed ──release──→ Idle        (Short)
///                 Pressed ──deadline─→ HoldFired   (Sustained)
///                 Pressed ──leave────→ Idle        (nothing)
///                 HoldFired ─release─→ Idle        (nothing)
/// ```
#[derive(Debug, Default)]
pub struct GestureTracker {
    phase: Phase,
    generation: u64,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new interaction cycle. Any previous cycle is abandoned and
    /// its pending timer invalidated. Returns the token to arm the hold
    /// timer with.
    pub fn press(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Pressed;
        self.generation
    }

    /// End of the interaction. Fires the short outcome iff the hold
    /// deadline has not fired first.
    pub fn release(&mut self) -> Option<GestureOutcome> {
        match self.phase {
            Phase::Pressed => {
                self.phase = Phase::Idle;
                self.generation += 1; // cancels the pending timer
                Some(GestureOutcome::Short)
            }
            Phase::HoldFired => {
                self.phase = Phase::Idle;
                None
            }
            Phase::Idle => None,
        }
    }

    /// Pointer left the element before the cycle resolved: fire nothing.
    pub fn leave(&mut self) {
        if self.phase != Phase::Idle {
            self.phase = Phase::Idle;
            self.generation += 1;
        }
    }

    /// Hold timer callback. Stale tokens (from a cycle that was released,
    /// left, or superseded by a new press) are no-ops.
    pub fn hold_elapsed(&mut self, token: u64) -> Option<GestureOutcome> {
        if token != self.generation || self.phase != Phase::Pressed {
            return None;
        }
        self.phase = Phase::HoldFired;
        Some(GestureOutcome::Sustained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_release_fires_short_once() {
        let mut tracker = GestureTracker::new();
        let token = tracker.press();

        assert_eq!(tracker.release(), Some(GestureOutcome::Short));
        // The timer later fires anyway; the stale token must do nothing.
        assert_eq!(tracker.hold_elapsed(token), None);
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn test_deadline_fires_sustained_and_suppresses_release() {
        let mut tracker = GestureTracker::new();
        let token = tracker.press();

        assert_eq!(tracker.hold_elapsed(token), Some(GestureOutcome::Sustained));
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn test_deadline_fires_at_most_once() {
        let mut tracker = GestureTracker::new();
        let token = tracker.press();

        assert_eq!(tracker.hold_elapsed(token), Some(GestureOutcome::Sustained));
        assert_eq!(tracker.hold_elapsed(token), None);
    }

    #[test]
    fn test_leave_cancels_the_cycle() {
        let mut tracker = GestureTracker::new();
        let token = tracker.press();

        tracker.leave();
        assert_eq!(tracker.hold_elapsed(token), None);
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn test_new_press_invalidates_previous_timer() {
        let mut tracker = GestureTracker::new();
        let stale = tracker.press();
        let current = tracker.press();

        assert_eq!(tracker.hold_elapsed(stale), None);
        assert_eq!(tracker.hold_elapsed(current), Some(GestureOutcome::Sustained));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.release(), None);
    }
}
