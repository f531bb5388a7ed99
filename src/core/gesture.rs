//! The grab/release gesture state machine.
//!
//! Converts a per-frame close-pair count into a debounced event stream.
//! Entering `Grabbing` needs at least one close pair; leaving it needs a
//! fully open hand (zero close pairs). The asymmetry is deliberate
//! debouncing: a detector flickering between 0 and 1 close pairs while the
//! hand is loosely closed must not re-emit `GrabStarted`, and only an
//! unambiguous open hand fires `Released`.

use serde::{Deserialize, Serialize};

/// The two states of a tracked subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureState {
    /// Hand open or not yet seen. Initial state and reset target.
    Idle,
    /// Hand closed; waiting for it to fully open.
    Grabbing,
}

/// A state transition emitted by [`GestureStateMachine::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// The hand closed (`Idle` -> `Grabbing`). Notification only; never
    /// triggers the transfer.
    GrabStarted,
    /// The hand opened (`Grabbing` -> `Idle`). The only event that reaches
    /// the transfer trigger.
    Released,
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionKind::GrabStarted => write!(f, "grab started"),
            TransitionKind::Released => write!(f, "released"),
        }
    }
}

/// Per-subject gesture state.
///
/// The state is owned exclusively by this machine and mutated only by
/// [`observe`](Self::observe) and [`reset`](Self::reset). One instance per
/// tracked subject; never share an instance across subjects.
#[derive(Debug, Clone)]
pub struct GestureStateMachine {
    state: GestureState,
}

impl GestureStateMachine {
    /// A new machine in `Idle`.
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
        }
    }

    /// Current state. Observational only; transitions happen exclusively
    /// through [`observe`](Self::observe).
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Feed one frame's close-pair count and get the transition, if any.
    ///
    /// At most one transition per frame. The rule is evaluated against the
    /// state before update, and the update happens together with the event:
    ///
    /// - `Idle` with count >= 1 -> `Grabbing`, emits `GrabStarted`
    /// - `Grabbing` with count == 0 -> `Idle`, emits `Released`
    /// - anything else -> no transition, no event
    pub fn observe(&mut self, close_count: usize) -> Option<TransitionKind> {
        match (self.state, close_count) {
            (GestureState::Idle, n) if n >= 1 => {
                self.state = GestureState::Grabbing;
                Some(TransitionKind::GrabStarted)
            }
            (GestureState::Grabbing, 0) => {
                self.state = GestureState::Idle;
                Some(TransitionKind::Released)
            }
            _ => None,
        }
    }

    /// Feed a frame with no detected hand: no new information, hold state.
    pub fn observe_absent(&mut self) -> Option<TransitionKind> {
        None
    }

    /// Return to `Idle`, e.g. when the camera session restarts. The owner
    /// calls this explicitly; the machine does not detect session
    /// boundaries itself.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let machine = GestureStateMachine::new();
        assert_eq!(machine.state(), GestureState::Idle);
    }

    #[test]
    fn test_grab_on_first_close_pair() {
        let mut machine = GestureStateMachine::new();
        assert_eq!(machine.observe(1), Some(TransitionKind::GrabStarted));
        assert_eq!(machine.state(), GestureState::Grabbing);
    }

    #[test]
    fn test_release_on_open_hand() {
        let mut machine = GestureStateMachine::new();
        machine.observe(3);
        assert_eq!(machine.observe(0), Some(TransitionKind::Released));
        assert_eq!(machine.state(), GestureState::Idle);
    }

    #[test]
    fn test_hysteresis_two_full_cycles() {
        // From Idle, counts [1, 1, 0, 1, 0] produce
        // [GrabStarted, none, Released, GrabStarted, Released].
        let mut machine = GestureStateMachine::new();
        let transitions: Vec<Option<TransitionKind>> =
            [1, 1, 0, 1, 0].iter().map(|&n| machine.observe(n)).collect();

        assert_eq!(
            transitions,
            vec![
                Some(TransitionKind::GrabStarted),
                None,
                Some(TransitionKind::Released),
                Some(TransitionKind::GrabStarted),
                Some(TransitionKind::Released),
            ]
        );
    }

    #[test]
    fn test_no_rearm_while_grabbing() {
        // Count rising again without touching 0 emits nothing.
        let mut machine = GestureStateMachine::new();
        assert_eq!(machine.observe(1), Some(TransitionKind::GrabStarted));
        assert_eq!(machine.observe(2), None);
        assert_eq!(machine.observe(1), None);
        assert_eq!(machine.observe(8), None);
        assert_eq!(machine.state(), GestureState::Grabbing);
    }

    #[test]
    fn test_idle_holds_on_zero() {
        let mut machine = GestureStateMachine::new();
        for _ in 0..10 {
            assert_eq!(machine.observe(0), None);
        }
        assert_eq!(machine.state(), GestureState::Idle);
    }

    #[test]
    fn test_single_release_per_gesture() {
        // One monotone rise-then-fall yields exactly one Released.
        let mut machine = GestureStateMachine::new();
        let counts = [0, 0, 1, 2, 4, 8, 8, 4, 2, 1, 0, 0, 0];
        let released = counts
            .iter()
            .filter_map(|&n| machine.observe(n))
            .filter(|t| *t == TransitionKind::Released)
            .count();
        assert_eq!(released, 1);
    }

    #[test]
    fn test_absence_holds_state() {
        let mut machine = GestureStateMachine::new();
        for _ in 0..5 {
            assert_eq!(machine.observe_absent(), None);
        }
        assert_eq!(machine.state(), GestureState::Idle);

        machine.observe(2);
        for _ in 0..5 {
            assert_eq!(machine.observe_absent(), None);
        }
        assert_eq!(machine.state(), GestureState::Grabbing);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut machine = GestureStateMachine::new();
        machine.observe(1);
        assert_eq!(machine.state(), GestureState::Grabbing);

        machine.reset();
        assert_eq!(machine.state(), GestureState::Idle);

        // A fresh grab after reset emits again.
        assert_eq!(machine.observe(1), Some(TransitionKind::GrabStarted));
    }
}
