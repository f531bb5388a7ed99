//! Core gesture recognition.
//!
//! This module contains:
//! - Proximity evaluation over fingertip pairs
//! - The debounced grab/release state machine
//! - The detection session wiring a subject end to end

pub mod gesture;
pub mod proximity;
pub mod session;

// Re-export commonly used types
pub use gesture::{GestureState, GestureStateMachine, TransitionKind};
pub use proximity::{ProximityError, ProximityEvaluator, ProximityReport};
pub use session::{DetectionSession, GestureTransition};
