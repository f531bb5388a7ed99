//! Frame acquisition for the gesture pipeline.
//!
//! The pose estimator itself lives outside this crate; anything that can
//! produce per-tick [`FrameObservation`]s implements [`KeypointSource`] and
//! is injected into the session owner. This crate ships a trace replay
//! source for offline runs, demos, and tests.

pub mod replay;
pub mod types;

pub use replay::{ReplayError, ReplaySource, SourceRunner};
pub use types::{FrameObservation, Hand, Handedness, Keypoint, Point};

/// A producer of per-frame hand observations.
///
/// One call per sampling tick. Returning `None` means the source is
/// exhausted (e.g. end of a recorded trace) and the session loop should
/// stop; a tick with no detected hands is an observation with an empty
/// `hands` list, not `None`.
pub trait KeypointSource: Send {
    fn next_frame(&mut self) -> Option<FrameObservation>;
}
