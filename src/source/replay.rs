//! Trace replay: a [`KeypointSource`] backed by a recorded frame file.
//!
//! A trace is a JSON array of [`FrameObservation`]s. Replaying one drives
//! the whole pipeline without a camera or estimator, which is how the CLI,
//! the demo, and the integration tests run.

use crate::source::types::FrameObservation;
use crate::source::KeypointSource;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::Path;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Errors loading a recorded trace.
#[derive(Debug)]
pub enum ReplayError {
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {e}"),
            ReplayError::ParseError(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {}

/// A keypoint source that replays a recorded trace in order.
#[derive(Debug)]
pub struct ReplaySource {
    frames: std::vec::IntoIter<FrameObservation>,
}

impl ReplaySource {
    /// Load a trace from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ReplayError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ReplayError::IoError(e.to_string()))?;
        let frames: Vec<FrameObservation> =
            serde_json::from_str(&content).map_err(|e| ReplayError::ParseError(e.to_string()))?;
        Ok(Self::from_frames(frames))
    }

    /// Build a source from frames already in memory.
    pub fn from_frames(frames: Vec<FrameObservation>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl KeypointSource for ReplaySource {
    fn next_frame(&mut self) -> Option<FrameObservation> {
        self.frames.next()
    }
}

/// Runs a [`KeypointSource`] on its own thread, delivering frames over a
/// bounded channel at a fixed tick interval.
///
/// Frames stay in source order; the consuming loop remains a single
/// stream, so the ordering guarantee of the gesture core is preserved.
pub struct SourceRunner {
    receiver: Receiver<FrameObservation>,
    handle: Option<JoinHandle<()>>,
}

impl SourceRunner {
    /// Spawn `source` with the given inter-frame delay. A zero delay
    /// replays as fast as the consumer drains the channel.
    pub fn spawn<S: KeypointSource + 'static>(mut source: S, tick: Duration) -> Self {
        let (sender, receiver): (Sender<FrameObservation>, Receiver<FrameObservation>) =
            bounded(1024);

        let handle = thread::spawn(move || {
            while let Some(frame) = source.next_frame() {
                if sender.send(frame).is_err() {
                    // Consumer dropped the receiver; stop producing.
                    break;
                }
                if !tick.is_zero() {
                    thread::sleep(tick);
                }
            }
        });

        Self {
            receiver,
            handle: Some(handle),
        }
    }

    /// Get the receiver for frame observations.
    pub fn receiver(&self) -> &Receiver<FrameObservation> {
        &self.receiver
    }

    /// Wait for the producer thread to finish. Closes the channel first so
    /// a producer blocked on a full channel can exit.
    pub fn join(mut self) {
        let handle = self.handle.take();
        drop(self);
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::types::Hand;

    #[test]
    fn test_replay_order() {
        let frames = vec![
            FrameObservation::empty(0),
            FrameObservation::with_hand(1, Hand::from_points(vec![(0.0, 0.0)])),
            FrameObservation::empty(2),
        ];
        let mut source = ReplaySource::from_frames(frames);

        assert_eq!(source.next_frame().unwrap().seq, 0);
        assert_eq!(source.next_frame().unwrap().seq, 1);
        assert_eq!(source.next_frame().unwrap().seq, 2);
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn test_runner_delivers_all_frames() {
        let frames: Vec<FrameObservation> = (0..10).map(FrameObservation::empty).collect();
        let runner = SourceRunner::spawn(ReplaySource::from_frames(frames), Duration::ZERO);

        let mut seqs = Vec::new();
        while let Ok(frame) = runner.receiver().recv_timeout(Duration::from_secs(1)) {
            seqs.push(frame.seq);
            if seqs.len() == 10 {
                break;
            }
        }
        runner.join();

        assert_eq!(seqs, (0..10).collect::<Vec<u64>>());
    }

    #[test]
    fn test_trace_round_trip_through_file() {
        let frames = vec![FrameObservation::with_hand(
            7,
            Hand::from_points(vec![(10.0, 10.0), (10.0, 40.0)]),
        )];
        let json = serde_json::to_string(&frames).unwrap();

        let dir = std::env::temp_dir().join("gesturedrop-replay-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("trace.json");
        std::fs::write(&path, json).unwrap();

        let mut source = ReplaySource::from_file(&path).unwrap();
        let frame = source.next_frame().unwrap();
        assert_eq!(frame.seq, 7);
        assert_eq!(frame.hands.len(), 1);
    }

    #[test]
    fn test_malformed_trace_is_parse_error() {
        let dir = std::env::temp_dir().join("gesturedrop-replay-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        match ReplaySource::from_file(&path) {
            Err(ReplayError::ParseError(_)) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
