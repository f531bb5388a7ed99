//! Detection session: one tracked subject wired end to end.
//!
//! Owns the proximity evaluator, the gesture state machine, and the
//! transfer trigger for a single subject, and applies the frame error
//! policy: a frame the evaluator rejects is skipped and counted, never
//! propagated, and the machine retries on the next frame unchanged.

use crate::config::{ConfigError, GestureConfig};
use crate::core::gesture::{GestureState, GestureStateMachine, TransitionKind};
use crate::core::proximity::{ProximityEvaluator, ProximityReport};
use crate::source::types::FrameObservation;
use crate::stats::SharedSessionStats;
use crate::transfer::{TransferRequest, TransferTrigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A gesture transition enriched with frame context, as delivered to the
/// session's caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureTransition {
    pub kind: TransitionKind,
    /// Subject identifier from the session config, if one was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Sequence number of the frame that caused the transition.
    pub seq: u64,
    /// Timestamp of that frame.
    pub timestamp: DateTime<Utc>,
    /// Close-pair count observed in that frame.
    pub close_count: usize,
}

/// One tracked subject's pipeline: evaluator -> state machine -> trigger.
///
/// Frames must arrive in source order; the session is not safe to drive
/// from multiple threads. Multi-hand support means one session per
/// subject, each with independently owned state.
pub struct DetectionSession {
    config: GestureConfig,
    evaluator: ProximityEvaluator,
    machine: GestureStateMachine,
    trigger: Box<dyn TransferTrigger>,
    /// Label of the file armed for transfer, handed to the trigger on
    /// every release.
    file: String,
    stats: Option<SharedSessionStats>,
    /// Last proximity report, kept for overlay consumers.
    last_report: Option<ProximityReport>,
}

impl DetectionSession {
    /// Build a session. Fails fast on an invalid gesture configuration;
    /// no frame must ever be processed under one.
    pub fn new(
        config: GestureConfig,
        file: impl Into<String>,
        trigger: Box<dyn TransferTrigger>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let evaluator =
            ProximityEvaluator::new(config.proximity_pairs.clone(), config.fingertips.clone());
        Ok(Self {
            config,
            evaluator,
            machine: GestureStateMachine::new(),
            trigger,
            file: file.into(),
            stats: None,
            last_report: None,
        })
    }

    /// Attach a shared stats log; counters are updated per frame.
    pub fn with_stats(mut self, stats: SharedSessionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Current gesture state of the tracked subject.
    pub fn state(&self) -> GestureState {
        self.machine.state()
    }

    /// The proximity report of the most recent processed frame, for
    /// overlay rendering. `None` before the first frame with a hand.
    pub fn last_report(&self) -> Option<&ProximityReport> {
        self.last_report.as_ref()
    }

    /// Process one frame observation, in source order.
    ///
    /// Only the first hand in the frame is considered (single-subject
    /// policy). Absence of a hand holds the state. Returns the transition
    /// this frame caused, if any; a `Released` transition has already been
    /// handed to the transfer trigger when this returns.
    pub fn process_frame(&mut self, observation: &FrameObservation) -> Option<GestureTransition> {
        if let Some(ref stats) = self.stats {
            stats.record_frame();
        }

        let Some(hand) = observation.primary_hand() else {
            if let Some(ref stats) = self.stats {
                stats.record_empty_frame();
            }
            // Absence of detection is not an open hand; state held.
            let _ = self.machine.observe_absent();
            return None;
        };

        let report = match self.evaluator.evaluate(hand, self.config.threshold) {
            Ok(report) => report,
            Err(e) => {
                // Frame discarded; state unchanged; resume next frame.
                eprintln!("Warning: frame {} skipped: {e}", observation.seq);
                if let Some(ref stats) = self.stats {
                    stats.record_skipped_frame();
                }
                return None;
            }
        };

        let close_count = report.close_count();
        self.last_report = Some(report);

        let kind = self.machine.observe(close_count)?;

        let transition = GestureTransition {
            kind,
            subject: self.config.subject.clone(),
            seq: observation.seq,
            timestamp: observation.timestamp,
            close_count,
        };

        match kind {
            TransitionKind::GrabStarted => {
                if let Some(ref stats) = self.stats {
                    stats.record_grab();
                }
            }
            TransitionKind::Released => {
                if let Some(ref stats) = self.stats {
                    stats.record_release();
                }
                self.fire_transfer(&transition);
            }
        }

        Some(transition)
    }

    /// Reset to `Idle`. Call when the camera session restarts; the
    /// session does not detect stream boundaries itself.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.last_report = None;
    }

    fn fire_transfer(&mut self, transition: &GestureTransition) {
        let request = TransferRequest {
            file: self.file.clone(),
            subject: transition.subject.clone(),
            requested_at: transition.timestamp,
        };
        match self.trigger.transfer(&request) {
            Ok(()) => {
                if let Some(ref stats) = self.stats {
                    stats.record_transfer();
                }
            }
            Err(e) => {
                // The collaborator's failure, reported on its own channel;
                // the gesture core does not retry.
                eprintln!("Warning: transfer of '{}' failed: {e}", self.file);
                if let Some(ref stats) = self.stats {
                    stats.record_transfer_failure();
                }
            }
        }
    }
}
