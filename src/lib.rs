//! gesturedrop — debounced grab/release gesture recognition.
//!
//! This library turns a stream of per-frame hand-keypoint observations
//! into a discrete gesture event stream: a hand closing emits
//! `GrabStarted`, a hand fully opening emits `Released`, and `Released`
//! fires the configured transfer trigger exactly once per physical
//! gesture.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         gesturedrop                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌────────────────┐        │
//! │  │ Keypoint   │──▶│ Proximity  │──▶│ GestureState   │        │
//! │  │ Source     │   │ Evaluator  │   │ Machine        │        │
//! │  └────────────┘   └────────────┘   └────────────────┘        │
//! │        │                                   │                 │
//! │        ▼                                   ▼                 │
//! │  ┌────────────┐                    ┌────────────────┐        │
//! │  │ Session    │                    │ Transfer       │        │
//! │  │ Stats      │                    │ Trigger        │        │
//! │  └────────────┘                    └────────────────┘        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pose estimator and the transfer transport live outside this crate;
//! they plug in through the [`source::KeypointSource`] and
//! [`transfer::TransferTrigger`] traits.
//!
//! # Example
//!
//! ```no_run
//! use gesturedrop::config::GestureConfig;
//! use gesturedrop::core::DetectionSession;
//! use gesturedrop::source::{KeypointSource, ReplaySource};
//! use gesturedrop::transfer::LoggingTrigger;
//!
//! let mut session = DetectionSession::new(
//!     GestureConfig::default(),
//!     "report.pdf",
//!     Box::new(LoggingTrigger),
//! )
//! .expect("valid configuration");
//!
//! let mut source = ReplaySource::from_file("trace.json".as_ref()).expect("trace");
//! while let Some(frame) = source.next_frame() {
//!     if let Some(transition) = session.process_frame(&frame) {
//!         println!("{:?}", transition.kind);
//!     }
//! }
//! ```

pub mod config;
pub mod core;
pub mod report;
pub mod source;
pub mod stats;
pub mod transfer;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError, GestureConfig, ProximityPair, DEFAULT_THRESHOLD};
pub use core::{
    DetectionSession, GestureState, GestureStateMachine, GestureTransition, ProximityEvaluator,
    ProximityReport, TransitionKind,
};
pub use report::{ReportBuilder, SessionReport, PRODUCER_NAME, REPORT_VERSION};
pub use source::{FrameObservation, Hand, Keypoint, KeypointSource, Point, ReplaySource};
pub use stats::{SessionStats, SharedSessionStats, StatsSnapshot};
pub use transfer::{LoggingTrigger, TransferError, TransferRequest, TransferTrigger};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
