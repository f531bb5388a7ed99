//! Session report building and export.
//!
//! A report is the durable record of one detection session: producer
//! metadata, the configuration that was in force, and every transition
//! with its frame context. Reports serialize to JSON and land in the
//! export directory at the end of a run.

use crate::config::GestureConfig;
use crate::core::session::GestureTransition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// The current report format version.
pub const REPORT_VERSION: &str = "1.0";

/// The name of this producer.
pub const PRODUCER_NAME: &str = "gesturedrop";

/// Report producer metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    /// Name of the producing software
    pub name: String,
    /// Version of the producing software
    pub version: String,
    /// Unique instance identifier (UUID)
    pub instance_id: String,
}

/// The exported record of one detection session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Report format version
    pub report_version: String,
    pub producer: ReportProducer,
    /// Subject identifier, if the session was tagged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// File that was armed for transfer
    pub file: String,
    /// Threshold in force, pixels
    pub threshold: f64,
    /// Session start (RFC3339)
    pub started: DateTime<Utc>,
    /// Session end (RFC3339)
    pub ended: DateTime<Utc>,
    /// Every transition, in frame order
    pub transitions: Vec<GestureTransition>,
}

impl SessionReport {
    /// Number of completed grab gestures (releases) in the session.
    pub fn release_count(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| matches!(t.kind, crate::core::gesture::TransitionKind::Released))
            .count()
    }

    /// Write the report as pretty JSON.
    pub fn write_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Accumulates transitions over a run and builds the final report.
pub struct ReportBuilder {
    instance_id: Uuid,
    started: DateTime<Utc>,
    transitions: Vec<GestureTransition>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            started: Utc::now(),
            transitions: Vec::new(),
        }
    }

    /// The instance identifier stamped onto the report.
    pub fn instance_id(&self) -> String {
        self.instance_id.to_string()
    }

    /// Record a transition as it happens.
    pub fn record(&mut self, transition: GestureTransition) {
        self.transitions.push(transition);
    }

    /// Number of transitions recorded so far.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Finish the session and build the report.
    pub fn build(self, config: &GestureConfig, file: impl Into<String>) -> SessionReport {
        SessionReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                instance_id: self.instance_id.to_string(),
            },
            subject: config.subject.clone(),
            file: file.into(),
            threshold: config.threshold,
            started: self.started,
            ended: Utc::now(),
            transitions: self.transitions,
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
