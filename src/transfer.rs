//! The transfer trigger seam.
//!
//! A release transition hands a [`TransferRequest`] to whatever implements
//! [`TransferTrigger`] — in the full product that is the socket transfer
//! channel; here the crate ships a logging trigger for CLI runs and a
//! recording trigger for tests. Trigger failures are reported and counted,
//! never retried by the gesture core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// What the gesture core asks the transfer collaborator to do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Label of the file armed for this session.
    pub file: String,
    /// Subject the gesture came from, if the session was tagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Timestamp of the releasing frame.
    pub requested_at: DateTime<Utc>,
}

/// Errors the transfer collaborator can report back.
#[derive(Debug)]
pub enum TransferError {
    /// The transfer channel is gone (socket closed, upload failed, ...).
    ChannelUnavailable(String),
    /// The collaborator refused the request.
    Rejected(String),
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferError::ChannelUnavailable(e) => write!(f, "transfer channel unavailable: {e}"),
            TransferError::Rejected(e) => write!(f, "transfer rejected: {e}"),
        }
    }
}

impl std::error::Error for TransferError {}

/// Invoked exactly once per release transition.
pub trait TransferTrigger: Send {
    fn transfer(&mut self, request: &TransferRequest) -> Result<(), TransferError>;
}

/// A trigger that announces the request on stdout. Used by the CLI, where
/// the real transfer channel is out of scope.
pub struct LoggingTrigger;

impl TransferTrigger for LoggingTrigger {
    fn transfer(&mut self, request: &TransferRequest) -> Result<(), TransferError> {
        println!(
            "[{}] Transfer requested: {}",
            request.requested_at.format("%H:%M:%S"),
            request.file
        );
        Ok(())
    }
}

/// A trigger that records every request, for assertions in tests.
#[derive(Default)]
pub struct RecordingTrigger {
    requests: Arc<Mutex<Vec<TransferRequest>>>,
    /// When set, every call fails with this message.
    fail_with: Option<String>,
}

impl RecordingTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recording trigger whose every call fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(message.into()),
        }
    }

    /// Shared handle to the recorded requests.
    pub fn requests(&self) -> Arc<Mutex<Vec<TransferRequest>>> {
        self.requests.clone()
    }
}

impl TransferTrigger for RecordingTrigger {
    fn transfer(&mut self, request: &TransferRequest) -> Result<(), TransferError> {
        if let Some(ref message) = self.fail_with {
            return Err(TransferError::ChannelUnavailable(message.clone()));
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TransferRequest {
        TransferRequest {
            file: "photo.png".to_string(),
            subject: None,
            requested_at: Utc::now(),
        }
    }

    #[test]
    fn test_recording_trigger_records() {
        let mut trigger = RecordingTrigger::new();
        let requests = trigger.requests();

        trigger.transfer(&request()).unwrap();
        trigger.transfer(&request()).unwrap();

        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_failing_trigger_fails_and_records_nothing() {
        let mut trigger = RecordingTrigger::failing("socket closed");
        let requests = trigger.requests();

        let result = trigger.transfer(&request());
        assert!(result.is_err());
        assert!(requests.lock().unwrap().is_empty());
    }
}
