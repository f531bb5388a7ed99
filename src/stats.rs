//! Session statistics log.
//!
//! Tracks what the pipeline did — frames, skips, gestures, transfers —
//! without retaining any frame content. Counters are atomic so the stats
//! handle can be shared between the session and the surrounding loop, and
//! they persist to JSON so `gesturedrop status` can read them back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for the current detection session.
#[derive(Debug)]
pub struct SessionStats {
    /// Frames handed to the session
    frames_processed: AtomicU64,
    /// Frames with no detected hand
    empty_frames: AtomicU64,
    /// Frames discarded by the evaluator error policy
    skipped_frames: AtomicU64,
    /// GrabStarted transitions
    grabs: AtomicU64,
    /// Released transitions
    releases: AtomicU64,
    /// Transfers handed to the trigger successfully
    transfers_triggered: AtomicU64,
    /// Transfers the trigger reported as failed
    transfer_failures: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
    /// Path for persisting stats
    persist_path: Option<PathBuf>,
}

impl SessionStats {
    /// Create a new stats log.
    pub fn new() -> Self {
        Self {
            frames_processed: AtomicU64::new(0),
            empty_frames: AtomicU64::new(0),
            skipped_frames: AtomicU64::new(0),
            grabs: AtomicU64::new(0),
            releases: AtomicU64::new(0),
            transfers_triggered: AtomicU64::new(0),
            transfer_failures: AtomicU64::new(0),
            session_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create a stats log with persistence.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut stats = Self::new();
        stats.persist_path = Some(path);

        // Carry forward cumulative totals from previous sessions.
        if let Err(e) = stats.load() {
            eprintln!("Note: Could not load previous session stats: {e}");
        }

        stats
    }

    pub fn record_frame(&self) {
        self.frames_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_frame(&self) {
        self.empty_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped_frame(&self) {
        self.skipped_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_grab(&self) {
        self.grabs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_release(&self) {
        self.releases.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transfer(&self) {
        self.transfers_triggered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transfer_failure(&self) {
        self.transfer_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames_processed: self.frames_processed.load(Ordering::Relaxed),
            empty_frames: self.empty_frames.load(Ordering::Relaxed),
            skipped_frames: self.skipped_frames.load(Ordering::Relaxed),
            grabs: self.grabs.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            transfers_triggered: self.transfers_triggered.load(Ordering::Relaxed),
            transfer_failures: self.transfer_failures.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Frames processed: {}\n\
             - Frames without a hand: {}\n\
             - Frames skipped: {}\n\
             - Grabs: {}\n\
             - Releases: {}\n\
             - Transfers triggered: {}\n\
             - Transfer failures: {}\n\
             - Session duration: {} seconds",
            stats.frames_processed,
            stats.empty_frames,
            stats.skipped_frames,
            stats.grabs,
            stats.releases,
            stats.transfers_triggered,
            stats.transfer_failures,
            stats.session_duration_secs
        )
    }

    /// Save stats to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let stats = self.stats();
            let persisted = PersistedStats {
                frames_processed: stats.frames_processed,
                empty_frames: stats.empty_frames,
                skipped_frames: stats.skipped_frames,
                grabs: stats.grabs,
                releases: stats.releases,
                transfers_triggered: stats.transfers_triggered,
                transfer_failures: stats.transfer_failures,
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;

            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load stats from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.frames_processed
                    .store(persisted.frames_processed, Ordering::Relaxed);
                self.empty_frames
                    .store(persisted.empty_frames, Ordering::Relaxed);
                self.skipped_frames
                    .store(persisted.skipped_frames, Ordering::Relaxed);
                self.grabs.store(persisted.grabs, Ordering::Relaxed);
                self.releases.store(persisted.releases, Ordering::Relaxed);
                self.transfers_triggered
                    .store(persisted.transfers_triggered, Ordering::Relaxed);
                self.transfer_failures
                    .store(persisted.transfer_failures, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.frames_processed.store(0, Ordering::Relaxed);
        self.empty_frames.store(0, Ordering::Relaxed);
        self.skipped_frames.store(0, Ordering::Relaxed);
        self.grabs.store(0, Ordering::Relaxed);
        self.releases.store(0, Ordering::Relaxed);
        self.transfers_triggered.store(0, Ordering::Relaxed);
        self.transfer_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a stats log.
pub type SharedSessionStats = Arc<SessionStats>;

/// Create a shared stats log with persistence.
pub fn create_shared_stats_with_persistence(path: PathBuf) -> SharedSessionStats {
    Arc::new(SessionStats::with_persistence(path))
}

/// Snapshot of session statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub frames_processed: u64,
    pub empty_frames: u64,
    pub skipped_frames: u64,
    pub grabs: u64,
    pub releases: u64,
    pub transfers_triggered: u64,
    pub transfer_failures: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Stats format for persistence.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    frames_processed: u64,
    empty_frames: u64,
    skipped_frames: u64,
    grabs: u64,
    releases: u64,
    transfers_triggered: u64,
    transfer_failures: u64,
    last_updated: DateTime<Utc>,
}
