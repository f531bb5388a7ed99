//! Demonstration of the gesturedrop pipeline on a synthetic trace.
//!
//! This example shows how to:
//! 1. Build a frame trace in memory (no camera or estimator needed)
//! 2. Create a detection session with a transfer trigger
//! 3. Process frames and observe grab/release transitions
//! 4. Read the session statistics
//!
//! Run with: cargo run --example replay_demo

use gesturedrop::{
    config::{GestureConfig, INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP},
    core::DetectionSession,
    source::{FrameObservation, Hand, Keypoint, KeypointSource, ReplaySource},
    stats::SessionStats,
    transfer::LoggingTrigger,
};
use std::sync::Arc;

/// A 21-point hand with every fingertip pinched together at (x, y).
fn pinched_hand(x: f64, y: f64) -> Hand {
    let mut hand = Hand::from_points(vec![(-1000.0, -1000.0); 21]);
    for &tip in &[THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP] {
        hand.keypoints[tip] = Keypoint::new(x, y);
    }
    hand
}

/// A 21-point hand with the fingertips spread far apart.
fn spread_hand() -> Hand {
    let mut hand = Hand::from_points(vec![(-1000.0, -1000.0); 21]);
    for (i, &tip) in [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP]
        .iter()
        .enumerate()
    {
        hand.keypoints[tip] = Keypoint::new(i as f64 * 200.0, 0.0);
    }
    hand
}

fn main() {
    println!("gesturedrop - Replay Demo");
    println!("=========================");
    println!();

    // Two full grab gestures with some noise in between:
    // open, close (grab), hold, open (release + transfer), absent frames,
    // close again (grab), open (release + transfer).
    let mut frames = vec![
        FrameObservation::with_hand(0, spread_hand()),
        FrameObservation::with_hand(1, pinched_hand(320.0, 240.0)),
        FrameObservation::with_hand(2, pinched_hand(322.0, 238.0)),
        FrameObservation::with_hand(3, spread_hand()),
    ];
    for seq in 4..7 {
        frames.push(FrameObservation::empty(seq));
    }
    frames.push(FrameObservation::with_hand(7, pinched_hand(100.0, 100.0)));
    frames.push(FrameObservation::with_hand(8, spread_hand()));

    let stats = Arc::new(SessionStats::new());
    let mut session = DetectionSession::new(
        GestureConfig::default(),
        "vacation-photos.zip",
        Box::new(LoggingTrigger),
    )
    .expect("default configuration is valid")
    .with_stats(stats.clone());

    let mut source = ReplaySource::from_frames(frames);
    while let Some(frame) = source.next_frame() {
        if let Some(transition) = session.process_frame(&frame) {
            println!(
                "Frame {}: {} (close pairs: {})",
                transition.seq, transition.kind, transition.close_count
            );
        }
    }

    println!();
    println!("{}", stats.summary());
}
