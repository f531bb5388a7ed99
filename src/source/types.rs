//! Hand keypoint observation types.
//!
//! These types mirror the output of a 21-point hand skeleton estimator.
//! Coordinates are in the pixel space of the source video frame.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A 2D point in source-frame pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A detected keypoint: a point plus optional detection metadata.
///
/// Keypoints are identified by their index within a hand; the index
/// assignment follows the estimator's skeleton convention and is stable
/// across frames for the same model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    /// Detection confidence for this keypoint, if the estimator reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Semantic name (e.g. "thumb_tip"), if the estimator reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Keypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            score: None,
            name: None,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Handedness label reported by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
    /// The estimator did not decide, or the label was absent.
    Unknown,
}

impl Default for Handedness {
    fn default() -> Self {
        Handedness::Unknown
    }
}

/// One detected hand: an ordered keypoint sequence plus detection metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hand {
    /// Ordered keypoints; indices follow the skeleton convention.
    pub keypoints: Vec<Keypoint>,
    #[serde(default)]
    pub handedness: Handedness,
    /// Overall detection confidence for the hand.
    #[serde(default)]
    pub score: f64,
}

impl Hand {
    /// Create a hand from bare points with no per-keypoint metadata.
    pub fn from_points(points: Vec<(f64, f64)>) -> Self {
        Self {
            keypoints: points
                .into_iter()
                .map(|(x, y)| Keypoint::new(x, y))
                .collect(),
            handedness: Handedness::Unknown,
            score: 1.0,
        }
    }

    /// Keypoint at `index`, if the hand has one there.
    pub fn keypoint(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }
}

/// Everything the keypoint source observed in one sampling tick.
///
/// `hands` may be empty: absence of detection carries no gesture
/// information and the consumer holds its state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameObservation {
    /// Monotonic frame sequence number assigned by the source.
    pub seq: u64,
    /// When the frame was sampled.
    pub timestamp: DateTime<Utc>,
    /// Detected hands, possibly empty. Order is the estimator's.
    #[serde(default)]
    pub hands: Vec<Hand>,
}

impl FrameObservation {
    /// An observation with no detected hands.
    pub fn empty(seq: u64) -> Self {
        Self {
            seq,
            timestamp: Utc::now(),
            hands: Vec::new(),
        }
    }

    /// An observation carrying a single hand.
    pub fn with_hand(seq: u64, hand: Hand) -> Self {
        Self {
            seq,
            timestamp: Utc::now(),
            hands: vec![hand],
        }
    }

    /// The hand the session tracks: the first one in the list.
    ///
    /// Multi-hand frames are valid input; only the first hand drives the
    /// single tracked subject.
    pub fn primary_hand(&self) -> Option<&Hand> {
        self.hands.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(10.0, 40.0);
        assert!((a.distance_to(&b) - 30.0).abs() < 1e-9);

        let c = Point::new(3.0, 0.0);
        let d = Point::new(0.0, 4.0);
        assert!((c.distance_to(&d) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_finiteness() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_primary_hand_is_first() {
        let first = Hand::from_points(vec![(1.0, 1.0)]);
        let second = Hand::from_points(vec![(2.0, 2.0)]);
        let mut obs = FrameObservation::with_hand(0, first);
        obs.hands.push(second);

        let primary = obs.primary_hand().unwrap();
        assert_eq!(primary.keypoints[0].x, 1.0);
    }

    #[test]
    fn test_keypoint_out_of_range() {
        let hand = Hand::from_points(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert!(hand.keypoint(1).is_some());
        assert!(hand.keypoint(2).is_none());
    }
}
