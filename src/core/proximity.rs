//! Fingertip proximity evaluation.
//!
//! Pure computation: given one hand and a pixel threshold, report which of
//! the configured fingertip pairs are strictly closer than the threshold.
//! The close-pair count drives the gesture state machine; the pair set and
//! the found fingertip points are exposed for overlay renderers.

use crate::config::ProximityPair;
use crate::source::types::{Hand, Point};

/// Result of evaluating one hand against the pair set.
#[derive(Debug, Clone, Default)]
pub struct ProximityReport {
    /// Pairs whose endpoint distance was strictly below the threshold.
    pub close_pairs: Vec<ProximityPair>,
    /// Fingertip points that were present and finite, keyed by index.
    /// Overlay data only; the state machine uses the count alone.
    pub fingertip_points: Vec<(usize, Point)>,
}

impl ProximityReport {
    /// Number of close pairs, in `[0, pair set size]`.
    pub fn close_count(&self) -> usize {
        self.close_pairs.len()
    }
}

/// Errors from proximity evaluation.
///
/// Pair-level problems (missing or non-finite keypoints) are not errors;
/// those pairs are silently excluded. Only an unusable threshold argument
/// fails the whole frame.
#[derive(Debug)]
pub enum ProximityError {
    InvalidThreshold(f64),
}

impl std::fmt::Display for ProximityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProximityError::InvalidThreshold(t) => {
                write!(f, "threshold must be positive and finite, got {t}")
            }
        }
    }
}

impl std::error::Error for ProximityError {}

/// Evaluates hands against a fixed pair set.
///
/// The pair set is fixed at construction and does not change across the
/// session.
#[derive(Debug, Clone)]
pub struct ProximityEvaluator {
    pairs: Vec<ProximityPair>,
    fingertips: Vec<usize>,
}

impl ProximityEvaluator {
    pub fn new(pairs: Vec<ProximityPair>, fingertips: Vec<usize>) -> Self {
        Self { pairs, fingertips }
    }

    /// The configured pair set.
    pub fn pairs(&self) -> &[ProximityPair] {
        &self.pairs
    }

    /// Evaluate one hand.
    ///
    /// A pair is close iff both endpoint keypoints exist, both are finite,
    /// and their Euclidean distance is strictly less than `threshold`.
    /// Missing or non-finite endpoints exclude the pair from the count.
    pub fn evaluate(&self, hand: &Hand, threshold: f64) -> Result<ProximityReport, ProximityError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ProximityError::InvalidThreshold(threshold));
        }

        let mut report = ProximityReport::default();

        for &index in &self.fingertips {
            if let Some(kp) = hand.keypoint(index) {
                let point = kp.point();
                if point.is_finite() {
                    report.fingertip_points.push((index, point));
                }
            }
        }

        for &pair in &self.pairs {
            let (Some(a), Some(b)) = (hand.keypoint(pair.0), hand.keypoint(pair.1)) else {
                continue;
            };
            let (pa, pb) = (a.point(), b.point());
            if !pa.is_finite() || !pb.is_finite() {
                continue;
            }
            if pa.distance_to(&pb) < threshold {
                report.close_pairs.push(pair);
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_proximity_pairs, GestureConfig, INDEX_TIP, THUMB_TIP};
    use crate::source::types::Keypoint;

    fn evaluator() -> ProximityEvaluator {
        let config = GestureConfig::default();
        ProximityEvaluator::new(config.proximity_pairs, config.fingertips)
    }

    /// 21 keypoints, all at the origin except the listed overrides.
    fn hand_with(overrides: &[(usize, f64, f64)]) -> Hand {
        let mut hand = Hand::from_points(vec![(0.0, 0.0); 21]);
        for &(index, x, y) in overrides {
            hand.keypoints[index] = Keypoint::new(x, y);
        }
        hand
    }

    #[test]
    fn test_thumb_index_close() {
        // Thumb (10,10), index (10,40): distance 30 < 45.
        let mut hand = hand_with(&[(THUMB_TIP, 10.0, 10.0), (INDEX_TIP, 10.0, 40.0)]);
        // Push the other fingertips far away so only one pair is close.
        for &tip in &[12, 16, 20] {
            hand.keypoints[tip] = Keypoint::new(500.0 + tip as f64 * 100.0, 500.0);
        }

        let report = evaluator().evaluate(&hand, 45.0).unwrap();
        assert_eq!(report.close_count(), 1);
        assert_eq!(report.close_pairs[0], ProximityPair(THUMB_TIP, INDEX_TIP));
    }

    #[test]
    fn test_thumb_index_apart() {
        // Thumb (10,10), index (10,100): distance 90 >= 45.
        let mut hand = hand_with(&[(THUMB_TIP, 10.0, 10.0), (INDEX_TIP, 10.0, 100.0)]);
        for &tip in &[12, 16, 20] {
            hand.keypoints[tip] = Keypoint::new(500.0 + tip as f64 * 100.0, 500.0);
        }

        let report = evaluator().evaluate(&hand, 45.0).unwrap();
        assert_eq!(report.close_count(), 0);
    }

    #[test]
    fn test_fist_counts_all_pairs() {
        // Every fingertip at the same point: all 8 pairs close.
        let hand = hand_with(&[]);
        let report = evaluator().evaluate(&hand, 45.0).unwrap();
        assert_eq!(report.close_count(), default_proximity_pairs().len());
    }

    #[test]
    fn test_boundary_is_strict() {
        // Distance exactly equal to the threshold is not close.
        let at_threshold = hand_with(&[(THUMB_TIP, 0.0, 0.0), (INDEX_TIP, 45.0, 0.0)]);
        let just_inside = hand_with(&[(THUMB_TIP, 0.0, 0.0), (INDEX_TIP, 44.999, 0.0)]);
        let just_outside = hand_with(&[(THUMB_TIP, 0.0, 0.0), (INDEX_TIP, 45.001, 0.0)]);

        let ev = ProximityEvaluator::new(vec![ProximityPair(THUMB_TIP, INDEX_TIP)], vec![]);
        assert_eq!(ev.evaluate(&at_threshold, 45.0).unwrap().close_count(), 0);
        assert_eq!(ev.evaluate(&just_inside, 45.0).unwrap().close_count(), 1);
        assert_eq!(ev.evaluate(&just_outside, 45.0).unwrap().close_count(), 0);
    }

    #[test]
    fn test_short_hand_excludes_pairs() {
        // Fewer keypoints than the referenced indices: pairs silently
        // excluded, count 0, no error.
        let hand = Hand::from_points(vec![(0.0, 0.0); 5]);
        let report = evaluator().evaluate(&hand, 45.0).unwrap();
        assert_eq!(report.close_count(), 0);
    }

    #[test]
    fn test_empty_hand_counts_zero() {
        let hand = Hand::from_points(vec![]);
        let report = evaluator().evaluate(&hand, 45.0).unwrap();
        assert_eq!(report.close_count(), 0);
        assert!(report.fingertip_points.is_empty());
    }

    #[test]
    fn test_non_finite_keypoint_excluded() {
        let hand = hand_with(&[(THUMB_TIP, f64::NAN, 0.0)]);
        let report = evaluator().evaluate(&hand, 45.0).unwrap();

        // Pairs involving the thumb are excluded; the finger-finger pairs
        // (all at the origin) still count.
        assert!(!report
            .close_pairs
            .iter()
            .any(|p| p.0 == THUMB_TIP || p.1 == THUMB_TIP));
        assert_eq!(report.close_count(), 4);
        assert!(!report.fingertip_points.iter().any(|(i, _)| *i == THUMB_TIP));
    }

    #[test]
    fn test_invalid_threshold_is_error() {
        let hand = hand_with(&[]);
        assert!(evaluator().evaluate(&hand, 0.0).is_err());
        assert!(evaluator().evaluate(&hand, -5.0).is_err());
        assert!(evaluator().evaluate(&hand, f64::NAN).is_err());
    }

    #[test]
    fn test_deterministic() {
        let hand = hand_with(&[(THUMB_TIP, 10.0, 10.0), (INDEX_TIP, 10.0, 40.0)]);
        let ev = evaluator();
        let first = ev.evaluate(&hand, 45.0).unwrap();
        let second = ev.evaluate(&hand, 45.0).unwrap();
        assert_eq!(first.close_pairs, second.close_pairs);
    }
}
