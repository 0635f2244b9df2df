//! Legacy single-score classifier outputs.
//!
//! Two model families predate the box-emitting detectors: a quantized
//! image classifier returning one 8-bit score per class, and a
//! single-output presence model returning one float. Neither produces
//! boxes, so they live outside the decoder variants.

use log::debug;

/// Dequantization step for 8-bit classifier scores.
pub const QUANT_SCALE: f32 = 0.003_906_25;

/// Default probability cutoff for [`top_class`]. Inclusive.
pub const TOP_CLASS_THRESHOLD: f32 = 0.75;

/// Default score cutoff for [`presence`]. Strict.
pub const PRESENCE_THRESHOLD: f32 = 0.5;

/// A classifier verdict: the winning class and its dequantized probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub class_id: usize,
    pub probability: f32,
}

/// Top-1 classification over a quantized score vector.
///
/// Returns the highest-scoring class iff its dequantized probability meets
/// the threshold (inclusive). Ties keep the first index; an empty score
/// vector yields `None`.
pub fn top_class(scores: &[u8], threshold: f32) -> Option<Classification> {
    let mut best: Option<(usize, u8)> = None;
    for (index, &score) in scores.iter().enumerate() {
        match best {
            Some((_, current)) if score <= current => {}
            _ => best = Some((index, score)),
        }
    }

    let (class_id, raw) = best?;
    let probability = raw as f32 * QUANT_SCALE;
    debug!("top class {class_id} with probability {probability:.3}");

    (probability >= threshold).then_some(Classification {
        class_id,
        probability,
    })
}

/// Binary presence gate for single-output models.
///
/// Strict comparison: a score exactly at the threshold reads as absent.
pub fn presence(score: f32, threshold: f32) -> bool {
    score > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_class_picks_maximum() {
        let verdict = top_class(&[10, 250, 30], TOP_CLASS_THRESHOLD).unwrap();
        assert_eq!(verdict.class_id, 1);
        assert!((verdict.probability - 250.0 * QUANT_SCALE).abs() < 1e-6);
    }

    #[test]
    fn test_top_class_threshold_is_inclusive() {
        // 192 dequantizes to exactly 0.75
        let verdict = top_class(&[0, 192], TOP_CLASS_THRESHOLD).unwrap();
        assert_eq!(verdict.class_id, 1);
        assert_eq!(verdict.probability, 0.75);

        assert!(top_class(&[0, 191], TOP_CLASS_THRESHOLD).is_none());
    }

    #[test]
    fn test_top_class_tie_keeps_first_index() {
        let verdict = top_class(&[200, 200], 0.0).unwrap();
        assert_eq!(verdict.class_id, 0);
    }

    #[test]
    fn test_top_class_empty_scores() {
        assert!(top_class(&[], TOP_CLASS_THRESHOLD).is_none());
    }

    #[test]
    fn test_presence_is_strict() {
        assert!(!presence(0.5, PRESENCE_THRESHOLD));
        assert!(presence(0.51, PRESENCE_THRESHOLD));
    }
}
