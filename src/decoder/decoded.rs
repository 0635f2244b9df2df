//! Decoder for multi-tensor, already-decoded (post-NMS) exports.

use log::debug;

use crate::decoder::labels::LabelPolicy;
use crate::decoder::rect::Rect;
use crate::decoder::result::{Candidate, DetectionResult};
use crate::decoder::{DecodeContext, ShapeError};

/// Decoder for models that decode and suppress internally and return three
/// index-aligned tensors: class ids, corner-corner boxes and scores.
///
/// This family serves single-purpose detectors, so the label is a fixed
/// literal rather than a table lookup. Boxes are expressed against the
/// actual resized frame, so the decode context should carry the resized
/// dimensions rather than the nominal model square. The score comparator is
/// inclusive: an index exactly at the threshold is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedOutputsDecoder {
    threshold: f32,
    label: String,
}

impl DecodedOutputsDecoder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            threshold: 0.7,
            label: label.into(),
        }
    }

    /// Set the score threshold (met or exceeded to keep an index).
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Decode index-aligned class/box/score sequences into detections.
    pub fn decode(
        &self,
        class_ids: &[i64],
        boxes: &[[f32; 4]],
        scores: &[f32],
        ctx: DecodeContext,
    ) -> Result<Vec<DetectionResult>, ShapeError> {
        if class_ids.len() != boxes.len() || boxes.len() != scores.len() {
            return Err(ShapeError::Misaligned {
                class_ids: class_ids.len(),
                boxes: boxes.len(),
                scores: scores.len(),
            });
        }

        let policy = LabelPolicy::Fixed(&self.label);
        let mut results = Vec::new();

        for (i, &score) in scores.iter().enumerate() {
            if score < self.threshold {
                continue;
            }

            let [x1, y1, x2, y2] = boxes[i];
            let bbox = Rect::from_tlbr(x1, y1, x2, y2);

            debug!(
                "{}: class {} at {:?} score {score}",
                self.label, class_ids[i], boxes[i]
            );
            results.push(Candidate::new(bbox, score, class_ids[i]).resolve(&policy, ctx));
        }

        Ok(results)
    }
}
