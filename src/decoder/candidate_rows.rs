//! Decoder for single-tensor row-major candidate lists.

use log::debug;
use ndarray::ArrayView2;

use crate::decoder::labels::{LabelPolicy, LabelTable};
use crate::decoder::rect::Rect;
use crate::decoder::result::{Candidate, DetectionResult};
use crate::decoder::{DecodeContext, ShapeError};

/// Decoder for batched candidate rows: one tensor of shape `(rows, 6)`
/// where each row is `x1, y1, x2, y2, confidence, class`.
///
/// Boxes are corner-corner and enter via [`Rect::from_tlbr`]. Class ids are
/// resolved against the owned label table; out-of-range ids degrade to
/// `"Unknown"`. The confidence comparator is inclusive: a row exactly at
/// the threshold is kept.
#[derive(Debug, Clone)]
pub struct CandidateRowsDecoder {
    threshold: f32,
    labels: LabelTable,
}

impl CandidateRowsDecoder {
    pub fn new(labels: LabelTable) -> Self {
        Self {
            threshold: 0.7,
            labels,
        }
    }

    /// Set the confidence threshold (met or exceeded to keep a row).
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Decode a `(rows, 6)` tensor into filtered, labeled detections.
    pub fn decode(
        &self,
        output: ArrayView2<f32>,
        ctx: DecodeContext,
    ) -> Result<Vec<DetectionResult>, ShapeError> {
        if output.ncols() != 6 {
            return Err(ShapeError::RowWidth(output.ncols()));
        }

        let policy = LabelPolicy::Table(&self.labels);
        let mut results = Vec::new();

        for row in output.rows() {
            let confidence = row[4];
            if confidence < self.threshold {
                continue;
            }

            let class_id = row[5] as i64;
            let bbox = Rect::from_tlbr(row[0], row[1], row[2], row[3]);

            debug!(
                "candidate: class {class_id} at {:?} confidence {confidence}",
                bbox.to_tlbr()
            );
            results.push(Candidate::new(bbox, confidence, class_id).resolve(&policy, ctx));
        }

        Ok(results)
    }
}
