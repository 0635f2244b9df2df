//! Decoder for legacy single-tensor grid/anchor exports.

use log::debug;
use ndarray::ArrayView2;

use crate::decoder::labels::LabelPolicy;
use crate::decoder::rect::Rect;
use crate::decoder::result::{Candidate, DetectionResult};
use crate::decoder::{DecodeContext, ShapeError};

/// Decoder for raw grid/anchor output: one tensor with per-anchor rows
/// `x, y, w, h, confidence` and an optional sixth class row.
///
/// Boxes come out in the format's native (origin, width, height) semantics
/// via [`Rect::new`]; they are not silently normalized to corner form.
/// The class row is inconsistently present across exports of this family;
/// when absent every anchor keeps the -1 sentinel class and no label.
///
/// The confidence comparator is strict: an anchor exactly at the threshold
/// is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAnchorDecoder {
    threshold: f32,
}

impl Default for GridAnchorDecoder {
    fn default() -> Self {
        Self { threshold: 0.7 }
    }
}

impl GridAnchorDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence threshold (strictly exceeded to keep an anchor).
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Decode a `(5..=6, N)` tensor into filtered detections.
    pub fn decode(
        &self,
        output: ArrayView2<f32>,
        ctx: DecodeContext,
    ) -> Result<Vec<DetectionResult>, ShapeError> {
        let rows = output.nrows();
        if !(5..=6).contains(&rows) {
            return Err(ShapeError::GridRows(rows));
        }

        let has_class_row = rows == 6;
        let mut results = Vec::new();

        for i in 0..output.ncols() {
            let confidence = output[[4, i]];
            if confidence <= self.threshold {
                continue;
            }

            let class_id = if has_class_row {
                output[[5, i]] as i64
            } else {
                -1
            };
            let bbox = Rect::new(
                output[[0, i]],
                output[[1, i]],
                output[[2, i]],
                output[[3, i]],
            );

            debug!(
                "anchor {i}: class {class_id} at ({}, {}) size ({}, {}) confidence {confidence}",
                bbox.x, bbox.y, bbox.width, bbox.height
            );
            results.push(Candidate::new(bbox, confidence, class_id).resolve(&LabelPolicy::None, ctx));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn ctx() -> DecodeContext {
        DecodeContext::square(640.0)
    }

    /// Columns are anchors: x, y, w, h, confidence (and class when present).
    fn tensor(rows: &[&[f32]]) -> Array2<f32> {
        let ncols = rows[0].len();
        Array2::from_shape_vec((rows.len(), ncols), rows.concat()).unwrap()
    }

    #[test]
    fn test_threshold_is_strict() {
        let output = tensor(&[
            &[10.0, 10.0],
            &[20.0, 20.0],
            &[30.0, 30.0],
            &[40.0, 40.0],
            &[0.7, 0.71],
        ]);

        let results = GridAnchorDecoder::new().decode(output.view(), ctx()).unwrap();
        // 0.7 is exactly at the threshold and must be dropped
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].confidence, 0.71);
    }

    #[test]
    fn test_missing_class_row_yields_sentinel() {
        let output = tensor(&[&[10.0], &[20.0], &[30.0], &[40.0], &[0.9]]);

        let results = GridAnchorDecoder::new().decode(output.view(), ctx()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].class_id, -1);
        assert_eq!(results[0].label, None);
    }

    #[test]
    fn test_class_row_read_when_present() {
        let output = tensor(&[&[10.0], &[20.0], &[30.0], &[40.0], &[0.9], &[7.0]]);

        let results = GridAnchorDecoder::new().decode(output.view(), ctx()).unwrap();
        assert_eq!(results[0].class_id, 7);
        // class ids are never table-resolved for this family
        assert_eq!(results[0].label, None);
    }

    #[test]
    fn test_box_keeps_origin_size_semantics() {
        let output = tensor(&[&[10.0], &[20.0], &[30.0], &[40.0], &[0.9]]);

        let results = GridAnchorDecoder::new().decode(output.view(), ctx()).unwrap();
        let bbox = results[0].bbox;
        assert_eq!(bbox.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
        // corners only materialize at the presentation boundary
        assert_eq!(results[0].to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_wrong_row_count_is_a_shape_error() {
        let output = tensor(&[&[10.0], &[20.0], &[30.0], &[40.0]]);

        let err = GridAnchorDecoder::new().decode(output.view(), ctx()).unwrap_err();
        assert_eq!(err, ShapeError::GridRows(4));
    }

    #[test]
    fn test_all_below_threshold_is_empty_not_an_error() {
        let output = tensor(&[&[10.0], &[20.0], &[30.0], &[40.0], &[0.1]]);

        let results = GridAnchorDecoder::new().decode(output.view(), ctx()).unwrap();
        assert!(results.is_empty());
    }
}
