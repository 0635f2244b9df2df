//! Variant-polymorphic decoding of raw model output tensors.
//!
//! The three supported model families share no common tensor shape, so the
//! decoders form a closed set keyed by family ([`OutputDecoder`]) paired
//! with a matching closed set of raw outputs ([`RawOutput`]). A decoder
//! applied to the wrong output kind is a model configuration error surfaced
//! as [`ShapeError`], not a per-frame condition; decode itself is total over
//! well-shaped input.

mod candidate_rows;
mod decoded;
mod grid_anchor;
mod labels;
mod rect;
mod result;

pub use candidate_rows::CandidateRowsDecoder;
pub use decoded::DecodedOutputsDecoder;
pub use grid_anchor::GridAnchorDecoder;
pub use labels::{LabelPolicy, LabelTable, UNKNOWN_LABEL};
pub use rect::Rect;
pub use result::{Candidate, DetectionResult};

use ndarray::Array2;
use thiserror::Error;

/// Pixel space the decoded boxes are expressed in.
///
/// Consumers mapping boxes onto a display surface need this to undo any
/// letterboxing themselves; the core performs no display-space transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeContext {
    pub reference_width: f32,
    pub reference_height: f32,
}

impl DecodeContext {
    pub fn new(reference_width: f32, reference_height: f32) -> Self {
        Self {
            reference_width,
            reference_height,
        }
    }

    /// Context for a square model input of the given side length.
    pub fn square(size: f32) -> Self {
        Self::new(size, size)
    }
}

/// Model output shape violations. These indicate a mis-exported or
/// misconfigured model and are raised when an output first meets its
/// decoder, never per accepted detection.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("grid/anchor output needs 5 or 6 rows, got {0}")]
    GridRows(usize),
    #[error("candidate rows need 6 columns, got {0}")]
    RowWidth(usize),
    #[error(
        "decoded outputs are not index-aligned: {class_ids} classes, {boxes} boxes, {scores} scores"
    )]
    Misaligned {
        class_ids: usize,
        boxes: usize,
        scores: usize,
    },
    #[error("{got} output does not match the {expected} decoder")]
    VariantMismatch {
        expected: &'static str,
        got: &'static str,
    },
}

/// Raw inference output, opaque until decoded.
#[derive(Debug, Clone)]
pub enum RawOutput {
    /// Single tensor of shape `(5..=6, N)`: per-anchor rows
    /// `x, y, w, h, confidence` and an optional class row.
    GridAnchor(Array2<f32>),
    /// Single tensor of shape `(rows, 6)`:
    /// `x1, y1, x2, y2, confidence, class` per row.
    CandidateRows(Array2<f32>),
    /// Index-aligned post-NMS tensors from models that decode internally.
    Decoded {
        class_ids: Vec<i64>,
        boxes: Vec<[f32; 4]>,
        scores: Vec<f32>,
    },
}

impl RawOutput {
    fn kind(&self) -> &'static str {
        match self {
            RawOutput::GridAnchor(_) => "grid/anchor",
            RawOutput::CandidateRows(_) => "candidate-rows",
            RawOutput::Decoded { .. } => "decoded",
        }
    }
}

/// Output decoder for one model family.
///
/// Each variant carries its own shape contract, its own confidence
/// threshold and comparator, and its own label policy. Variant thresholds
/// are deliberately independent; the model families they came from use
/// different cutoffs.
#[derive(Debug, Clone)]
pub enum OutputDecoder {
    GridAnchor(GridAnchorDecoder),
    CandidateRows(CandidateRowsDecoder),
    Decoded(DecodedOutputsDecoder),
}

impl OutputDecoder {
    /// Decode a raw output into filtered, labeled detections.
    pub fn decode(
        &self,
        raw: &RawOutput,
        ctx: DecodeContext,
    ) -> Result<Vec<DetectionResult>, ShapeError> {
        match (self, raw) {
            (Self::GridAnchor(d), RawOutput::GridAnchor(tensor)) => d.decode(tensor.view(), ctx),
            (Self::CandidateRows(d), RawOutput::CandidateRows(tensor)) => {
                d.decode(tensor.view(), ctx)
            }
            (
                Self::Decoded(d),
                RawOutput::Decoded {
                    class_ids,
                    boxes,
                    scores,
                },
            ) => d.decode(class_ids, boxes, scores, ctx),
            (decoder, raw) => Err(ShapeError::VariantMismatch {
                expected: decoder.kind(),
                got: raw.kind(),
            }),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            OutputDecoder::GridAnchor(_) => "grid/anchor",
            OutputDecoder::CandidateRows(_) => "candidate-rows",
            OutputDecoder::Decoded(_) => "decoded",
        }
    }
}

impl From<GridAnchorDecoder> for OutputDecoder {
    fn from(decoder: GridAnchorDecoder) -> Self {
        OutputDecoder::GridAnchor(decoder)
    }
}

impl From<CandidateRowsDecoder> for OutputDecoder {
    fn from(decoder: CandidateRowsDecoder) -> Self {
        OutputDecoder::CandidateRows(decoder)
    }
}

impl From<DecodedOutputsDecoder> for OutputDecoder {
    fn from(decoder: DecodedOutputsDecoder) -> Self {
        OutputDecoder::Decoded(decoder)
    }
}

/// Pick the detection surfaced to the overlay and forwarded downstream.
///
/// Returns the highest-confidence detection; ties keep the first in the
/// decoder's emission order. Empty input means no detection this frame.
pub fn select_best(results: &[DetectionResult]) -> Option<&DetectionResult> {
    let mut best: Option<&DetectionResult> = None;
    for result in results {
        match best {
            Some(current) if result.confidence <= current.confidence => {}
            _ => best = Some(result),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(confidence: f32) -> DetectionResult {
        Candidate::new(Rect::from_tlbr(0.0, 0.0, 1.0, 1.0), confidence, 0)
            .resolve(&LabelPolicy::None, DecodeContext::square(640.0))
    }

    #[test]
    fn test_select_best_returns_maximum() {
        let results = vec![result(0.71), result(0.95), result(0.80)];
        let best = select_best(&results).unwrap();
        assert_eq!(best.confidence, 0.95);
    }

    #[test]
    fn test_select_best_tie_keeps_first() {
        let mut first = result(0.9);
        first.class_id = 1;
        let mut second = result(0.9);
        second.class_id = 2;

        let results = vec![first, second];
        assert_eq!(select_best(&results).unwrap().class_id, 1);
    }

    #[test]
    fn test_select_best_empty() {
        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn test_variant_mismatch_is_an_error() {
        let decoder = OutputDecoder::from(GridAnchorDecoder::new());
        let raw = RawOutput::Decoded {
            class_ids: vec![],
            boxes: vec![],
            scores: vec![],
        };

        let err = decoder.decode(&raw, DecodeContext::square(640.0)).unwrap_err();
        assert_eq!(
            err,
            ShapeError::VariantMismatch {
                expected: "grid/anchor",
                got: "decoded",
            }
        );
    }
}
