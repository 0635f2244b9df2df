//! Candidate detections and the final per-frame detection type.

use crate::decoder::DecodeContext;
use crate::decoder::labels::LabelPolicy;
use crate::decoder::rect::Rect;

/// Candidate detection emitted by a decoder variant, before label
/// resolution. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Bounding box, in the emitting variant's native format
    pub bbox: Rect,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
    /// Model class index; -1 when the model emits no class output
    pub class_id: i64,
}

impl Candidate {
    pub fn new(bbox: Rect, confidence: f32, class_id: i64) -> Self {
        Self {
            bbox,
            confidence,
            class_id,
        }
    }

    /// Finalize the candidate under the variant's label policy.
    ///
    /// Total over any class id: out-of-range ids degrade to the policy's
    /// sentinel, never an error.
    pub fn resolve(self, policy: &LabelPolicy<'_>, ctx: DecodeContext) -> DetectionResult {
        DetectionResult {
            bbox: self.bbox,
            confidence: self.confidence,
            class_id: self.class_id,
            label: policy.resolve(self.class_id),
            reference_width: ctx.reference_width,
            reference_height: ctx.reference_height,
        }
    }
}

/// A finalized detection for one camera frame.
///
/// Coordinates are expressed in the `reference_width`/`reference_height`
/// pixel space; overlay consumers apply any letterboxing correction
/// themselves. Valid for one detection cycle — the UI may keep the best one
/// until the next frame overwrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub bbox: Rect,
    pub confidence: f32,
    pub class_id: i64,
    pub label: Option<String>,
    pub reference_width: f32,
    pub reference_height: f32,
}

impl DetectionResult {
    /// Corner-corner view of the box: (x1, y1, x2, y2).
    ///
    /// This is where the per-variant box semantics are reconciled; grid/
    /// anchor boxes stored as (origin, size) come out as corners here.
    pub fn to_tlbr(&self) -> [f32; 4] {
        self.bbox.to_tlbr()
    }
}
