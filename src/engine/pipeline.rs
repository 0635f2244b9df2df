//! FramePipeline: preprocess → infer → decode → select.

use image::RgbImage;
use log::debug;
use thiserror::Error;

use crate::decoder::{DecodeContext, DetectionResult, OutputDecoder, ShapeError, select_best};
use crate::preprocess::{Normalization, PreprocessError, preprocess};

use super::InferenceEngine;

/// Label used in forwarding payloads when a detection carries none.
pub const NO_LABEL: &str = "No label";

/// Per-frame failure modes. Preprocess and decode errors are caller/model
/// contract violations; inference errors belong to the engine backend.
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
    #[error("inference failed")]
    Inference(E),
    #[error(transparent)]
    Decode(#[from] ShapeError),
}

/// A combined detector that bundles preprocessing and inference with the
/// output decoding core.
///
/// Holds no cross-frame state: one image in, one [`FrameReport`] out. The
/// decode context is built from the resized frame dimensions, so decoders
/// whose boxes are expressed against the resized frame report the right
/// reference space.
pub struct FramePipeline<E: InferenceEngine> {
    engine: E,
    decoder: OutputDecoder,
    input_size: u32,
    normalization: Normalization,
}

impl<E: InferenceEngine> FramePipeline<E> {
    pub fn new(
        engine: E,
        decoder: impl Into<OutputDecoder>,
        input_size: u32,
        normalization: Normalization,
    ) -> Self {
        Self {
            engine,
            decoder: decoder.into(),
            input_size,
            normalization,
        }
    }

    /// Process a single frame: normalize it, run the engine, decode the
    /// output and pick the detection to surface.
    pub fn process(&mut self, frame: &RgbImage) -> Result<FrameReport, PipelineError<E::Error>> {
        let tensor = preprocess(frame, self.input_size, self.normalization)?;
        let raw = self
            .engine
            .infer(&tensor)
            .map_err(PipelineError::Inference)?;

        let ctx = DecodeContext::square(self.input_size as f32);
        let detections = self.decoder.decode(&raw, ctx)?;
        let best = select_best(&detections).cloned();

        if let Some(ref result) = best {
            let [x1, y1, x2, y2] = result.to_tlbr();
            debug!(
                "best: {} x1:{x1:.2}, y1:{y1:.2}, x2:{x2:.2}, y2:{y2:.2}, conf:{:.2}",
                result.label.as_deref().unwrap_or(NO_LABEL),
                result.confidence
            );
        }

        Ok(FrameReport { detections, best })
    }

    /// Get a reference to the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get a mutable reference to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Get a reference to the configured decoder.
    pub fn decoder(&self) -> &OutputDecoder {
        &self.decoder
    }
}

/// Outcome of one detection cycle.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// All detections that passed the variant's confidence filter, in
    /// emission order.
    pub detections: Vec<DetectionResult>,
    /// The highest-confidence detection, surfaced to the overlay.
    pub best: Option<DetectionResult>,
}

impl FrameReport {
    /// The `(label, image)` pair handed to the network collaborator for
    /// the accepted best detection, if any. The collaborator owns encoding
    /// and transport; its failures never reach this core.
    pub fn forward_payload<'a>(&self, frame: &'a RgbImage) -> Option<(String, &'a RgbImage)> {
        self.best.as_ref().map(|best| {
            let label = best
                .label
                .clone()
                .unwrap_or_else(|| NO_LABEL.to_string());
            (label, frame)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{GridAnchorDecoder, RawOutput};
    use ndarray::Array2;

    struct MockEngine {
        raw: RawOutput,
    }

    impl InferenceEngine for MockEngine {
        type Error = std::convert::Infallible;

        fn infer(&mut self, _input: &crate::preprocess::InputTensor) -> Result<RawOutput, Self::Error> {
            Ok(self.raw.clone())
        }
    }

    #[test]
    fn test_empty_frame_yields_no_best() {
        // Single anchor below threshold
        let tensor =
            Array2::from_shape_vec((5, 1), vec![10.0, 20.0, 30.0, 40.0, 0.2]).unwrap();
        let engine = MockEngine {
            raw: RawOutput::GridAnchor(tensor),
        };

        let mut pipeline =
            FramePipeline::new(engine, GridAnchorDecoder::new(), 640, Normalization::Unit);
        let report = pipeline.process(&RgbImage::new(480, 640)).unwrap();

        assert!(report.detections.is_empty());
        assert!(report.best.is_none());
        assert!(report.forward_payload(&RgbImage::new(480, 640)).is_none());
    }

    #[test]
    fn test_payload_label_falls_back() {
        // Grid/anchor detections carry no label
        let tensor =
            Array2::from_shape_vec((5, 1), vec![10.0, 20.0, 30.0, 40.0, 0.9]).unwrap();
        let engine = MockEngine {
            raw: RawOutput::GridAnchor(tensor),
        };

        let mut pipeline =
            FramePipeline::new(engine, GridAnchorDecoder::new(), 640, Normalization::Unit);
        let frame = RgbImage::new(480, 640);
        let report = pipeline.process(&frame).unwrap();

        let (label, _) = report.forward_payload(&frame).unwrap();
        assert_eq!(label, NO_LABEL);
    }
}
