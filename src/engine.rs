//! Inference-engine seam and the per-frame pipeline.
//!
//! The crate never runs a model itself. [`InferenceEngine`] is the boundary
//! to whatever runtime the application embeds; [`FramePipeline`] wires
//! preprocessing, inference, decoding and best-detection selection into the
//! one-frame-in, one-report-out cycle the camera loop drives.

mod inference;
mod pipeline;

pub use inference::InferenceEngine;
pub use pipeline::{FramePipeline, FrameReport, NO_LABEL, PipelineError};
