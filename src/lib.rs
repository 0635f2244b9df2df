//! Detection post-processing core for on-device object detection.
//!
//! This crate turns raw model output tensors into calibrated, labeled,
//! confidence-filtered bounding boxes. It covers the three output layouts
//! found in mobile detection exports — grid/anchor tensors, row-major
//! candidate lists and post-NMS decoded tensors — plus the legacy
//! single-score classifier family, and leaves camera capture, UI rendering
//! and network transport to the surrounding application.
//!
//! The inference engine itself is an opaque collaborator: implement
//! [`InferenceEngine`] for your runtime and drive frames through a
//! [`FramePipeline`], or call the preprocessing and decoding pieces
//! directly.

pub mod classify;
pub mod decoder;
pub mod engine;
pub mod preprocess;

pub use decoder::{
    CandidateRowsDecoder, DecodeContext, DecodedOutputsDecoder, DetectionResult,
    GridAnchorDecoder, LabelTable, OutputDecoder, RawOutput, Rect, ShapeError, select_best,
};
pub use engine::{FramePipeline, FrameReport, InferenceEngine, PipelineError};
pub use preprocess::{InputTensor, Normalization, PreprocessError, preprocess};
