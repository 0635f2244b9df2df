//! Trait for inference engine backends.

use crate::decoder::RawOutput;
use crate::preprocess::InputTensor;

/// Trait for inference engine backends.
///
/// Implement this to connect any runtime (ONNX Runtime, TFLite, ...) to the
/// decoding core. Session creation and model lifetime stay on the
/// implementor's side; the core only asks that a fixed-size input tensor
/// produce an output matching one of the documented shape contracts.
///
/// # Example
///
/// ```ignore
/// use camdecode_rs::{InferenceEngine, InputTensor, RawOutput};
///
/// struct MyEngine {
///     // Your session here
/// }
///
/// impl InferenceEngine for MyEngine {
///     type Error = std::io::Error;
///
///     fn infer(&mut self, input: &InputTensor) -> Result<RawOutput, Self::Error> {
///         // Run the model and wrap its tensors
///         Ok(RawOutput::Decoded { class_ids: vec![], boxes: vec![], scores: vec![] })
///     }
/// }
/// ```
pub trait InferenceEngine {
    /// Error type for inference failures.
    type Error;

    /// Run the model on a normalized, channel-planar input tensor.
    fn infer(&mut self, input: &InputTensor) -> Result<RawOutput, Self::Error>;
}
