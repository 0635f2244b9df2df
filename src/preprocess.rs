//! Image-to-tensor preprocessing for model input.
//!
//! Converts a decoded RGB frame into the flat, channel-planar float tensor
//! an inference engine expects: resize to the model square, scale channels
//! to [0, 1], then apply the model family's normalization scheme.

mod normalize;
mod tensor;

pub use normalize::{IMAGENET_MEAN, IMAGENET_STD, Normalization};
pub use tensor::{InputTensor, PreprocessError, preprocess};
