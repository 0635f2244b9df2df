//! Planar input tensor construction.

use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array3;
use thiserror::Error;

use super::normalize::Normalization;

/// Normalized model input of shape `(3, size, size)`.
///
/// The standard layout is channel-planar: all red values first, then all
/// green, then all blue, exactly the flat `3 × S × S` contract inference
/// engines take.
pub type InputTensor = Array3<f32>;

/// Preprocessing contract violations. These fail fast; preprocessing never
/// partially succeeds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("input image has a zero dimension ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("target size must be non-zero")]
    ZeroTargetSize,
}

/// Resize a frame to the model square and write the normalized planar
/// tensor the inference engine expects.
pub fn preprocess(
    image: &RgbImage,
    target_size: u32,
    normalization: Normalization,
) -> Result<InputTensor, PreprocessError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PreprocessError::EmptyImage { width, height });
    }
    if target_size == 0 {
        return Err(PreprocessError::ZeroTargetSize);
    }

    let scaled;
    let resized = if (width, height) == (target_size, target_size) {
        image
    } else {
        scaled = imageops::resize(image, target_size, target_size, FilterType::Triangle);
        &scaled
    };

    let size = target_size as usize;
    let mut tensor = Array3::zeros((3, size, size));
    for (x, y, pixel) in resized.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for channel in 0..3 {
            tensor[[channel, y, x]] = normalization.apply(channel, pixel[channel] as f32 / 255.0);
        }
    }

    Ok(tensor)
}
