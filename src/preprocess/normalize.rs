//! Per-channel normalization schemes.

/// ImageNet per-channel means (R, G, B).
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// ImageNet per-channel standard deviations (R, G, B).
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Normalization applied to each channel value after the [0, 1] scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Normalization {
    /// Plain [0, 1] RGB, as YOLO-style exports expect.
    #[default]
    Unit,
    /// `(value - mean[c]) / std[c]` with the ImageNet constants, as
    /// detection-transformer-style exports expect.
    ImageNet,
}

impl Normalization {
    /// Normalize one channel value already scaled to [0, 1].
    #[inline]
    pub fn apply(&self, channel: usize, value: f32) -> f32 {
        match self {
            Normalization::Unit => value,
            Normalization::ImageNet => (value - IMAGENET_MEAN[channel]) / IMAGENET_STD[channel],
        }
    }
}
