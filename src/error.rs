//! Errors raised while validating a pixel buffer at the pipeline entry.
//!
//! Once a buffer has been accepted every stage is infallible, so this is the
//! whole error surface of the crate.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeError {
    /// Flat buffer length disagrees with `width * height * channels`.
    #[error("pixel buffer size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// `width * height * channels` does not fit in `usize`.
    #[error("pixel buffer geometry overflows: {width}x{height}x{channels}")]
    GeometryOverflow { width: usize, height: usize, channels: usize },

    /// Image shape differs from the geometry a workspace was sized for.
    #[error("image shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    /// The layout carries no colour channel to derive intensity from.
    #[error("pixel layout has no colour channels (channels={channels}, alpha={has_alpha})")]
    NoColourChannels { channels: usize, has_alpha: bool },
}
