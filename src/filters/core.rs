//! Core utilities shared by the edge pipeline stages.
//!
//! This module provides:
//! - The [`Sample`] trait letting blur and resample run on both byte and
//!   wide-integer fields
//! - Named 3x3 neighbour offsets
//! - [`PixelLayout`], the interleaved channel description of a pixel buffer

use crate::error::EdgeError;

// ============================================================================
// Numeric samples
// ============================================================================

/// A scalar stored in a single-channel field.
///
/// Arithmetic is carried out in `i64` and narrowed back with saturation, so
/// the 3x3 sums and pairwise averages never wrap for either instantiation.
/// Averages round toward negative infinity.
pub trait Sample: Copy + Default + PartialEq + Send + Sync + 'static {
    fn to_wide(self) -> i64;

    /// Narrow a wide value, saturating at the type's range.
    fn from_wide(value: i64) -> Self;

    /// Floor of the mean of two samples.
    #[inline]
    fn mean_floor(a: Self, b: Self) -> Self {
        Self::from_wide((a.to_wide() + b.to_wide()) >> 1)
    }
}

impl Sample for u8 {
    #[inline]
    fn to_wide(self) -> i64 {
        self as i64
    }

    #[inline]
    fn from_wide(value: i64) -> Self {
        value.clamp(0, u8::MAX as i64) as u8
    }
}

impl Sample for i32 {
    #[inline]
    fn to_wide(self) -> i64 {
        self as i64
    }

    #[inline]
    fn from_wide(value: i64) -> Self {
        value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

// ============================================================================
// Neighbourhood offsets
// ============================================================================

/// `(dy, dx)` displacement from a centre pixel.
pub type Offset = (isize, isize);

pub const NW: Offset = (-1, -1);
pub const N: Offset = (-1, 0);
pub const NE: Offset = (-1, 1);
pub const W: Offset = (0, -1);
pub const E: Offset = (0, 1);
pub const SW: Offset = (1, -1);
pub const S: Offset = (1, 0);
pub const SE: Offset = (1, 1);

/// The eight neighbours of a pixel, row-major.
pub const NEIGHBOURS: [Offset; 8] = [NW, N, NE, W, E, SW, S, SE];

/// Index of the neighbour of `(y, x)` at `offset`.
///
/// Only valid for interior pixels; callers iterate `1..dim - 1`.
#[inline]
pub fn neighbour(y: usize, x: usize, (dy, dx): Offset) -> [usize; 2] {
    [y.wrapping_add_signed(dy), x.wrapping_add_signed(dx)]
}

/// Half-resolution dimensions `(height / 2, width / 2)`.
#[inline]
pub fn half_dims(height: usize, width: usize) -> (usize, usize) {
    (height / 2, width / 2)
}

// ============================================================================
// Pixel layout
// ============================================================================

/// Channel layout of an interleaved 8-bit pixel buffer.
///
/// When `has_alpha` is set the last channel of each pixel is alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub channels: usize,
    pub has_alpha: bool,
}

impl PixelLayout {
    pub fn new(channels: usize, has_alpha: bool) -> Self {
        Self { channels, has_alpha }
    }

    /// Guess alpha from the channel count: grey+alpha (2) and RGBA (4).
    pub fn infer(channels: usize) -> Self {
        Self::new(channels, channels == 2 || channels == 4)
    }

    /// Channels that contribute to intensity.
    #[inline]
    pub fn colour_channels(&self) -> usize {
        if self.has_alpha {
            self.channels.saturating_sub(1)
        } else {
            self.channels
        }
    }

    pub fn validate(&self) -> Result<(), EdgeError> {
        if self.colour_channels() == 0 {
            return Err(EdgeError::NoColourChannels {
                channels: self.channels,
                has_alpha: self.has_alpha,
            });
        }
        Ok(())
    }
}
