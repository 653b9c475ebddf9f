//! Ternary pixel classification.
//!
//! Pixels whose gradient magnitude exceeds the global threshold are split
//! into edge and background by comparing the blurred intensity against the
//! adaptive threshold field. Everything else is ambiguous.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

/// Outcome for one pixel. Discriminants match the 8-bit encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Classification {
    Edge = 0,
    Ambiguous = 128,
    Background = 255,
}

impl Classification {
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Classify every pixel.
///
/// # Arguments
/// * `intensity` - Full-resolution blurred intensity
/// * `magnitude` - Full-resolution gradient magnitude
/// * `threshold` - Full-resolution adaptive threshold field
/// * `global_threshold` - Minimum magnitude for a confident decision
pub fn classify(
    intensity: ArrayView2<u8>,
    magnitude: ArrayView2<i32>,
    threshold: ArrayView2<u8>,
    global_threshold: i32,
) -> Array2<Classification> {
    let mut output = Array2::from_elem(intensity.dim(), Classification::Ambiguous);
    classify_into(intensity, magnitude, threshold, global_threshold, output.view_mut());
    output
}

pub(crate) fn classify_into(
    intensity: ArrayView2<u8>,
    magnitude: ArrayView2<i32>,
    threshold: ArrayView2<u8>,
    global_threshold: i32,
    mut output: ArrayViewMut2<Classification>,
) {
    let (height, width) = intensity.dim();
    debug_assert_eq!(magnitude.dim(), (height, width));
    debug_assert_eq!(threshold.dim(), (height, width));
    debug_assert_eq!(output.dim(), (height, width));

    for y in 0..height {
        for x in 0..width {
            output[[y, x]] = if magnitude[[y, x]] <= global_threshold {
                Classification::Ambiguous
            } else if intensity[[y, x]] <= threshold[[y, x]] {
                Classification::Edge
            } else {
                Classification::Background
            };
        }
    }
}
