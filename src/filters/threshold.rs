//! Global and locally adaptive thresholds.
//!
//! The global threshold gates which pixels carry enough gradient energy to be
//! classified at all. It is either supplied by the caller or estimated from
//! the spread of the intensity histogram.
//!
//! The adaptive threshold field decides, per pixel, which side of a boundary
//! a pixel falls on. It is the magnitude-weighted local mean of intensity:
//!
//! ```text
//!   field = blur(intensity * magnitude) / blur(magnitude)
//! ```
//!
//! so strong edges pull the local threshold toward the intensity found on
//! them, tracking shadows and highlights instead of a single scalar.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use super::blur::box_blur_3x3_into;

// ============================================================================
// Global threshold
// ============================================================================

/// Estimate a global threshold as half the intensity standard deviation.
///
/// Sums are accumulated in `f64` so large images cannot overflow. The result
/// is rounded half-to-even. An empty field yields 0.
pub fn global_threshold(intensity: ArrayView2<u8>) -> i32 {
    let count = intensity.len();
    if count == 0 {
        return 0;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for &v in intensity.iter() {
        let v = v as f64;
        sum += v;
        sum_sq += v * v;
    }

    let n = count as f64;
    let mean = sum / n;
    // Cancellation can leave a tiny negative on flat images.
    let variance = (sum_sq / n - mean * mean).max(0.0);

    (0.5 * variance.sqrt()).round_ties_even() as i32
}

// ============================================================================
// Adaptive threshold field
// ============================================================================

/// Build the adaptive threshold field at the resolution of its inputs.
///
/// # Arguments
/// * `intensity` - Blurred intensity
/// * `magnitude` - Gradient magnitude of `intensity`
///
/// # Returns
/// Per-pixel threshold clamped to 0-255
pub fn adaptive_threshold(intensity: ArrayView2<u8>, magnitude: ArrayView2<i32>) -> Array2<u8> {
    let dim = intensity.dim();
    let mut weighted = Array2::<i32>::zeros(dim);
    let mut numerator = Array2::<i32>::zeros(dim);
    let mut denominator = Array2::<i32>::zeros(dim);
    let mut output = Array2::<u8>::zeros(dim);

    weight_by_magnitude_into(intensity, magnitude, weighted.view_mut());
    box_blur_3x3_into(weighted.view(), numerator.view_mut());
    box_blur_3x3_into(magnitude, denominator.view_mut());
    divide_clamped_into(numerator.view(), denominator.view(), output.view_mut());

    output
}

/// Elementwise `intensity * magnitude`.
pub(crate) fn weight_by_magnitude_into(
    intensity: ArrayView2<u8>,
    magnitude: ArrayView2<i32>,
    mut output: ArrayViewMut2<i32>,
) {
    let (height, width) = intensity.dim();
    debug_assert_eq!(magnitude.dim(), (height, width));
    debug_assert_eq!(output.dim(), (height, width));

    for y in 0..height {
        for x in 0..width {
            output[[y, x]] = (intensity[[y, x]] as i32).saturating_mul(magnitude[[y, x]]);
        }
    }
}

/// Elementwise `numerator / denominator`, clamped to 0-255.
///
/// A zero denominator is replaced by 1, leaving the clamped numerator.
pub(crate) fn divide_clamped_into(
    numerator: ArrayView2<i32>,
    denominator: ArrayView2<i32>,
    mut output: ArrayViewMut2<u8>,
) {
    let (height, width) = numerator.dim();
    debug_assert_eq!(denominator.dim(), (height, width));
    debug_assert_eq!(output.dim(), (height, width));

    for y in 0..height {
        for x in 0..width {
            let d = match denominator[[y, x]] {
                0 => 1,
                d => d,
            };
            output[[y, x]] = (numerator[[y, x]] / d).clamp(0, 255) as u8;
        }
    }
}
