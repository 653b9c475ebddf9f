//! Gradient magnitude on a smoothed intensity field.
//!
//! Each interior pixel compares its two pairs of diagonally opposite
//! neighbours:
//!
//! ```text
//!   a = |NE - SW|
//!   b = |SE - NW|
//!   magnitude = max(a, b) + min(a, b) / 3
//! ```
//!
//! The dominant direction counts fully and the other at a third, which is a
//! cheap stand-in for a true Sobel magnitude. Values are unbounded wide
//! integers; the outermost rows and columns are zero.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use super::core::{neighbour, NE, NW, SE, SW};

/// Compute the diagonal gradient magnitude of an intensity field.
///
/// # Arguments
/// * `input` - Blurred intensity of shape (height, width)
///
/// # Returns
/// Magnitude field of the same shape, zero on the border
pub fn gradient_magnitude(input: ArrayView2<u8>) -> Array2<i32> {
    let mut output = Array2::<i32>::zeros(input.dim());
    gradient_magnitude_into(input, output.view_mut());
    output
}

pub(crate) fn gradient_magnitude_into(input: ArrayView2<u8>, mut output: ArrayViewMut2<i32>) {
    let (height, width) = input.dim();
    debug_assert_eq!(output.dim(), (height, width));

    output.fill(0);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let at = |o| input[neighbour(y, x, o)] as i32;

            let a = (at(NE) - at(SW)).abs();
            let b = (at(SE) - at(NW)).abs();

            output[[y, x]] = a.max(b) + a.min(b) / 3;
        }
    }
}
