//! Greyscale reduction for the edge pipeline.
//!
//! Collapses an interleaved pixel buffer to a single intensity channel by
//! taking the unweighted mean of the colour channels. Alpha, when present,
//! is excluded from both the sum and the divisor.

use ndarray::{Array2, ArrayView3, ArrayViewMut2};

use super::core::PixelLayout;

/// Reduce an image of shape (height, width, channels) to intensity.
///
/// # Arguments
/// * `input` - Interleaved 8-bit pixels
/// * `layout` - Channel layout; must have at least one colour channel
///
/// # Returns
/// Intensity field of shape (height, width), truncated toward zero
pub fn greyscale_mean_u8(input: ArrayView3<u8>, layout: PixelLayout) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));
    greyscale_mean_u8_into(input, layout, output.view_mut());
    output
}

pub(crate) fn greyscale_mean_u8_into(
    input: ArrayView3<u8>,
    layout: PixelLayout,
    mut output: ArrayViewMut2<u8>,
) {
    let (height, width, _) = input.dim();
    debug_assert_eq!(output.dim(), (height, width));

    let colour_channels = layout.colour_channels();
    if colour_channels == 0 {
        output.fill(0);
        return;
    }

    for y in 0..height {
        for x in 0..width {
            let sum: u32 = (0..colour_channels).map(|c| input[[y, x, c]] as u32).sum();
            output[[y, x]] = (sum / colour_channels as u32) as u8;
        }
    }
}
