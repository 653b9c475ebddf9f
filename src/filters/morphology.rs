//! Connectivity filter: collapse the ternary classification to a binary mask.
//!
//! An interior pixel stays an edge only when it is classified as an edge and
//! at least one of its eight neighbours is confirmed background. Isolated
//! edge pixels and ambiguous regions become background. The outermost rows
//! and columns are always background.
//!
//! ## Output Format
//!
//! Interleaved 8-bit pixels in the caller's layout. Colour channels are 0
//! (edge) or 255 (background); alpha, if present, is always 255.

use ndarray::{Array3, ArrayView2, ArrayViewMut3};

use super::classify::Classification;
use super::core::{neighbour, PixelLayout, NEIGHBOURS};

const EDGE: u8 = 0;
const BACKGROUND: u8 = 255;

/// Build the final edge mask from a classification field.
///
/// # Arguments
/// * `classes` - Classification of shape (height, width)
/// * `layout` - Channel layout of the output buffer
///
/// # Returns
/// Mask of shape (height, width, layout.channels)
pub fn connectivity_filter(classes: ArrayView2<Classification>, layout: PixelLayout) -> Array3<u8> {
    let (height, width) = classes.dim();
    let mut output = Array3::<u8>::zeros((height, width, layout.channels));
    connectivity_filter_into(classes, layout, output.view_mut());
    output
}

pub(crate) fn connectivity_filter_into(
    classes: ArrayView2<Classification>,
    layout: PixelLayout,
    mut output: ArrayViewMut3<u8>,
) {
    let (height, width) = classes.dim();
    debug_assert_eq!(output.dim(), (height, width, layout.channels));

    // Border, alpha and every rejected pixel are background.
    output.fill(BACKGROUND);

    let colour_channels = layout.colour_channels();

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if classes[[y, x]] != Classification::Edge {
                continue;
            }

            let touches_background = NEIGHBOURS
                .iter()
                .any(|&o| classes[neighbour(y, x, o)] == Classification::Background);

            if touches_background {
                for c in 0..colour_channels {
                    output[[y, x, c]] = EDGE;
                }
            }
        }
    }
}
