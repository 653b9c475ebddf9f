//! 3x3 box blur for single-channel fields.
//!
//! Interior pixels become the truncated mean of their 3x3 neighbourhood.
//! The outermost rows and columns are copied through unchanged, so the inner
//! loop never needs an edge case. Works on byte intensity fields and on
//! wide-integer magnitude / weighted fields through [`Sample`].

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use super::core::{neighbour, Sample, NEIGHBOURS};

/// Apply a 3x3 mean filter.
///
/// # Arguments
/// * `src` - Field of shape (height, width)
///
/// # Returns
/// Blurred field; border samples equal the source
pub fn box_blur_3x3<T: Sample>(src: ArrayView2<T>) -> Array2<T> {
    let mut dst = Array2::<T>::default(src.dim());
    box_blur_3x3_into(src, dst.view_mut());
    dst
}

pub(crate) fn box_blur_3x3_into<T: Sample>(src: ArrayView2<T>, mut dst: ArrayViewMut2<T>) {
    let (height, width) = src.dim();
    debug_assert_eq!(dst.dim(), (height, width));

    dst.assign(&src);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let sum = NEIGHBOURS
                .iter()
                .fold(src[[y, x]].to_wide(), |acc, &o| acc + src[neighbour(y, x, o)].to_wide());
            dst[[y, x]] = T::from_wide(sum / 9);
        }
    }
}
