//! Half-resolution resampling.
//!
//! Downsampling is plain stride-2 decimation: every other sample along each
//! axis is kept and the rest are dropped. Upsampling reverses it with
//! integer linear interpolation, duplicating the last sample where the full
//! resolution dimension has no interpolation partner.
//!
//! Half resolution is always `(height / 2, width / 2)`.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use super::core::{half_dims, Sample};

// ============================================================================
// Decimation
// ============================================================================

/// Keep the sample at every even row and even column.
///
/// # Returns
/// Field of shape `(height / 2, width / 2)`
pub fn downsample_decimate<T: Sample>(src: ArrayView2<T>) -> Array2<T> {
    let (height, width) = src.dim();
    let mut dst = Array2::<T>::default(half_dims(height, width));
    downsample_decimate_into(src, dst.view_mut());
    dst
}

pub(crate) fn downsample_decimate_into<T: Sample>(src: ArrayView2<T>, mut dst: ArrayViewMut2<T>) {
    let (height, width) = src.dim();
    let (half_h, half_w) = half_dims(height, width);
    debug_assert_eq!(dst.dim(), (half_h, half_w));

    for y in 0..half_h {
        for x in 0..half_w {
            dst[[y, x]] = src[[2 * y, 2 * x]];
        }
    }
}

// ============================================================================
// Linear upsampling
// ============================================================================

/// Reconstruct a full-resolution field from its half-resolution version.
///
/// # Arguments
/// * `src` - Half-resolution field of shape (h, w)
/// * `height`, `width` - Target dimensions; `height / 2 == h` and `width / 2 == w`
///
/// # Panics
/// If the target dimensions do not halve to the source dimensions.
pub fn upsample_linear<T: Sample>(src: ArrayView2<T>, height: usize, width: usize) -> Array2<T> {
    let mut dst = Array2::<T>::default((height, width));
    upsample_linear_into(src, dst.view_mut());
    dst
}

pub(crate) fn upsample_linear_into<T: Sample>(src: ArrayView2<T>, mut dst: ArrayViewMut2<T>) {
    let (half_h, half_w) = src.dim();
    let (height, width) = dst.dim();
    assert_eq!(
        half_dims(height, width),
        (half_h, half_w),
        "target {height}x{width} does not halve to {half_h}x{half_w}"
    );

    if half_h == 0 || half_w == 0 {
        dst.fill(T::default());
        return;
    }

    // Even output rows: horizontal interpolation of each source row.
    for y in 0..half_h {
        let row = 2 * y;
        let mut prev = src[[y, 0]];
        let mut curr = prev;
        dst[[row, 0]] = prev;

        let mut ox = 1;
        for x in 1..half_w {
            curr = src[[y, x]];
            dst[[row, ox]] = T::mean_floor(prev, curr);
            dst[[row, ox + 1]] = curr;
            ox += 2;
            prev = curr;
        }
        if width % 2 == 1 {
            dst[[row, ox]] = T::mean_floor(prev, curr);
            ox += 1;
        }
        dst[[row, ox]] = curr;
    }

    // The trailing row of an odd height has no source row; repeat the last one.
    if height % 2 == 1 {
        let last = 2 * half_h;
        for x in 0..width {
            dst[[last, x]] = dst[[last - 2, x]];
        }
    }

    // Odd output rows: mean of the rows above and below.
    for y in (1..height - 1).step_by(2) {
        for x in 0..width {
            dst[[y, x]] = T::mean_floor(dst[[y - 1, x]], dst[[y + 1, x]]);
        }
    }

    if height % 2 == 0 {
        for x in 0..width {
            dst[[height - 1, x]] = dst[[height - 2, x]];
        }
    }
}
