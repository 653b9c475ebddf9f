//! Adaptive threshold edge detection pipeline.
//!
//! Sequences the filter stages over one image region:
//!
//! 1. Greyscale reduction and global threshold (manual or estimated)
//! 2. 3x3 blur at full resolution, decimation to half resolution
//! 3. Gradient magnitude at half resolution, upsampled to full resolution
//! 4. Adaptive threshold field at half resolution, upsampled to full resolution
//! 5. Ternary classification, then the connectivity filter
//!
//! All scratch buffers live in an [`EdgeWorkspace`] sized once from the
//! region geometry. A workspace is never shared between threads; the batch
//! entry point gives every region its own.
//!
//! ## Output Format
//!
//! Same shape and channel layout as the input. Colour channels are 0 on
//! edges and 255 elsewhere; alpha is always 255.

use log::{debug, trace};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use rayon::prelude::*;

use super::blur::box_blur_3x3_into;
use super::classify::{classify_into, Classification};
use super::core::{half_dims, PixelLayout};
use super::edge::gradient_magnitude_into;
use super::grayscale::greyscale_mean_u8_into;
use super::morphology::connectivity_filter_into;
use super::params::ThresholdParams;
use super::resample::{downsample_decimate_into, upsample_linear_into};
use super::threshold::{divide_clamped_into, weight_by_magnitude_into};
use crate::error::EdgeError;

// ============================================================================
// Workspace
// ============================================================================

/// Scratch buffers for one region geometry.
pub struct EdgeWorkspace {
    layout: PixelLayout,
    // Full resolution
    grey: Array2<u8>,
    blurred: Array2<u8>,
    magnitude: Array2<i32>,
    threshold: Array2<u8>,
    classes: Array2<Classification>,
    output: Array3<u8>,
    // Half resolution
    blurred_half: Array2<u8>,
    magnitude_half: Array2<i32>,
    weighted_half: Array2<i32>,
    numerator_half: Array2<i32>,
    denominator_half: Array2<i32>,
    threshold_half: Array2<u8>,
}

impl EdgeWorkspace {
    /// Allocate every buffer needed for a `height` x `width` region.
    pub fn new(height: usize, width: usize, layout: PixelLayout) -> Result<Self, EdgeError> {
        layout.validate()?;

        let full = (height, width);
        let half = half_dims(height, width);

        Ok(Self {
            layout,
            grey: Array2::zeros(full),
            blurred: Array2::zeros(full),
            magnitude: Array2::zeros(full),
            threshold: Array2::zeros(full),
            classes: Array2::from_elem(full, Classification::Ambiguous),
            output: Array3::zeros((height, width, layout.channels)),
            blurred_half: Array2::zeros(half),
            magnitude_half: Array2::zeros(half),
            weighted_half: Array2::zeros(half),
            numerator_half: Array2::zeros(half),
            denominator_half: Array2::zeros(half),
            threshold_half: Array2::zeros(half),
        })
    }

    /// `(height, width)` this workspace was sized for.
    pub fn dim(&self) -> (usize, usize) {
        self.grey.dim()
    }

    /// Run every stage on `input`, returning the global threshold used.
    ///
    /// # Errors
    /// `ShapeMismatch` if `input` does not match the workspace geometry.
    pub fn run(&mut self, input: ArrayView3<u8>, params: &ThresholdParams) -> Result<i32, EdgeError> {
        let expected = self.output.dim();
        if input.dim() != expected {
            return Err(EdgeError::ShapeMismatch {
                expected,
                actual: input.dim(),
            });
        }

        let (height, width) = self.dim();
        let (half_h, half_w) = half_dims(height, width);
        trace!("adaptive_edge: half resolution {half_w}x{half_h}");
        if height < 3 || width < 3 {
            trace!("adaptive_edge: {width}x{height} has no interior pixels");
        }

        greyscale_mean_u8_into(input, self.layout, self.grey.view_mut());
        let global = params.resolve(self.grey.view());

        debug!(
            "adaptive_edge: {}x{} channels={} alpha={} threshold={} ({})",
            width,
            height,
            self.layout.channels,
            self.layout.has_alpha,
            global,
            if params.automatic { "automatic" } else { "manual" },
        );

        box_blur_3x3_into(self.grey.view(), self.blurred.view_mut());
        downsample_decimate_into(self.blurred.view(), self.blurred_half.view_mut());

        gradient_magnitude_into(self.blurred_half.view(), self.magnitude_half.view_mut());
        upsample_linear_into(self.magnitude_half.view(), self.magnitude.view_mut());

        weight_by_magnitude_into(
            self.blurred_half.view(),
            self.magnitude_half.view(),
            self.weighted_half.view_mut(),
        );
        box_blur_3x3_into(self.weighted_half.view(), self.numerator_half.view_mut());
        box_blur_3x3_into(self.magnitude_half.view(), self.denominator_half.view_mut());
        divide_clamped_into(
            self.numerator_half.view(),
            self.denominator_half.view(),
            self.threshold_half.view_mut(),
        );
        upsample_linear_into(self.threshold_half.view(), self.threshold.view_mut());

        classify_into(
            self.blurred.view(),
            self.magnitude.view(),
            self.threshold.view(),
            global,
            self.classes.view_mut(),
        );
        connectivity_filter_into(self.classes.view(), self.layout, self.output.view_mut());

        Ok(global)
    }

    pub fn magnitude(&self) -> ArrayView2<'_, i32> {
        self.magnitude.view()
    }

    pub fn threshold_field(&self) -> ArrayView2<'_, u8> {
        self.threshold.view()
    }

    pub fn classification(&self) -> ArrayView2<'_, Classification> {
        self.classes.view()
    }

    pub fn output(&self) -> ArrayView3<'_, u8> {
        self.output.view()
    }

    pub fn into_output(self) -> Array3<u8> {
        self.output
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Detect edges in an image of shape (height, width, channels).
///
/// # Arguments
/// * `input` - Interleaved 8-bit pixels
/// * `has_alpha` - Whether the last channel is alpha
/// * `params` - Global threshold selection
///
/// # Returns
/// Binary edge mask with the input's shape
pub fn adaptive_edge_u8(
    input: ArrayView3<u8>,
    has_alpha: bool,
    params: &ThresholdParams,
) -> Result<Array3<u8>, EdgeError> {
    let (height, width, channels) = input.dim();
    let mut workspace = EdgeWorkspace::new(height, width, PixelLayout::new(channels, has_alpha))?;
    workspace.run(input, params)?;
    Ok(workspace.into_output())
}

/// Detect edges in a flat row-major buffer.
///
/// # Arguments
/// * `data` - `width * height * layout.channels` samples
///
/// # Returns
/// Flat binary edge mask with the same length and layout
pub fn adaptive_edge_raw(
    data: &[u8],
    width: usize,
    height: usize,
    layout: PixelLayout,
    params: &ThresholdParams,
) -> Result<Vec<u8>, EdgeError> {
    layout.validate()?;

    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(layout.channels))
        .ok_or(EdgeError::GeometryOverflow {
            width,
            height,
            channels: layout.channels,
        })?;
    if data.len() != expected {
        return Err(EdgeError::SizeMismatch {
            expected,
            actual: data.len(),
        });
    }

    let input = ArrayView3::from_shape((height, width, layout.channels), data).map_err(|_| {
        EdgeError::SizeMismatch {
            expected,
            actual: data.len(),
        }
    })?;

    let output = adaptive_edge_u8(input, layout.has_alpha, params)?;
    Ok(output.into_raw_vec_and_offset().0)
}

/// Process independent regions in parallel, one workspace per region.
pub fn adaptive_edge_batch(
    regions: &[ArrayView3<'_, u8>],
    has_alpha: bool,
    params: &ThresholdParams,
) -> Vec<Result<Array3<u8>, EdgeError>> {
    regions
        .par_iter()
        .map(|region| adaptive_edge_u8(region.view(), has_alpha, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn grey_image(height: usize, width: usize, f: impl Fn(usize, usize) -> u8) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 1), |(y, x, _)| f(y, x))
    }

    fn bright_square() -> Array3<u8> {
        grey_image(20, 20, |y, x| {
            if (7..13).contains(&y) && (7..13).contains(&x) {
                255
            } else {
                0
            }
        })
    }

    fn textured(height: usize, width: usize, channels: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
            let block = if (y / 4 + x / 5) % 2 == 0 { 40 } else { 210 };
            (block + (x * 3 + y * 7 + c * 11) % 23) as u8
        })
    }

    #[test]
    fn test_flat_image_is_all_background() {
        let img = grey_image(10, 10, |_, _| 128);
        let mut workspace = EdgeWorkspace::new(10, 10, PixelLayout::new(1, false)).unwrap();

        let global = workspace.run(img.view(), &ThresholdParams::automatic()).unwrap();

        assert_eq!(global, 0);
        assert!(workspace.magnitude().iter().all(|&m| m == 0));
        for y in 1..9 {
            for x in 1..9 {
                assert_eq!(workspace.classification()[[y, x]], Classification::Ambiguous);
            }
        }
        assert!(workspace.output().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_bright_square_traces_closed_ring() {
        let img = bright_square();

        let result = adaptive_edge_u8(img.view(), false, &ThresholdParams::manual(10)).unwrap();

        for y in 0..20 {
            for x in 0..20 {
                let on_ring = (6..=13).contains(&y)
                    && (6..=13).contains(&x)
                    && (y == 6 || y == 13 || x == 6 || x == 13);
                let expected = if on_ring { 0 } else { 255 };
                assert_eq!(result[[y, x, 0]], expected, "pixel ({y}, {x})");
            }
        }
    }

    #[test]
    fn test_bright_square_classification() {
        let img = bright_square();
        let mut workspace = EdgeWorkspace::new(20, 20, PixelLayout::new(1, false)).unwrap();

        workspace.run(img.view(), &ThresholdParams::manual(10)).unwrap();

        let classes = workspace.classification();
        // Block boundary is edge, block centre confirmed background, far field ambiguous.
        assert_eq!(classes[[6, 6]], Classification::Edge);
        assert_eq!(classes[[13, 9]], Classification::Edge);
        assert_eq!(classes[[10, 10]], Classification::Background);
        assert_eq!(classes[[1, 1]], Classification::Ambiguous);
        assert_eq!(classes[[18, 18]], Classification::Ambiguous);
    }

    #[test]
    fn test_odd_dimensions_keep_shape() {
        for &(height, width) in &[(17usize, 15usize), (15, 17)] {
            let img = textured(height, width, 3);

            let result = adaptive_edge_u8(img.view(), false, &ThresholdParams::automatic()).unwrap();

            assert_eq!(result.dim(), (height, width, 3));
            assert!(result.iter().all(|&v| v == 0 || v == 255));
        }
    }

    #[test]
    fn test_binary_output_and_opaque_alpha() {
        let img = textured(24, 31, 4);

        let result = adaptive_edge_u8(img.view(), true, &ThresholdParams::manual(5)).unwrap();

        assert!(result.iter().all(|&v| v == 0 || v == 255));
        for y in 0..24 {
            for x in 0..31 {
                assert_eq!(result[[y, x, 3]], 255);
                // Colour channels agree
                assert_eq!(result[[y, x, 0]], result[[y, x, 1]]);
                assert_eq!(result[[y, x, 1]], result[[y, x, 2]]);
            }
        }
        assert!(result.iter().any(|&v| v == 0), "textured image should produce edges");
    }

    #[test]
    fn test_border_is_background() {
        let img = textured(19, 22, 1);

        let result = adaptive_edge_u8(img.view(), false, &ThresholdParams::manual(1)).unwrap();

        for x in 0..22 {
            assert_eq!(result[[0, x, 0]], 255);
            assert_eq!(result[[18, x, 0]], 255);
        }
        for y in 0..19 {
            assert_eq!(result[[y, 0, 0]], 255);
            assert_eq!(result[[y, 21, 0]], 255);
        }
    }

    #[test]
    fn test_repeat_runs_are_identical() {
        let img = textured(16, 16, 3);
        let params = ThresholdParams::automatic();

        let first = adaptive_edge_u8(img.view(), false, &params).unwrap();
        let second = adaptive_edge_u8(img.view(), false, &params).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_workspace_reuse_matches_fresh_run() {
        let a = textured(12, 14, 1);
        let b = bright_square().slice(ndarray::s![..12, ..14, ..]).to_owned();
        let params = ThresholdParams::manual(10);
        let mut workspace = EdgeWorkspace::new(12, 14, PixelLayout::new(1, false)).unwrap();

        workspace.run(a.view(), &params).unwrap();
        workspace.run(b.view(), &params).unwrap();

        let fresh = adaptive_edge_u8(b.view(), false, &params).unwrap();
        assert_eq!(workspace.output(), fresh.view());
    }

    #[test]
    fn test_degenerate_geometries() {
        for &(height, width) in &[(0usize, 0usize), (1, 1), (2, 2), (1, 9), (9, 2), (3, 3)] {
            let img = textured(height, width, 2);

            let result = adaptive_edge_u8(img.view(), true, &ThresholdParams::manual(0)).unwrap();

            assert_eq!(result.dim(), (height, width, 2));
            assert!(result.iter().all(|&v| v == 255), "{height}x{width}");
        }
    }

    #[test]
    fn test_raw_matches_array_entry() {
        let img = textured(11, 13, 4);
        let data: Vec<u8> = img.iter().copied().collect();
        let params = ThresholdParams::manual(8);

        let raw = adaptive_edge_raw(&data, 13, 11, PixelLayout::new(4, true), &params).unwrap();
        let array = adaptive_edge_u8(img.view(), true, &params).unwrap();

        assert_eq!(raw, array.iter().copied().collect::<Vec<u8>>());
    }

    #[test]
    fn test_raw_rejects_bad_length() {
        let data = vec![0u8; 10];

        let err = adaptive_edge_raw(&data, 4, 4, PixelLayout::new(1, false), &ThresholdParams::default())
            .unwrap_err();

        assert_eq!(err, EdgeError::SizeMismatch { expected: 16, actual: 10 });
    }

    #[test]
    fn test_raw_rejects_overflowing_geometry() {
        let width = usize::MAX / 2 + 1;

        let err = adaptive_edge_raw(&[], width, 2, PixelLayout::new(1, false), &ThresholdParams::default())
            .unwrap_err();

        assert_eq!(err, EdgeError::GeometryOverflow { width, height: 2, channels: 1 });
    }

    #[test]
    fn test_rejects_alpha_only_layout() {
        let img = Array3::<u8>::zeros((4, 4, 1));

        let err = adaptive_edge_u8(img.view(), true, &ThresholdParams::default()).unwrap_err();

        assert!(matches!(err, EdgeError::NoColourChannels { .. }));
    }

    #[test]
    fn test_workspace_rejects_wrong_geometry() {
        let mut workspace = EdgeWorkspace::new(8, 8, PixelLayout::new(1, false)).unwrap();
        let img = Array3::<u8>::zeros((8, 9, 1));

        let err = workspace.run(img.view(), &ThresholdParams::default()).unwrap_err();

        assert_eq!(err, EdgeError::ShapeMismatch { expected: (8, 8, 1), actual: (8, 9, 1) });
    }

    #[test]
    fn test_workspace_rejects_same_length_other_shape() {
        let mut workspace = EdgeWorkspace::new(8, 8, PixelLayout::new(1, false)).unwrap();
        let img = Array3::<u8>::zeros((4, 16, 1));

        let err = workspace.run(img.view(), &ThresholdParams::default()).unwrap_err();

        assert_eq!(err, EdgeError::ShapeMismatch { expected: (8, 8, 1), actual: (4, 16, 1) });
    }

    #[test]
    fn test_batch_matches_sequential() {
        let images = vec![bright_square(), textured(15, 17, 1), grey_image(10, 10, |_, _| 128)];
        let views: Vec<_> = images.iter().map(|img| img.view()).collect();
        let params = ThresholdParams::manual(10);

        let batch = adaptive_edge_batch(&views, false, &params);

        assert_eq!(batch.len(), 3);
        for (img, result) in images.iter().zip(batch) {
            let expected = adaptive_edge_u8(img.view(), false, &params).unwrap();
            assert_eq!(result.unwrap(), expected);
        }
    }
}
