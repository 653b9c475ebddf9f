//! Adaptive Threshold Edge Detection
//!
//! Classifies every pixel of a raster image as edge or background using a
//! locally adaptive threshold derived from the image's own blurred gradient
//! magnitude, rather than one global constant. Regions of different contrast
//! (shadows, gradients) get thresholds that follow their local brightness.
//!
//! Python bindings are available via PyO3 and JavaScript bindings via
//! wasm-bindgen, behind the `python` and `wasm` features.
//!
//! ## Image Format
//! The filter accepts interleaved 8-bit images:
//! - **Grayscale**: (height, width, 1)
//! - **Gray + alpha**: (height, width, 2)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4)
//!
//! The output has the same shape. Each colour sample is 0 (edge) or 255
//! (background); alpha is forced to 255.
//!
//! ## Pipeline
//! Work is split across two resolutions: blur and classification run at full
//! resolution, gradient magnitude and the adaptive threshold field at half
//! resolution. See [`filters::adaptive_edge`].
//!
//! ```
//! use adaptive_edge::{adaptive_edge_u8, ThresholdParams};
//! use ndarray::Array3;
//!
//! let image = Array3::<u8>::from_elem((10, 10, 3), 128);
//! let mask = adaptive_edge_u8(image.view(), false, &ThresholdParams::default()).unwrap();
//! assert!(mask.iter().all(|&v| v == 255));
//! ```

pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::EdgeError;
pub use filters::adaptive_edge::{
    adaptive_edge_batch, adaptive_edge_raw, adaptive_edge_u8, EdgeWorkspace,
};
pub use filters::classify::Classification;
pub use filters::core::PixelLayout;
pub use filters::params::ThresholdParams;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::adaptive_edge::adaptive_edge_u8;
    use crate::filters::core::PixelLayout;
    use crate::filters::grayscale::greyscale_mean_u8;
    use crate::filters::params::ThresholdParams;
    use crate::filters::threshold::global_threshold;

    fn layout_for(channels: usize, has_alpha: Option<bool>) -> PixelLayout {
        match has_alpha {
            Some(alpha) => PixelLayout::new(channels, alpha),
            None => PixelLayout::infer(channels),
        }
    }

    // ========================================================================
    // Adaptive Edge Detection
    // ========================================================================

    /// Detect edges using an adaptive threshold.
    ///
    /// # Arguments
    /// * `image` - Input image (1, 2, 3 or 4 channels), u8
    /// * `automatic` - Estimate the global threshold from the image
    /// * `threshold` - Manual global threshold (1-255), ignored when automatic
    /// * `has_alpha` - Override alpha detection (default: 2 or 4 channels)
    ///
    /// # Returns
    /// Binary mask with the input's shape: 0 on edges, 255 elsewhere
    #[pyfunction]
    #[pyo3(name = "adaptive_edge", signature = (image, automatic=true, threshold=16, has_alpha=None))]
    pub fn adaptive_edge_py<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        automatic: bool,
        threshold: i32,
        has_alpha: Option<bool>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let layout = layout_for(input.dim().2, has_alpha);
        let params = ThresholdParams { automatic, threshold };

        let result = adaptive_edge_u8(input, layout.has_alpha, &params)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(result.into_pyarray(py))
    }

    /// Threshold that automatic mode would pick for this image.
    #[pyfunction]
    #[pyo3(signature = (image, has_alpha=None))]
    pub fn estimate_threshold(image: PyReadonlyArray3<'_, u8>, has_alpha: Option<bool>) -> PyResult<i32> {
        let input = image.as_array();
        let layout = layout_for(input.dim().2, has_alpha);
        layout
            .validate()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        let grey = greyscale_mean_u8(input, layout);
        Ok(global_threshold(grey.view()))
    }

    #[pymodule]
    pub fn adaptive_edge(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(adaptive_edge_py, m)?)?;
        m.add_function(wrap_pyfunction!(estimate_threshold, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::adaptive_edge;
