//! WebAssembly exports for the adaptive edge filter.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Pixel data is
//! passed as a flat, row-major byte array with interleaved channels.

use wasm_bindgen::prelude::*;

use crate::filters::adaptive_edge::adaptive_edge_raw;
use crate::filters::core::PixelLayout;
use crate::filters::params::ThresholdParams;

/// Detect edges using an adaptive threshold.
///
/// # Arguments
/// * `data` - Flat array of bytes (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1, 2, 3 or 4; 2 and 4 carry alpha
/// * `automatic` - Estimate the global threshold from the image
/// * `threshold` - Manual global threshold (1-255), ignored when automatic
///
/// # Returns
/// Flat array with the same layout: 0 on edges, 255 elsewhere, alpha 255
#[wasm_bindgen]
pub fn adaptive_edge_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    automatic: bool,
    threshold: i32,
) -> Result<Vec<u8>, JsValue> {
    let params = ThresholdParams { automatic, threshold };

    adaptive_edge_raw(data, width, height, PixelLayout::infer(channels), &params)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
