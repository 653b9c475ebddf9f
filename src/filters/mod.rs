//! Filter stages of the adaptive edge detector.
//!
//! ## Supported Formats
//!
//! The pipeline accepts interleaved 8-bit images of shape (H, W, C):
//!
//! | Format | Channels | Alpha |
//! |--------|----------|-------|
//! | Grayscale8 | 1 | no |
//! | GrayAlpha8 | 2 | last channel |
//! | RGB8 | 3 | no |
//! | RGBA8 | 4 | last channel |
//!
//! Intensity is the plain mean of the colour channels. Output keeps the
//! input layout, with every colour sample 0 or 255 and alpha forced to 255.
//!
//! ## Stages
//!
//! - **grayscale**: colour channels to one intensity field
//! - **blur**: 3x3 mean filter, border passthrough (u8 and i32 fields)
//! - **resample**: stride-2 decimation and linear upsampling (u8 and i32)
//! - **edge**: diagonal gradient magnitude
//! - **threshold**: variance-based global threshold, adaptive threshold field
//! - **classify**: edge / background / ambiguous per pixel
//! - **morphology**: connectivity filter producing the binary mask
//! - **adaptive_edge**: the orchestrating pipeline and its workspace

pub mod core;
pub mod params;

pub mod grayscale;
pub mod blur;
pub mod resample;
pub mod edge;
pub mod threshold;
pub mod classify;
pub mod morphology;
pub mod adaptive_edge;
