//! Run-time parameters for the adaptive edge filter.
//!
//! Hosts typically persist these between invocations; missing fields fall
//! back to the defaults when restoring.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::threshold::global_threshold;

/// How the global gradient threshold is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    /// Estimate the threshold from the image; `threshold` is ignored.
    pub automatic: bool,
    /// Manual threshold, 1-255 in host UIs. Passed through unvalidated.
    pub threshold: i32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            automatic: true,
            threshold: 16,
        }
    }
}

impl ThresholdParams {
    pub fn automatic() -> Self {
        Self::default()
    }

    pub fn manual(threshold: i32) -> Self {
        Self {
            automatic: false,
            threshold,
        }
    }

    /// Global threshold for an image with the given intensity.
    pub fn resolve(&self, intensity: ArrayView2<u8>) -> i32 {
        if self.automatic {
            global_threshold(intensity)
        } else {
            self.threshold
        }
    }
}
