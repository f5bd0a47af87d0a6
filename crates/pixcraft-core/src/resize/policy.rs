//! Dimension policy for resize targets.
//!
//! The resampler takes exact integer dimensions; everything about *choosing*
//! those dimensions lives here, outside the resampler itself: aspect-ratio
//! locking, percentage scaling, and the "do not enlarge" guard.

use serde::{Deserialize, Serialize};

/// An aspect ratio captured at the moment locking is enabled or a preset is
/// chosen.
///
/// The ratio is *not* recomputed per image: a mixed batch of differently
/// shaped sources all target the same output aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectLock {
    ratio: f64,
}

impl AspectLock {
    /// Capture the ratio from the dimensions shown when the user locks.
    /// Returns `None` for degenerate dimensions.
    pub fn capture(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            ratio: width as f64 / height as f64,
        })
    }

    /// Width / height ratio held by the lock.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Recompute height after the user edits width.
    pub fn height_for_width(&self, width: u32) -> u32 {
        ((width as f64 / self.ratio).round() as u32).max(1)
    }

    /// Recompute width after the user edits height.
    pub fn width_for_height(&self, height: u32) -> u32 {
        ((height as f64 * self.ratio).round() as u32).max(1)
    }
}

/// How the target dimensions for one pipeline invocation are determined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ResizeRequest {
    /// Pixel mode: one fixed target for the whole batch.
    Exact {
        width: u32,
        height: u32,
        /// When set and the target exceeds the original in *either* axis,
        /// both dimensions revert to the original size. The whole image is
        /// left unresized, not just the offending axis.
        do_not_enlarge: bool,
    },
    /// Percentage mode: computed per image, so differing source sizes get
    /// differently sized outputs at the same proportion.
    Percent { percent: f64 },
}

impl ResizeRequest {
    /// Resolve the target dimensions for a single source image.
    ///
    /// Always returns integer dimensions of at least 1 in each axis.
    pub fn target_for(&self, source_width: u32, source_height: u32) -> (u32, u32) {
        match *self {
            ResizeRequest::Exact {
                width,
                height,
                do_not_enlarge,
            } => {
                let width = width.max(1);
                let height = height.max(1);
                if do_not_enlarge && (width > source_width || height > source_height) {
                    (source_width.max(1), source_height.max(1))
                } else {
                    (width, height)
                }
            }
            ResizeRequest::Percent { percent } => {
                let width = (source_width as f64 * percent / 100.0).round() as u32;
                let height = (source_height as f64 * percent / 100.0).round() as u32;
                (width.max(1), height.max(1))
            }
        }
    }
}
