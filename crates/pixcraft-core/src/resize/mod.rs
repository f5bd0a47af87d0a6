//! Resizing stage: dimension policy plus high-quality resampling.
//!
//! The split mirrors where decisions are made in the app: the *policy*
//! (aspect lock, percentage mode, do-not-enlarge) belongs to the caller
//! configuring a batch, while the *resampler* only ever sees final integer
//! dimensions.

mod policy;
mod resample;

pub use policy::{AspectLock, ResizeRequest};
pub use resample::{resample, thumbnail, ResizeError};
