//! Bounded image encoding.
//!
//! Resizes a raster to fit a maximum width/height and compresses it to fit a
//! byte budget:
//!
//! 1. Downscale (never upscale) to fit [`MaxSize`], preserving aspect ratio.
//! 2. Encode at `initial_quality`.
//! 3. If over budget, binary-search quality down to `min_quality`.
//! 4. Optionally shrink the raster further and repeat.
//! 5. If nothing fits, return the smallest encoding with `budget_met = false`.
//!
//! # Examples
//!
//! ```ignore
//! use camfit_core::bounded::{resize_image, MaxSize};
//!
//! let result = resize_image(&image, MaxSize::new(1024, 768), 200_000)?;
//! if !result.budget_met {
//!     eprintln!("closest we got: {} bytes", result.len());
//! }
//! ```

mod encoder;
mod options;
mod types;

pub use encoder::{
    resize_encoded, resize_image, resize_image_with_options, BoundedEncoder, ImageResampler,
    JpegEncoder, LossyEncoder, Resampler,
};
pub use options::{BoundedEncodeOptions, DEFAULT_DOWNSCALE_FACTOR, DEFAULT_MIN_QUALITY};
pub use types::{BoundedEncodeError, EncodedResult, MaxSize};
