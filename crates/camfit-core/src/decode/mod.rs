//! Raster model, source decoding, and resampling.
//!
//! This module provides functionality for:
//! - Decoding captured JPEG/PNG bytes with EXIF orientation correction
//! - Resampling rasters to exact or bounded dimensions
//!
//! # Examples
//!
//! ```ignore
//! use camfit_core::decode::{decode_image, resize_to_bounds, FilterType};
//!
//! let bytes = std::fs::read("capture.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let preview = resize_to_bounds(&image, 1024, 768, FilterType::Bilinear).unwrap();
//! println!("{}x{}", preview.width, preview.height);
//! ```

mod bytes;
mod resize;
mod types;

pub use bytes::{decode_image, decode_image_no_orientation, get_orientation};
pub use resize::{fit_within, resample, resize_to_bounds};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
pub(crate) use types::rgb_len;
