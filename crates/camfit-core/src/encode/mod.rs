//! Lossy encoding primitive.
//!
//! Output is always baseline JPEG produced by the `image` crate. The bounded
//! encoder in [`crate::bounded`] drives this with decreasing quality values.

mod jpeg;

pub use jpeg::{
    clamp_quality, encode_jpeg, encode_jpeg_image, EncodeError, DEFAULT_JPEG_QUALITY,
    MAX_JPEG_QUALITY, MIN_JPEG_QUALITY,
};
