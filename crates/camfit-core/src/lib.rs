//! camfit core - bounded image re-encoding
//!
//! Resizes camera captures to a maximum width/height and compresses them to
//! fit a byte budget. The crate is split into:
//!
//! - `decode` - the RGB raster type, source decoding, and resampling
//! - `encode` - JPEG encoding at a given quality
//! - `bounded` - the size/budget search that ties the two together

pub mod bounded;
pub mod decode;
pub mod encode;

pub use bounded::{
    resize_encoded, resize_image, resize_image_with_options, BoundedEncodeError,
    BoundedEncodeOptions, BoundedEncoder, EncodedResult, MaxSize,
};
pub use decode::{DecodedImage, FilterType};
