//! Bounded encoding WASM bindings.
//!
//! # Functions
//!
//! - [`resize_image`] - fit a decoded raster to a size box and byte budget
//! - [`resize_image_with_options`] - same, with a plain-object options bag
//! - [`resize_encoded_bytes`] - decode captured bytes, then fit them
//!
//! # Example
//!
//! ```typescript
//! const result = resize_image_with_options(image, 1024, 768, 200_000, {
//!   initial_quality: 85,
//!   min_quality: 20,
//! });
//! if (!result.budget_met) {
//!   console.warn(`over budget: ${result.byte_length} bytes`);
//! }
//! ```

use crate::types::{JsDecodedImage, JsEncodedResult};
use camfit_core::{
    bounded, BoundedEncodeError, BoundedEncodeOptions, EncodedResult, MaxSize,
};
use wasm_bindgen::prelude::*;

/// Resize and compress a raster with default options.
#[wasm_bindgen]
pub fn resize_image(
    image: &JsDecodedImage,
    max_width: u32,
    max_height: u32,
    max_bytes: usize,
) -> Result<JsEncodedResult, JsValue> {
    bounded::resize_image(
        &image.to_decoded(),
        MaxSize::new(max_width, max_height),
        max_bytes,
    )
    .map(JsEncodedResult::from)
    .map_err(to_js_error)
}

/// Resize and compress a raster.
///
/// `options` may be `undefined`, `null`, or an object with any subset of
/// `initial_quality`, `min_quality`, `filter` (`"Nearest"`, `"Bilinear"`,
/// `"Lanczos3"`), `max_downscale_passes`, and `downscale_factor`.
#[wasm_bindgen]
pub fn resize_image_with_options(
    image: &JsDecodedImage,
    max_width: u32,
    max_height: u32,
    max_bytes: usize,
    options: JsValue,
) -> Result<JsEncodedResult, JsValue> {
    let options = parse_options(options)?;
    bounded::resize_image_with_options(
        &image.to_decoded(),
        MaxSize::new(max_width, max_height),
        max_bytes,
        &options,
    )
    .map(JsEncodedResult::from)
    .map_err(to_js_error)
}

/// Decode captured JPEG/PNG bytes (honoring EXIF orientation), then resize
/// and compress with default options.
#[wasm_bindgen]
pub fn resize_encoded_bytes(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
    max_bytes: usize,
) -> Result<JsEncodedResult, JsValue> {
    encoded_bytes(bytes, max_width, max_height, max_bytes)
        .map(JsEncodedResult::from)
        .map_err(to_js_error)
}

fn encoded_bytes(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
    max_bytes: usize,
) -> Result<EncodedResult, BoundedEncodeError> {
    bounded::resize_encoded(
        bytes,
        MaxSize::new(max_width, max_height),
        max_bytes,
        &BoundedEncodeOptions::default(),
    )
}

fn parse_options(value: JsValue) -> Result<BoundedEncodeOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(BoundedEncodeOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(err: BoundedEncodeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Tests that avoid `JsValue` and therefore run on native targets.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_bytes_fits_box() {
        let source =
            camfit_core::encode::encode_jpeg(&vec![140u8; 200 * 100 * 3], 200, 100, 90).unwrap();
        let result = encoded_bytes(&source, 100, 100, 100_000).unwrap();

        assert_eq!((result.width, result.height), (100, 50));
        assert!(result.budget_met);
    }

    #[test]
    fn test_encoded_bytes_rejects_zero_budget() {
        let source = camfit_core::encode::encode_jpeg(&[0u8; 3], 1, 1, 90).unwrap();
        assert!(matches!(
            encoded_bytes(&source, 10, 10, 0),
            Err(BoundedEncodeError::InvalidConstraint(_))
        ));
    }
}
