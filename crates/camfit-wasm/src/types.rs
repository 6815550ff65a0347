//! WASM-compatible wrapper types.
//!
//! These wrap the core camfit types and handle the conversion between Rust
//! and JavaScript data representations.

use camfit_core::{DecodedImage, EncodedResult};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A decoded RGB raster for JavaScript.
///
/// Pixel data lives in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a raster from dimensions and RGB pixel data (3 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage. Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// The output of a bounded encode, for JavaScript.
#[wasm_bindgen]
pub struct JsEncodedResult {
    inner: EncodedResult,
}

/// Plain-object summary of an encode, without the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct EncodeSummary {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub budget_met: bool,
    pub attempts: u32,
    pub byte_length: usize,
}

#[wasm_bindgen]
impl JsEncodedResult {
    /// JPEG bytes as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// JPEG bytes as Uint8Array, releasing the result without a copy.
    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_bytes()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> u8 {
        self.inner.quality
    }

    /// False when even the smallest encoding is over budget.
    #[wasm_bindgen(getter)]
    pub fn budget_met(&self) -> bool {
        self.inner.budget_met
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.attempts
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    /// Everything except the bytes, as a plain object.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.to_summary())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsEncodedResult {
    pub(crate) fn to_summary(&self) -> EncodeSummary {
        EncodeSummary {
            width: self.inner.width,
            height: self.inner.height,
            quality: self.inner.quality,
            budget_met: self.inner.budget_met,
            attempts: self.inner.attempts,
            byte_length: self.inner.len(),
        }
    }
}

impl From<EncodedResult> for JsEncodedResult {
    fn from(inner: EncodedResult) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_roundtrip() {
        let decoded = DecodedImage::new(20, 10, vec![7u8; 20 * 10 * 3]);
        let js_img = JsDecodedImage::from_decoded(decoded);
        assert_eq!(js_img.width(), 20);
        assert_eq!(js_img.height(), 10);
        assert_eq!(js_img.byte_length(), 600);

        let back = js_img.to_decoded();
        assert_eq!(back.pixels, vec![7u8; 600]);
    }

    #[test]
    fn test_encoded_result_accessors() {
        let result = JsEncodedResult::from(EncodedResult {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 4,
            height: 3,
            quality: 55,
            budget_met: false,
            attempts: 7,
        });

        assert_eq!(result.bytes(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(result.byte_length(), 4);
        assert!(!result.budget_met());
        assert_eq!(
            result.to_summary(),
            EncodeSummary {
                width: 4,
                height: 3,
                quality: 55,
                budget_met: false,
                attempts: 7,
                byte_length: 4,
            }
        );
        assert_eq!(result.into_bytes(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }
}
