//! Decoding WASM bindings.

use crate::types::JsDecodedImage;
use camfit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG or PNG bytes, applying EXIF orientation.
///
/// ```typescript
/// const image = decode_image(new Uint8Array(await file.arrayBuffer()));
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
