//! camfit WASM - WebAssembly bindings for camfit
//!
//! Exposes bounded image encoding to the JavaScript camera layer.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for rasters and encode results
//! - `decode` - decoding captured bytes into rasters
//! - `bounded` - resize-and-compress to a size box and byte budget
//!
//! # Usage
//!
//! ```typescript
//! import init, { resize_encoded_bytes } from '@camfit/wasm';
//!
//! await init();
//!
//! const capture = new Uint8Array(await blob.arrayBuffer());
//! const result = resize_encoded_bytes(capture, 1024, 768, 200_000);
//! console.log(`${result.width}x${result.height}, ${result.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod bounded;
mod decode;
mod types;

pub use bounded::{resize_encoded_bytes, resize_image, resize_image_with_options};
pub use decode::decode_image;
pub use types::{JsDecodedImage, JsEncodedResult};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
