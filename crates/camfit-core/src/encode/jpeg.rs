//! JPEG encoding at a caller-chosen quality.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::{rgb_len, DecodedImage};

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Minimum allowed JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum allowed JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero, or the buffer size overflows
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder rejected the image
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Clamp quality to the valid 1-100 range.
#[inline]
pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero edge,
/// `EncodeError::InvalidPixelData` when the buffer length is wrong, and
/// `EncodeError::EncodingFailed` if the encoder itself fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected =
        rgb_len(width, height).ok_or(EncodeError::InvalidDimensions { width, height })?;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut output = Vec::new();
    JpegEncoder::new_with_quality(&mut output, clamp_quality(quality))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(output)
}

/// Encode a [`DecodedImage`] to JPEG bytes.
pub fn encode_jpeg_image(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&image.pixels, image.width, image.height, quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(((x ^ y) & 0xFF) as u8);
            }
        }
        pixels
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_jpeg(&vec![128u8; 64 * 64 * 3], 64, 64, 90).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_lower_quality_is_smaller_for_detailed_image() {
        let pixels = gradient(128, 128);

        let low = encode_jpeg(&pixels, 128, 128, 10).unwrap();
        let high = encode_jpeg(&pixels, 128, 128, 95).unwrap();

        assert!(low.len() < high.len(), "low={} high={}", low.len(), high.len());
    }

    #[test]
    fn test_clamp_quality() {
        assert_eq!(clamp_quality(0), 1);
        assert_eq!(clamp_quality(50), 50);
        assert_eq!(clamp_quality(255), 100);
    }

    #[test]
    fn test_encode_out_of_range_quality_is_clamped() {
        let pixels = vec![128u8; 10 * 10 * 3];

        assert_eq!(
            encode_jpeg(&pixels, 10, 10, 0).unwrap(),
            encode_jpeg(&pixels, 10, 10, 1).unwrap()
        );
        assert_eq!(
            encode_jpeg(&pixels, 10, 10, 255).unwrap(),
            encode_jpeg(&pixels, 10, 10, 100).unwrap()
        );
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let short = vec![128u8; 99 * 100 * 3];
        assert!(matches!(
            encode_jpeg(&short, 100, 100, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));

        let long = vec![128u8; 101 * 100 * 3];
        assert!(matches!(
            encode_jpeg(&long, 100, 100, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 100, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 100, 0, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_oversized_dimensions() {
        assert!(matches!(
            encode_jpeg(&[0u8; 3], u32::MAX, u32::MAX, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_image() {
        let image = DecodedImage::new(1, 1, vec![255, 0, 0]);
        let jpeg = encode_jpeg_image(&image, DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::InvalidPixelData {
            expected: 12,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pixel data: expected 12 bytes (width * height * 3), got 3"
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
