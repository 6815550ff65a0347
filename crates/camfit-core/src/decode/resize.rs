//! Resampling primitives used before re-encoding.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero-sized target and
/// `DecodeError::CorruptedFile` if the source buffer does not match its
/// stated dimensions.
pub fn resample(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Compute the largest dimensions that fit inside `max_width` x `max_height`
/// while preserving the source aspect ratio.
///
/// Never upscales: a source that already fits is returned unchanged. Each
/// output edge is clamped to `[1, max]`.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return (0, 0);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);

    (new_width, new_height)
}

/// Resize an image so it fits inside a bounding box, preserving aspect ratio.
///
/// Images that already fit are returned unchanged.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either bound is zero.
pub fn resize_to_bounds(
    image: &DecodedImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_width,
            height: max_height,
        });
    }

    let (new_width, new_height) = fit_within(image.width, image.height, max_width, max_height);
    resample(image, new_width, new_height, filter)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
