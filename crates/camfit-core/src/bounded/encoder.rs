//! The bounded encoder: fit, encode, then trade quality for size.
//!
//! Resampling and lossy encoding sit behind the [`Resampler`] and
//! [`LossyEncoder`] traits so the search can be exercised without a real
//! codec.

use std::borrow::Cow;

use tracing::{debug, trace, warn};

use super::{BoundedEncodeError, BoundedEncodeOptions, EncodedResult, MaxSize};
use crate::decode::{self, fit_within, DecodeError, DecodedImage, FilterType};
use crate::encode::{self, EncodeError};

/// Resizes a raster to exact dimensions.
pub trait Resampler {
    fn resample(
        &self,
        image: &DecodedImage,
        width: u32,
        height: u32,
    ) -> Result<DecodedImage, DecodeError>;
}

/// Encodes a raster at a given quality.
pub trait LossyEncoder {
    fn encode(&self, image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError>;
}

/// [`Resampler`] backed by `image::imageops::resize`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageResampler {
    pub filter: FilterType,
}

impl Resampler for ImageResampler {
    fn resample(
        &self,
        image: &DecodedImage,
        width: u32,
        height: u32,
    ) -> Result<DecodedImage, DecodeError> {
        decode::resample(image, width, height, self.filter)
    }
}

/// [`LossyEncoder`] producing baseline JPEG.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegEncoder;

impl LossyEncoder for JpegEncoder {
    fn encode(&self, image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
        encode::encode_jpeg_image(image, quality)
    }
}

/// An encoding produced during the search.
struct Candidate {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    quality: u8,
}

enum SearchOutcome {
    /// Highest quality found that fits the budget.
    Fit(Candidate),
    /// Nothing fit; the smallest encoding seen.
    Over(Candidate),
}

/// Stateless service that resizes and compresses images to fit a size box
/// and a byte budget.
///
/// The encoder holds no per-call state and can be shared across threads
/// when its collaborators can.
#[derive(Debug, Clone)]
pub struct BoundedEncoder<R = ImageResampler, E = JpegEncoder> {
    resampler: R,
    encoder: E,
    options: BoundedEncodeOptions,
}

impl Default for BoundedEncoder {
    fn default() -> Self {
        Self::with_options(BoundedEncodeOptions::default())
    }
}

impl BoundedEncoder {
    /// Create an encoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder using the `image` crate collaborators.
    pub fn with_options(options: BoundedEncodeOptions) -> Self {
        Self {
            resampler: ImageResampler {
                filter: options.filter,
            },
            encoder: JpegEncoder,
            options,
        }
    }
}

impl<R: Resampler, E: LossyEncoder> BoundedEncoder<R, E> {
    /// Create an encoder from custom collaborators.
    ///
    /// `options.filter` is ignored here; the resampler decides how to filter.
    pub fn from_parts(resampler: R, encoder: E, options: BoundedEncodeOptions) -> Self {
        Self {
            resampler,
            encoder,
            options,
        }
    }

    pub fn options(&self) -> &BoundedEncodeOptions {
        &self.options
    }

    /// Resize `image` to fit `max_size` and encode it under `max_bytes`.
    ///
    /// When no quality down to `min_quality` (and no enabled downscale pass)
    /// fits the budget, the smallest encoding observed is returned with
    /// `budget_met == false` rather than an error.
    ///
    /// # Errors
    ///
    /// * `InvalidImage` - empty raster or mismatched pixel buffer
    /// * `InvalidConstraint` - zero size bound, zero budget, or bad options
    /// * `Encoding` - the encoder failed; no partial result is returned
    pub fn encode(
        &self,
        image: &DecodedImage,
        max_size: MaxSize,
        max_bytes: usize,
    ) -> Result<EncodedResult, BoundedEncodeError> {
        validate_image(image)?;
        max_size.validate()?;
        if max_bytes == 0 {
            return Err(BoundedEncodeError::InvalidConstraint(
                "max_bytes must be positive".to_string(),
            ));
        }
        self.options.validate()?;

        let (width, height) = fit_within(image.width, image.height, max_size.width, max_size.height);
        debug_assert!(max_size.contains(width, height));
        debug!(
            src_width = image.width,
            src_height = image.height,
            width,
            height,
            max_bytes,
            "fitting image into bounds"
        );

        let mut working = self.resampled(image, width, height)?;
        let mut attempts = 0u32;

        let mut smallest = match self.search(&working, max_bytes, &mut attempts)? {
            SearchOutcome::Fit(candidate) => return Ok(finish(candidate, true, attempts)),
            SearchOutcome::Over(candidate) => candidate,
        };

        for pass in 1..=self.options.max_downscale_passes {
            let factor = f64::from(self.options.downscale_factor);
            let next_width = ((working.width as f64 * factor).round() as u32).max(1);
            let next_height = ((working.height as f64 * factor).round() as u32).max(1);
            if (next_width, next_height) == (working.width, working.height) {
                break;
            }

            debug!(pass, next_width, next_height, "downscaling to meet byte budget");
            // Always resample from the source to avoid compounding filter loss
            working = self.resampled(image, next_width, next_height)?;

            match self.search(&working, max_bytes, &mut attempts)? {
                SearchOutcome::Fit(candidate) => return Ok(finish(candidate, true, attempts)),
                SearchOutcome::Over(candidate) => {
                    // Ties go to the smaller raster
                    if candidate.bytes.len() <= smallest.bytes.len() {
                        smallest = candidate;
                    }
                }
            }
        }

        warn!(
            max_bytes,
            smallest = smallest.bytes.len(),
            quality = smallest.quality,
            "byte budget unreachable, returning smallest encoding"
        );
        Ok(finish(smallest, false, attempts))
    }

    fn resampled<'a>(
        &self,
        image: &'a DecodedImage,
        width: u32,
        height: u32,
    ) -> Result<Cow<'a, DecodedImage>, BoundedEncodeError> {
        if (width, height) == (image.width, image.height) {
            return Ok(Cow::Borrowed(image));
        }
        self.resampler
            .resample(image, width, height)
            .map(Cow::Owned)
            .map_err(|e| BoundedEncodeError::InvalidImage(e.to_string()))
    }

    /// Binary search over `[min_quality, initial_quality]` for the highest
    /// quality whose encoding fits.
    fn search(
        &self,
        raster: &DecodedImage,
        max_bytes: usize,
        attempts: &mut u32,
    ) -> Result<SearchOutcome, BoundedEncodeError> {
        let initial = self.options.initial_quality;
        let first = self.attempt(raster, initial, attempts)?;
        if first.bytes.len() <= max_bytes {
            return Ok(SearchOutcome::Fit(first));
        }

        let mut smallest = first;
        let mut best: Option<Candidate> = None;
        // Half-open range: `initial` is already known to be over budget
        let (mut lo, mut hi) = (self.options.min_quality, initial);

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let candidate = self.attempt(raster, mid, attempts)?;

            if candidate.bytes.len() <= max_bytes {
                lo = mid + 1;
                best = Some(candidate);
            } else {
                hi = mid;
                if candidate.bytes.len() < smallest.bytes.len() {
                    smallest = candidate;
                }
            }
        }

        Ok(match best {
            Some(candidate) => SearchOutcome::Fit(candidate),
            None => SearchOutcome::Over(smallest),
        })
    }

    fn attempt(
        &self,
        raster: &DecodedImage,
        quality: u8,
        attempts: &mut u32,
    ) -> Result<Candidate, BoundedEncodeError> {
        *attempts += 1;
        let bytes = self
            .encoder
            .encode(raster, quality)
            .map_err(|source| BoundedEncodeError::Encoding { quality, source })?;
        trace!(quality, size = bytes.len(), "encode attempt");

        Ok(Candidate {
            bytes,
            width: raster.width,
            height: raster.height,
            quality,
        })
    }
}

fn validate_image(image: &DecodedImage) -> Result<(), BoundedEncodeError> {
    if image.is_empty() {
        return Err(BoundedEncodeError::InvalidImage(format!(
            "image is empty ({}x{}, {} bytes)",
            image.width,
            image.height,
            image.byte_size()
        )));
    }
    match image.expected_len() {
        Some(expected) if expected == image.byte_size() => Ok(()),
        Some(expected) => Err(BoundedEncodeError::InvalidImage(format!(
            "pixel buffer is {} bytes, expected {}",
            image.byte_size(),
            expected
        ))),
        None => Err(BoundedEncodeError::InvalidImage(format!(
            "dimensions {}x{} are too large",
            image.width, image.height
        ))),
    }
}

fn finish(candidate: Candidate, budget_met: bool, attempts: u32) -> EncodedResult {
    debug!(
        width = candidate.width,
        height = candidate.height,
        quality = candidate.quality,
        size = candidate.bytes.len(),
        budget_met,
        attempts,
        "bounded encode finished"
    );
    EncodedResult {
        bytes: candidate.bytes,
        width: candidate.width,
        height: candidate.height,
        quality: candidate.quality,
        budget_met,
        attempts,
    }
}

/// Resize and compress with default options.
///
/// # Example
///
/// ```ignore
/// use camfit_core::{resize_image, MaxSize};
///
/// let result = resize_image(&image, MaxSize::new(1024, 768), 200_000)?;
/// assert!(result.width <= 1024 && result.height <= 768);
/// ```
pub fn resize_image(
    image: &DecodedImage,
    max_size: MaxSize,
    max_bytes: usize,
) -> Result<EncodedResult, BoundedEncodeError> {
    BoundedEncoder::new().encode(image, max_size, max_bytes)
}

/// Resize and compress with explicit options.
pub fn resize_image_with_options(
    image: &DecodedImage,
    max_size: MaxSize,
    max_bytes: usize,
    options: &BoundedEncodeOptions,
) -> Result<EncodedResult, BoundedEncodeError> {
    BoundedEncoder::with_options(options.clone()).encode(image, max_size, max_bytes)
}

/// Decode captured bytes (honoring EXIF orientation), then resize and compress.
///
/// Bytes that cannot be decoded are reported as `InvalidImage`.
pub fn resize_encoded(
    bytes: &[u8],
    max_size: MaxSize,
    max_bytes: usize,
    options: &BoundedEncodeOptions,
) -> Result<EncodedResult, BoundedEncodeError> {
    let image =
        decode::decode_image(bytes).map_err(|e| BoundedEncodeError::InvalidImage(e.to_string()))?;
    resize_image_with_options(&image, max_size, max_bytes, options)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    struct LinearSize(usize);

    impl LossyEncoder for LinearSize {
        fn encode(&self, _image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
            Ok(vec![0u8; quality as usize * self.0])
        }
    }

    fn flat(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![90u8; width as usize * height as usize * 3])
    }

    proptest! {
        /// Property: with a size that grows with quality, the search lands on
        /// the highest fitting quality, and reports misses only when even the
        /// floor is over budget.
        #[test]
        fn prop_budget_met_iff_floor_fits(
            per_quality in 1usize..=500,
            max_bytes in 1usize..=60_000,
            min_quality in 1u8..=50,
            initial_quality in 50u8..=100,
        ) {
            let mut options = BoundedEncodeOptions::default();
            options.min_quality = min_quality;
            options.initial_quality = initial_quality;
            let encoder = BoundedEncoder::from_parts(
                ImageResampler::default(),
                LinearSize(per_quality),
                options,
            );

            let result = encoder.encode(&flat(2, 2), MaxSize::new(2, 2), max_bytes).unwrap();
            let floor_fits = min_quality as usize * per_quality <= max_bytes;

            prop_assert_eq!(result.budget_met, floor_fits);
            if result.budget_met {
                prop_assert!(result.len() <= max_bytes);
                let expected = (max_bytes / per_quality).min(initial_quality as usize);
                prop_assert_eq!(result.quality as usize, expected);
            } else {
                prop_assert_eq!(result.quality, min_quality);
            }
        }

        /// Property: real encodes never exceed the size box and never upscale.
        #[test]
        fn prop_output_within_bounds(
            width in 1u32..=48,
            height in 1u32..=48,
            max_width in 1u32..=32,
            max_height in 1u32..=32,
        ) {
            let result = resize_image(
                &flat(width, height),
                MaxSize::new(max_width, max_height),
                1_000_000,
            ).unwrap();

            prop_assert!(result.width <= max_width && result.height <= max_height);
            prop_assert!(result.width <= width && result.height <= height);
            prop_assert!(result.budget_met);
        }
    }
}
