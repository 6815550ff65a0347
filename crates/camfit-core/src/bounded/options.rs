//! Tunables for the quality search.

use serde::{Deserialize, Serialize};

use super::BoundedEncodeError;
use crate::decode::FilterType;
use crate::encode::{DEFAULT_JPEG_QUALITY, MAX_JPEG_QUALITY};

/// Default quality floor for the search.
pub const DEFAULT_MIN_QUALITY: u8 = 10;

/// Default per-pass shrink factor when dimension fallback is enabled.
pub const DEFAULT_DOWNSCALE_FACTOR: f32 = 0.75;

/// Options controlling how the bounded encoder trades quality for size.
///
/// Missing fields deserialize to their defaults, so JavaScript callers may
/// pass a partial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundedEncodeOptions {
    /// First quality tried (1-100).
    pub initial_quality: u8,
    /// Lowest quality the search will go to (1..=initial_quality).
    pub min_quality: u8,
    /// Filter used when the raster has to be resampled.
    pub filter: FilterType,
    /// How many times to shrink the raster when even `min_quality` is over
    /// budget. Zero keeps the dimensions fixed after the initial fit.
    pub max_downscale_passes: u8,
    /// Scale applied per shrink pass, in (0, 1).
    pub downscale_factor: f32,
}

impl Default for BoundedEncodeOptions {
    fn default() -> Self {
        Self {
            initial_quality: DEFAULT_JPEG_QUALITY,
            min_quality: DEFAULT_MIN_QUALITY,
            filter: FilterType::default(),
            max_downscale_passes: 0,
            downscale_factor: DEFAULT_DOWNSCALE_FACTOR,
        }
    }
}

impl BoundedEncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), BoundedEncodeError> {
        if self.min_quality == 0 {
            return Err(invalid("min_quality must be at least 1".to_string()));
        }
        if self.initial_quality > MAX_JPEG_QUALITY {
            return Err(invalid(format!(
                "initial_quality must be at most {MAX_JPEG_QUALITY}, got {}",
                self.initial_quality
            )));
        }
        if self.min_quality > self.initial_quality {
            return Err(invalid(format!(
                "min_quality ({}) exceeds initial_quality ({})",
                self.min_quality, self.initial_quality
            )));
        }
        if !(self.downscale_factor > 0.0 && self.downscale_factor < 1.0) {
            return Err(invalid(format!(
                "downscale_factor must be in (0, 1), got {}",
                self.downscale_factor
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> BoundedEncodeError {
    BoundedEncodeError::InvalidConstraint(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = BoundedEncodeOptions::new();
        assert!(options.validate().is_ok());
        assert_eq!(options.initial_quality, 90);
        assert_eq!(options.min_quality, 10);
        assert_eq!(options.max_downscale_passes, 0);
    }

    #[test]
    fn test_rejects_zero_floor() {
        let mut options = BoundedEncodeOptions::default();
        options.min_quality = 0;
        assert!(matches!(
            options.validate(),
            Err(BoundedEncodeError::InvalidConstraint(_))
        ));
    }

    #[test]
    fn test_rejects_quality_above_100() {
        let mut options = BoundedEncodeOptions::default();
        options.initial_quality = 101;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut options = BoundedEncodeOptions::default();
        options.initial_quality = 30;
        options.min_quality = 40;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_equal_bounds_are_valid() {
        let mut options = BoundedEncodeOptions::default();
        options.initial_quality = 50;
        options.min_quality = 50;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_downscale_factor() {
        for factor in [0.0, 1.0, -0.5, 1.5, f32::NAN] {
            let mut options = BoundedEncodeOptions::default();
            options.downscale_factor = factor;
            assert!(options.validate().is_err(), "factor {factor} accepted");
        }
    }
}
