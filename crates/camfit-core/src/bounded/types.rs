//! Constraint, result, and error types for bounded encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::EncodeError;

/// Errors surfaced by the bounded encoder.
#[derive(Debug, Error)]
pub enum BoundedEncodeError {
    /// The source raster is empty or its buffer disagrees with its dimensions.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A size bound, byte budget, or option is out of range.
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),

    /// The lossy encoder failed.
    #[error("Encoding failed at quality {quality}: {source}")]
    Encoding {
        quality: u8,
        #[source]
        source: EncodeError,
    },
}

/// Maximum output dimensions. Aspect ratio is preserved within this box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxSize {
    pub width: u32,
    pub height: u32,
}

impl MaxSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when `width x height` fits inside this box.
    pub fn contains(&self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }

    pub(crate) fn validate(&self) -> Result<(), BoundedEncodeError> {
        if self.width == 0 || self.height == 0 {
            return Err(BoundedEncodeError::InvalidConstraint(format!(
                "max size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// The outcome of a bounded encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResult {
    /// JPEG bytes owned by the caller.
    pub bytes: Vec<u8>,
    /// Width of the encoded image.
    pub width: u32,
    /// Height of the encoded image.
    pub height: u32,
    /// Quality the bytes were produced at.
    pub quality: u8,
    /// Whether `bytes.len()` is within the requested budget.
    pub budget_met: bool,
    /// Number of encoder invocations it took.
    pub attempts: u32,
}

impl EncodedResult {
    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the result, keeping only the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
