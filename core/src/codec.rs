//! Packing of (edge type, quantized weight) pairs into a single `u16`.
//!
//! A packed value is `type_index * (precision + 1) + round(weight * precision)`.
//! With `type_count` types the largest code is `type_count * (precision + 1) - 1`,
//! so construction fails unless `type_count * (precision + 1) <= 65536`.

use crate::error::{GraphError, Result};

/// Packed edge type and quantized weight.
pub type TypeWeight = u16;

/// Number of distinct packed states a `u16` can hold.
pub const PACKED_STATES: u64 = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeWeightCodec {
    precision: u32,
}

impl TypeWeightCodec {
    /// Build a codec for `type_count` edge types, validating the packing range.
    pub fn new(precision: u32, type_count: usize) -> Result<Self> {
        if precision <= 1 {
            return Err(GraphError::InvalidConfig(format!(
                "precision must be bigger than 1, got {}",
                precision
            )));
        }
        if type_count == 0 {
            return Err(GraphError::InvalidConfig(
                "at least one edge type is required".to_string(),
            ));
        }
        Self::check_overflow(precision, type_count)?;
        Ok(Self { precision })
    }

    /// Fails when `type_count * (precision + 1)` states do not fit in 16 bits.
    pub fn check_overflow(precision: u32, type_count: usize) -> Result<()> {
        let states = (type_count as u64).saturating_mul(precision as u64 + 1);
        if states > PACKED_STATES {
            return Err(GraphError::Overflow {
                precision,
                type_count,
            });
        }
        Ok(())
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Nearest multiple of `1 / precision`.
    pub fn round_to_precision(&self, weight: f64) -> f64 {
        (weight * self.precision as f64).round() / self.precision as f64
    }

    /// Pack a type index and a weight from `[0, 1]`.
    ///
    /// Callers validate both inputs; the codec only quantizes.
    pub fn compress(&self, type_index: u16, weight: f64) -> TypeWeight {
        let w = (weight * self.precision as f64).round() as u32;
        let packed = type_index as u32 * (self.precision + 1) + w;
        debug_assert!(packed < PACKED_STATES as u32, "packed value out of range");
        packed as TypeWeight
    }

    pub fn extract_type(&self, value: TypeWeight) -> u16 {
        (value as u32 / (self.precision + 1)) as u16
    }

    pub fn extract_weight(&self, value: TypeWeight) -> f64 {
        (value as u32 % (self.precision + 1)) as f64 / self.precision as f64
    }
}
