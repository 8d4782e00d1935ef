//! Capacity policy: how much of the workforce may be away at once.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default share of headcount allowed on leave simultaneously.
pub const DEFAULT_MAX_CONCURRENT_PERCENTAGE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// A concurrency cap expressed as a percentage of total headcount.
///
/// # Example
///
/// ```
/// use leave_engine::models::CapacityPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = CapacityPolicy::new(Decimal::from(30)).unwrap();
/// assert_eq!(policy.threshold(10), 3);
/// assert_eq!(policy.threshold(2), 1); // floor(0.6) clamps up to 1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityPolicy {
    /// Percentage of headcount (0 to 100) that may be on leave together.
    pub max_concurrent_percentage: Decimal,
}

impl CapacityPolicy {
    /// Creates a validated policy.
    pub fn new(max_concurrent_percentage: Decimal) -> EngineResult<Self> {
        let policy = Self {
            max_concurrent_percentage,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Checks the percentage lies within 0..=100.
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_concurrent_percentage < Decimal::ZERO
            || self.max_concurrent_percentage > Decimal::ONE_HUNDRED
        {
            return Err(EngineError::InvalidPolicy {
                message: format!(
                    "max_concurrent_percentage must be between 0 and 100, got {}",
                    self.max_concurrent_percentage
                ),
            });
        }
        Ok(())
    }

    /// The maximum number of employees allowed away on the same day.
    ///
    /// `floor(headcount * percentage / 100)`, never less than 1.
    pub fn threshold(&self, headcount: usize) -> usize {
        let raw = (Decimal::from(headcount as u64) * self.max_concurrent_percentage
            / Decimal::ONE_HUNDRED)
            .floor();
        raw.to_usize().unwrap_or(0).max(1)
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            max_concurrent_percentage: DEFAULT_MAX_CONCURRENT_PERCENTAGE,
        }
    }
}
