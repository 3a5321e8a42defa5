//! Per-user rates and the aggregate book rating.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::validation::ValidationErrors;

pub const RATE_MIN: i64 = 1;
pub const RATE_MAX: i64 = 5;

/// Fractional digits kept on a stored rating.
pub const RATING_DECIMAL_PLACES: u32 = 2;

/// Check a requested rate against the 1–5 scale.
///
/// Returns the value narrowed to the storage type, or records a `rate` error.
pub fn validate_rate(rate: i64, errors: &mut ValidationErrors) -> Option<i16> {
    if !(RATE_MIN..=RATE_MAX).contains(&rate) {
        errors.add(
            "rate",
            format!("Ensure this value is between {RATE_MIN} and {RATE_MAX}."),
        );
        return None;
    }
    i16::try_from(rate).ok()
}

/// Round a mean rate the way the `numeric(3,2)` column stores it.
pub fn round_rating(mean: Decimal) -> Decimal {
    mean.round_dp_with_strategy(RATING_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
