//! Checked and truncating float-to-pixel conversions

use crate::{Error, Result};

/// Safely convert f32 to i32 with bounds checking
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_precision_loss)] // MIN/MAX bounds checking is approximate
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f32_to_i32(value: f32) -> Result<i32> {
    if value.is_finite() && value >= i32::MIN as f32 && value <= i32::MAX as f32 {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Truncate an f32 coordinate toward zero for drawing.
///
/// Out-of-range values saturate and NaN maps to 0, so drawing code never fails
/// on a malformed coordinate.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn f32_to_pixel(value: f32) -> i32 {
    value as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_f32_to_i32() {
        assert_eq!(f32_to_i32(42.0).unwrap(), 42);
        assert_eq!(f32_to_i32(-42.7).unwrap(), -42);
        assert_eq!(f32_to_i32(0.0).unwrap(), 0);

        assert!(f32_to_i32(f32::INFINITY).is_err());
        assert!(f32_to_i32(f32::NEG_INFINITY).is_err());
        assert!(f32_to_i32(f32::NAN).is_err());
        assert!(f32_to_i32(i32::MAX as f32 * 2.0).is_err());
    }

    #[test]
    fn test_f32_to_pixel_truncates_toward_zero() {
        assert_eq!(f32_to_pixel(10.9), 10);
        assert_eq!(f32_to_pixel(-3.5), -3);
        assert_eq!(f32_to_pixel(f32::NAN), 0);
        assert_eq!(f32_to_pixel(f32::INFINITY), i32::MAX);
        assert_eq!(f32_to_pixel(f32::NEG_INFINITY), i32::MIN);
    }

    proptest! {
        #[test]
        fn prop_pixel_matches_checked_conversion(value in -1.0e6f32..1.0e6f32) {
            prop_assert_eq!(f32_to_pixel(value), f32_to_i32(value).unwrap());
        }
    }
}
