//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i64 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Round a f64 and clamp it to the u32 range; negatives and NaN become 0.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let clamped = value.min(f64::from(u32::MAX)).round();
    cast::<f64, u32>(clamped).unwrap_or(u32::MAX)
}

/// Clamp an i64 score into the non-negative u32 range.
#[must_use]
pub fn clamp_i64_to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Ratio of two counts with the denominator floored at one.
#[must_use]
pub fn guarded_ratio(numerator: u32, denominator: u32) -> f64 {
    f64::from(numerator) / f64::from(denominator.max(1))
}

/// Convert a signed total to f64.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert an unsigned total to f64.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert a collection length to f64 for averaging.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Round to a single decimal place.
#[must_use]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_i64(1.6), 2);
        assert_eq!(round_f64_to_i64(f64::NAN), 0);
        assert_eq!(round_f64_to_u32(-4.2), 0);
        assert_eq!(round_f64_to_u32(29.5), 30);
        assert_eq!(round_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn guarded_ratio_never_divides_by_zero() {
        assert!((guarded_ratio(5, 0) - 5.0).abs() < f64::EPSILON);
        assert!((guarded_ratio(1, 4) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn clamp_drops_negative_scores() {
        assert_eq!(clamp_i64_to_u32(-12), 0);
        assert_eq!(clamp_i64_to_u32(323), 323);
    }

    #[test]
    fn tenths_round_half_up_for_positive_values() {
        assert!((round_tenths(74.96) - 75.0).abs() < f64::EPSILON);
        assert!((round_tenths(33.34) - 33.3).abs() < 1e-9);
    }
}
