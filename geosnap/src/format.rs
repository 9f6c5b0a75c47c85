//! Numeric-to-text rules for snapshot display.
//!
//! Both rules render a fixed number of fractional digits and then strip
//! trailing zeros and a trailing decimal point, so `10.0` shows as `"10"` and
//! `1013.25` as `"1013.25"`. Output always uses `.` as decimal separator.

/// Fractional digits rendered for `f64` values.
const DOUBLE_FRACTION_DIGITS: i32 = 15;

/// Significant digits an `f64` carries reliably.
const DOUBLE_SIGNIFICANT_DIGITS: i32 = 15;

/// Fractional digits rendered for `f32` values.
const FLOAT_FRACTION_DIGITS: usize = 6;

/// Format a double with up to 15 fractional digits.
///
/// Digits past the 15th significant one are representation noise and are
/// rounded away, so `12.000000000000001` renders as `"12"`.
pub fn format_double(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let integer_digits = if value == 0.0 {
        0
    } else {
        value.abs().log10().floor() as i32 + 1
    };
    let decimals = (DOUBLE_SIGNIFICANT_DIGITS - integer_digits).clamp(0, DOUBLE_FRACTION_DIGITS);

    strip_trailing_zeros(format!("{:.*}", decimals as usize, value))
}

/// Format a float with up to 6 fractional digits.
pub fn format_float(value: f32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    strip_trailing_zeros(format!("{:.*}", FLOAT_FRACTION_DIGITS, value))
}

fn strip_trailing_zeros(mut text: String) -> String {
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_strips_representation_noise() {
        assert_eq!(format_double(12.000000000000001), "12");
    }

    #[test]
    fn test_double_keeps_significant_fraction() {
        assert_eq!(format_double(31.2), "31.2");
        assert_eq!(format_double(121.5), "121.5");
        assert_eq!(format_double(-33.9425), "-33.9425");
        assert_eq!(format_double(0.000123456), "0.000123456");
    }

    #[test]
    fn test_double_whole_numbers() {
        assert_eq!(format_double(10.0), "10");
        assert_eq!(format_double(0.0), "0");
        assert_eq!(format_double(-8848.0), "-8848");
        assert_eq!(format_double(1e20), "100000000000000000000");
    }

    #[test]
    fn test_double_sum_noise() {
        assert_eq!(format_double(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_float_rules() {
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(1013.25), "1013.25");
        assert_eq!(format_float(1000.0), "1000");
        assert_eq!(format_float(0.0000004), "0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_float(f32::INFINITY), "inf");
    }
}
