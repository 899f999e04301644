//! # Number Formatting
//!
//! Every value that reaches the display goes through here. The rendering
//! rules match what a browser prints for a double: integers have no
//! trailing `.0`, very large or very small magnitudes switch to exponent
//! form, and `-0` prints as `0`.

/// Significant digits kept when an evaluation result is displayed.
pub const RESULT_SIGNIFICANT_DIGITS: usize = 12;

/// Decimal places kept when a scientific function result is displayed.
pub const FUNCTION_DECIMAL_PLACES: usize = 10;

/// Render a value for the display.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }

    format!("{value}")
}

/// Round to `digits` significant digits. Non-finite values and zero pass through.
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let precision = digits.max(1) - 1;
    format!("{value:.precision$e}").parse().unwrap_or(value)
}

/// Round to `places` digits after the decimal point.
pub fn round_decimals(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Parse display text back into a value. Unparseable text is `NaN`.
pub fn parse_operand(text: &str) -> f64 {
    text.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_have_no_fraction() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_fractions_use_shortest_form() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_exponent_form_for_extremes() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123456789012.0), "123456789012");
    }

    #[test]
    fn test_non_finite_labels() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_round_significant_suppresses_noise() {
        let value = round_significant(0.1 + 0.2, RESULT_SIGNIFICANT_DIGITS);
        assert_eq!(format_number(value), "0.3");
        assert_eq!(round_significant(0.0, 12), 0.0);
        assert!(round_significant(f64::NAN, 12).is_nan());
    }

    #[test]
    fn test_round_decimals() {
        let value = round_decimals(1.2246467991473532e-16, FUNCTION_DECIMAL_PLACES);
        assert_eq!(format_number(value), "0");
        assert_eq!(round_decimals(0.99999999999, FUNCTION_DECIMAL_PLACES), 1.0);
    }

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse_operand("0."), 0.0);
        assert_eq!(parse_operand("12.5"), 12.5);
        assert!(parse_operand("-").is_nan());
    }
}
