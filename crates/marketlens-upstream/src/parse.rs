//! Lenient number parsing for upstream price and rating strings.
//!
//! Manual byte scanning rather than `regex`: the grammar is a single
//! decimal literal at the start of the string.

/// Parses the longest decimal literal at the start of `raw`, ignoring
/// leading whitespace and anything after the literal.
///
/// `"9.99"` → `9.99`, `" 120 INR/Piece"` → `120.0`, `".5kg"` → `0.5`,
/// `"1e3"` → `1000.0`, `"Rs. 40"` → `None`.
#[must_use]
pub(crate) fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A lone "." with no digits on either side is not a number.
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parses `raw` as a number only when the whole trimmed string is one.
#[must_use]
pub(crate) fn parse_exact_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimal() {
        assert_eq!(parse_leading_float("9.99"), Some(9.99));
    }

    #[test]
    fn ignores_trailing_text() {
        assert_eq!(parse_leading_float(" 120 INR/Piece"), Some(120.0));
        assert_eq!(parse_leading_float("45.50/kg"), Some(45.5));
    }

    #[test]
    fn accepts_leading_dot_and_trailing_dot() {
        assert_eq!(parse_leading_float(".5kg"), Some(0.5));
        assert_eq!(parse_leading_float("7."), Some(7.0));
    }

    #[test]
    fn accepts_sign() {
        assert_eq!(parse_leading_float("-3"), Some(-3.0));
        assert_eq!(parse_leading_float("+2.5"), Some(2.5));
    }

    #[test]
    fn exponent_requires_digits() {
        assert_eq!(parse_leading_float("1e3"), Some(1000.0));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
        assert_eq!(parse_leading_float("2e+"), Some(2.0));
    }

    #[test]
    fn rejects_non_numeric_prefix() {
        assert_eq!(parse_leading_float("Rs. 40"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("NaN"), None);
    }

    #[test]
    fn exact_float_requires_whole_string() {
        assert_eq!(parse_exact_float(" 4.5 "), Some(4.5));
        assert_eq!(parse_exact_float("4.5 stars"), None);
        assert_eq!(parse_exact_float("inf"), None);
    }
}
