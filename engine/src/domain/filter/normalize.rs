//! Operand normalization
//!
//! Record values are stored as display strings, so numbers and dates are
//! parsed here into comparable forms. Anything unparsable becomes `None`,
//! which never matches.

use std::sync::OnceLock;

use regex::Regex;

/// Parse a `DD-MM-YYYY` date into `YYYYMMDD` as an integer.
///
/// The integer orders the same way the dates do. Only the shape and non-zero
/// components are checked; day and month ranges are not.
pub fn date_to_number(s: &str) -> Option<u32> {
    static RE_DATE: OnceLock<Regex> = OnceLock::new();
    let re = RE_DATE
        .get_or_init(|| Regex::new(r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$").expect("Invalid regex"));

    let caps = re.captures(s)?;
    let dd: u32 = caps[1].parse().ok()?;
    let mm: u32 = caps[2].parse().ok()?;
    let yyyy: u32 = caps[3].parse().ok()?;
    if dd == 0 || mm == 0 || yyyy == 0 {
        return None;
    }
    Some(yyyy * 10_000 + mm * 100 + dd)
}

/// Coerce a stored value to a finite number.
///
/// Surrounding whitespace is ignored and a blank string is zero.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_to_number() {
        assert_eq!(date_to_number("25-03-2024"), Some(20240325));
        assert_eq!(date_to_number("01-01-2025"), Some(20250101));
    }

    #[test]
    fn test_date_to_number_rejects_other_shapes() {
        assert_eq!(date_to_number("2024-03-25"), None);
        assert_eq!(date_to_number("5-3-2024"), None);
        assert_eq!(date_to_number("25/03/2024"), None);
        assert_eq!(date_to_number(" 25-03-2024"), None);
        assert_eq!(date_to_number(""), None);
    }

    #[test]
    fn test_date_to_number_rejects_zero_components() {
        assert_eq!(date_to_number("00-03-2024"), None);
        assert_eq!(date_to_number("25-00-2024"), None);
        assert_eq!(date_to_number("25-03-0000"), None);
    }

    #[test]
    fn test_date_to_number_rejects_non_ascii_digits() {
        assert_eq!(date_to_number("٢٥-03-2024"), None);
    }

    #[test]
    fn test_date_order() {
        assert!(date_to_number("01-01-2025") > date_to_number("31-12-2024"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("10"), Some(10.0));
        assert_eq!(parse_number(" 2.5 "), Some(2.5));
        assert_eq!(parse_number("-3e2"), Some(-300.0));
        assert_eq!(parse_number(""), Some(0.0));
        assert_eq!(parse_number("   "), Some(0.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
