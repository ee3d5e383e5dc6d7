//! String utility functions

/// Parse dropdown options that may be a JSON array or comma-separated values.
///
/// Handles:
/// - JSON arrays: `["Red", "Green"]`
/// - Comma-separated: `Red, Green`
/// - Malformed JSON arrays: falls back to comma splitting
pub fn parse_option_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<String>>(trimmed)
            .map(|items| clean_options(items.iter().map(String::as_str)))
            .unwrap_or_else(|_| {
                clean_options(
                    trimmed
                        .trim_matches(|c| c == '[' || c == ']')
                        .split(',')
                        .map(|s| s.trim().trim_matches('"')),
                )
            })
    } else {
        clean_options(trimmed.split(','))
    }
}

/// Trim each option and drop empty ones, preserving order
pub fn clean_options<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    items
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive equality (Unicode lowercase folding)
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test. An empty needle is contained in everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive prefix test. An empty prefix matches everything.
pub fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.to_lowercase().starts_with(&prefix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option_list_comma_separated() {
        assert_eq!(parse_option_list("Red, Green ,Blue"), vec!["Red", "Green", "Blue"]);
        assert_eq!(parse_option_list("Red,,Blue,"), vec!["Red", "Blue"]);
        assert!(parse_option_list("   ").is_empty());
    }

    #[test]
    fn test_parse_option_list_json_array() {
        assert_eq!(parse_option_list(r#"["Red", " Green "]"#), vec!["Red", "Green"]);
    }

    #[test]
    fn test_parse_option_list_malformed_json_falls_back() {
        assert_eq!(parse_option_list(r#"["Red", "Green""#), vec!["Red", "Green"]);
    }

    #[test]
    fn test_ignore_case_helpers() {
        assert!(eq_ignore_case("Red", "rED"));
        assert!(!eq_ignore_case("Red", "Green"));
        assert!(contains_ignore_case("Hello World", "WORLD"));
        assert!(contains_ignore_case("anything", ""));
        assert!(starts_with_ignore_case("Brisbane CBD", "bris"));
        assert!(!starts_with_ignore_case("Brisbane CBD", "cbd"));
    }

    #[test]
    fn test_ignore_case_unicode() {
        assert!(eq_ignore_case("ÉCOLE", "école"));
        assert!(contains_ignore_case("Straße NORD", "nord"));
    }
}
