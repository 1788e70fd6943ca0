//! Pattern sanitization for substring filters

/// Escape every pattern metacharacter so the value matches literally.
pub fn escape_pattern_metachars(value: &str) -> String {
    regex::escape(value)
}

/// Wrap a literal value into an unanchored substring pattern.
pub fn substring_pattern(value: &str) -> String {
    format!(".*{}.*", escape_pattern_metachars(value))
}

/// Build a lookahead pattern that requires every whitespace-separated token
/// to appear somewhere in the field, in any order.
///
/// Blank input yields an empty pattern, which matches everything.
pub fn all_tokens_pattern(value: &str) -> String {
    value
        .split_whitespace()
        .map(|token| format!("(?=.*{})", escape_pattern_metachars(token)))
        .collect()
}
