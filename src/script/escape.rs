//! Quoting for values placed inside AppleScript string literals.

/// Escapes `value` for use between double quotes in an AppleScript literal.
///
/// Backslashes are doubled and double quotes are backslash-escaped. Other
/// characters, including newlines and tabs, are legal inside AppleScript
/// strings and pass through unchanged.
pub fn escape_applescript_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            other => escaped.push(other),
        }
    }
    escaped
}
