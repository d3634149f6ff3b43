//! Splits the accumulated USSD input into step tokens

/// Separator the gateway places between successive answers
pub const SEPARATOR: char = '*';

/// Split raw accumulated text into non-empty tokens, in order.
///
/// `None` and `""` both mean "no input yet". Empty segments (leading,
/// doubled or trailing separators) are dropped.
pub fn tokenize(text: Option<&str>) -> Vec<String> {
    text.unwrap_or_default()
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
