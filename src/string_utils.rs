//! String helpers for presentation.

/// Truncate a label down to `width` characters using some fill string.
///
/// This will return the string as-is if it's no longer than the truncation width. Widths are
/// counted in `char`s, so multi-byte labels are never split in the middle of a code point.
///
/// # Arguments
///
/// - s: The input string that might be truncated.
/// - width: The maximum width of the string.
/// - fill: The placeholder string to use to represent the middle of the string, if it's truncated.
///
/// # Examples
///
/// ```rust
/// # use libeditdist::string_utils::truncate_str;
/// let input_str = "hello, world!";
/// let result = truncate_str(&input_str, 7, "...");
/// assert_eq!(result, "he...d!");
/// ```
///
/// # Panics
///
/// If the `fill` string is longer than the provided `width`.
pub fn truncate_str(s: &str, width: usize, fill: &str) -> String {
    let fill_len = fill.chars().count();

    if fill_len > width {
        panic!(
            "The provided fill string (len: {fill_len}) is longer than the truncation width ({width})"
        );
    }
    let chars: Vec<char> = s.chars().collect();

    if chars.len() <= width {
        return s.into();
    }
    // We want to take roughly an equal amount from the front and back of the string.
    let length_to_take = (width - fill_len) / 2;
    let end_idx = chars.len() - length_to_take;
    let front: String = chars[..length_to_take].iter().collect();
    let back: String = chars[end_idx..].iter().collect();
    format!("{front}{fill}{back}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_str_eq;
    use rstest::*;

    #[rstest]
    #[case("12345", 4, "..", "1..5")]
    #[case("12345", 4, "||", "1||5")]
    #[case("12345", 5, "...", "12345")]
    #[case("short", 1000, "..", "short")]
    #[case("Beautiful", 6, "..", "Be..ul")]
    #[case("äöüßéèêë", 5, "…", "äö…êë")]
    fn test_truncate_str(
        #[case] input_str: &str,
        #[case] width: usize,
        #[case] fill: &str,
        #[case] expected: &str,
    ) {
        let actual = truncate_str(input_str, width, fill);
        assert_str_eq!(actual, expected);
    }

    #[test]
    #[should_panic]
    fn test_bad_fill_length() {
        truncate_str(".", 1, "ahh too long!");
    }
}
