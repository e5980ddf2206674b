//! Count formatting with singular/plural words.

const DEFAULT_TEMPLATE: &str = "%d %s";

/// Format `count` with the matching word, e.g. `plural(2, "file", None)` is
/// `"2 files"`. The plural form defaults to the singular with an `s` appended.
pub fn plural(count: i64, singular: &str, plural: Option<&str>) -> String {
    plural_with_template(count, singular, plural, DEFAULT_TEMPLATE)
}

/// Like [`plural`], rendering into `template` where the first `%d` is the
/// count and the first `%s` is the word.
pub fn plural_with_template(
    count: i64,
    singular: &str,
    plural: Option<&str>,
    template: &str,
) -> String {
    let word = if count.abs() == 1 {
        singular.to_string()
    } else {
        plural
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}s", singular))
    };

    template
        .replacen("%d", &count.to_string(), 1)
        .replacen("%s", &word, 1)
}

/// Parse a leading integer out of `input`; anything unparsable counts as 0.
pub fn parse_count(input: &str) -> i64 {
    let trimmed = input.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
