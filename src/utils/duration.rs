use std::time::Duration;

/// Parse a duration string like `6d`, `2h30m`, or `90s`.
///
/// Valid specifiers are `d`, `h`, `m`, `s`; units may be combined but each
/// component needs an explicit unit. Returns `None` for anything malformed
/// or empty.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let mut total_secs: u64 = 0;
    let mut digits = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let unit_secs = match c {
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };

        let value: u64 = digits.parse().ok()?;
        digits.clear();

        total_secs = total_secs.checked_add(value.checked_mul(unit_secs)?)?;
    }

    // Trailing digits without a unit (e.g. "5" or "1h30") are ambiguous
    if !digits.is_empty() || total_secs == 0 {
        return None;
    }

    Some(Duration::from_secs(total_secs))
}

/// Format a duration the way moderators wrote it: largest units first,
/// zero components skipped.
pub fn format_duration(duration: Duration) -> String {
    let mut secs = duration.as_secs();

    let days = secs / 86_400;
    secs %= 86_400;
    let hours = secs / 3_600;
    secs %= 3_600;
    let mins = secs / 60;
    secs %= 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{} day{}", days, if days == 1 { "" } else { "s" }));
    }
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours == 1 { "" } else { "s" }));
    }
    if mins > 0 {
        parts.push(format!("{} minute{}", mins, if mins == 1 { "" } else { "s" }));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{} second{}", secs, if secs == 1 { "" } else { "s" }));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_units() {
        assert_eq!(parse_duration("6d"), Some(Duration::from_secs(6 * 86_400)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(2 * 3_600)));
        assert_eq!(parse_duration("30m"), Some(Duration::from_secs(30 * 60)));
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_combined_units() {
        assert_eq!(
            parse_duration("1d12h"),
            Some(Duration::from_secs(86_400 + 12 * 3_600))
        );
        assert_eq!(
            parse_duration("2h30m15s"),
            Some(Duration::from_secs(2 * 3_600 + 30 * 60 + 15))
        );
    }

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(parse_duration(" 1H30M "), Some(Duration::from_secs(5_400)));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("5"), None); // no unit
        assert_eq!(parse_duration("1h30"), None); // trailing digits
        assert_eq!(parse_duration("h"), None); // no digits
        assert_eq!(parse_duration("1w"), None); // unknown specifier
        assert_eq!(parse_duration("0s"), None); // zero-length mute
    }

    #[test]
    fn test_format() {
        assert_eq!(format_duration(Duration::from_secs(90)), "1 minute 30 seconds");
        assert_eq!(
            format_duration(Duration::from_secs(86_400 + 3_600)),
            "1 day 1 hour"
        );
        assert_eq!(format_duration(Duration::from_secs(0)), "0 seconds");
    }
}
