/// Placeholder shown instead of small counts.
pub const APPROX_LABEL: &str = "很多";

pub const READERS_THRESHOLD: i64 = 10_000;
pub const READS_THRESHOLD: i64 = 100_000;

/// Formats an integer with `,` thousands separators and no decimals.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Returns `approx_label` when `value < threshold`, otherwise the grouped number.
pub fn format_approx(value: i64, threshold: i64, approx_label: &str) -> String {
    if value < threshold {
        approx_label.to_string()
    } else {
        format_number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(100_000), "100,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-12_345), "-12,345");
    }

    #[test]
    fn handles_largest_safe_integer() {
        assert_eq!(format_number(9_007_199_254_740_991), "9,007,199,254,740,991");
    }

    #[test]
    fn below_threshold_uses_label() {
        assert_eq!(format_approx(0, READS_THRESHOLD, APPROX_LABEL), APPROX_LABEL);
        assert_eq!(format_approx(99_999, READS_THRESHOLD, APPROX_LABEL), APPROX_LABEL);
        assert_eq!(format_approx(9_999, READERS_THRESHOLD, "many"), "many");
    }

    #[test]
    fn at_or_above_threshold_formats_number() {
        assert_eq!(format_approx(100_000, READS_THRESHOLD, APPROX_LABEL), "100,000");
        assert_eq!(format_approx(10_000, READERS_THRESHOLD, "many"), "10,000");
        assert_eq!(format_approx(0, 0, "many"), "0");
    }
}
