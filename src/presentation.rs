//! Display formatting for calculator outputs
//!
//! Formatting only reads the numbers it is handed; rounding here is for the
//! string and never feeds back into a result.

use crate::projection::round_currency;

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole dollars with thousands separators: `$1,075,000`, `-$250`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }
    let rounded = round_currency(value);
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded.abs() as u64))
}

/// Percentage with a fixed number of decimals: `5.25%`
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Signed currency delta: `+$24,000`, `-$3,100`, `$0`
pub fn format_delta(value: f64) -> String {
    let rounded = if value.is_finite() { round_currency(value) } else { 0.0 };
    if rounded > 0.0 {
        format!("+{}", format_currency(rounded))
    } else {
        format_currency(rounded)
    }
}

/// Short form for headline figures: `$1.1M`, `$250K`, `$900`
pub fn format_compact_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    let (scaled, suffix) = if abs >= 1_000_000.0 {
        (abs / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (abs / 1_000.0, "K")
    } else {
        return format_currency(value);
    };
    // 999,960 would print as 1000.0K
    let (scaled, suffix) = if suffix == "K" && (scaled * 10.0).round() >= 10_000.0 {
        (abs / 1_000_000.0, "M")
    } else {
        (scaled, suffix)
    };

    let text = format!("{:.1}", scaled);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{}${}{}", sign, text, suffix)
}

/// Sentence fragment for a comparison: `+$300,000 more at max funding`
pub fn describe_delta(value: f64, context: &str) -> String {
    let rounded = if value.is_finite() { round_currency(value) } else { 0.0 };
    if rounded > 0.0 {
        format!("{} more {}", format_delta(rounded), context)
    } else if rounded < 0.0 {
        format!("{} less {}", format_delta(rounded), context)
    } else {
        format!("no difference {}", context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(45.0), "$45");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(1_075_000.0), "$1,075,000");
        assert_eq!(format_currency(127_628.0), "$127,628");
        assert_eq!(format_currency(-2_500.0), "-$2,500");
        assert_eq!(format_currency(f64::NAN), "$0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(5.25, 2), "5.25%");
        assert_eq!(format_percent(10.0, 1), "10.0%");
        assert_eq!(format_percent(-19.4, 1), "-19.4%");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(24_000.0), "+$24,000");
        assert_eq!(format_delta(-3_100.0), "-$3,100");
        assert_eq!(format_delta(0.2), "$0");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact_currency(1_075_000.0), "$1.1M");
        assert_eq!(format_compact_currency(2_000_000.0), "$2M");
        assert_eq!(format_compact_currency(250_000.0), "$250K");
        assert_eq!(format_compact_currency(900.0), "$900");
        assert_eq!(format_compact_currency(-1_500.0), "-$1.5K");
        assert_eq!(format_compact_currency(999_960.0), "$1M");
        assert_eq!(format_compact_currency(-999_999.0), "-$1M");
        assert_eq!(format_compact_currency(999_940.0), "$999.9K");
    }

    #[test]
    fn test_describe_delta() {
        assert_eq!(describe_delta(300_000.0, "at max funding"), "+$300,000 more at max funding");
        assert_eq!(describe_delta(-5_000.0, "at minimum funding"), "-$5,000 less at minimum funding");
        assert_eq!(describe_delta(0.0, "between methods"), "no difference between methods");
    }
}
