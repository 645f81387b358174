//! Pure text formatting for metric values

use crate::constants::{BAR_CELLS, BAR_EMPTY, BAR_FILLED, BYTES_PER_KB};

const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Column width of the leading number on a panel line (`100.0`)
const VALUE_WIDTH: usize = 5;

/// 10-cell usage bar; one filled cell per full 10%
pub fn bar(percent: f64) -> String {
    let filled = if percent.is_finite() {
        (percent / 10.0).floor().clamp(0.0, BAR_CELLS as f64) as usize
    } else {
        0
    };

    let mut out = String::with_capacity(BAR_CELLS * BAR_FILLED.len_utf8());
    out.extend(std::iter::repeat(BAR_FILLED).take(filled));
    out.extend(std::iter::repeat(BAR_EMPTY).take(BAR_CELLS - filled));
    out
}

/// Human readable byte count with one decimal (`1536` -> `1.5KB`)
pub fn human_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in &BYTE_UNITS[..BYTE_UNITS.len() - 1] {
        if value < BYTES_PER_KB {
            return format!("{:.1}{}", value, unit);
        }
        value /= BYTES_PER_KB;
    }
    format!("{:.1}{}", value, BYTE_UNITS[BYTE_UNITS.len() - 1])
}

/// Load-type metrics: `"42.0% [████░░░░░░]"`
pub fn percent_text(percent: f64) -> String {
    format!("{:.1}% [{}]", percent, bar(percent))
}

/// RAM: percent, bar and bytes in use
pub fn memory_text(percent: f64, used_bytes: u64) -> String {
    format!("{} {}", percent_text(percent), human_bytes(used_bytes))
}

pub fn temperature_text(celsius: f64) -> String {
    format!("{:.1}°C", celsius)
}

/// Right-align the leading number of a metric text so panel columns line up
///
/// `"5.0% [...]"` becomes `"  5.0% [...]"`. Text without a leading number
/// (`"N/A"`) is returned unchanged.
pub fn align_value(text: &str) -> String {
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(text.len());
    if end == 0 {
        return text.to_string();
    }
    format!("{:>width$}{}", &text[..end], &text[end..], width = VALUE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0.0), "░░░░░░░░░░");
        assert_eq!(bar(100.0), "██████████");
        assert_eq!(bar(55.0), "█████░░░░░");
        assert_eq!(bar(9.99), "░░░░░░░░░░");
        assert_eq!(bar(91.2), "█████████░");
    }

    #[test]
    fn test_bar_clamps() {
        assert_eq!(bar(-5.0), "░░░░░░░░░░");
        assert_eq!(bar(250.0), "██████████");
        assert_eq!(bar(f64::NAN), "░░░░░░░░░░");
        assert_eq!(bar(42.0).chars().count(), BAR_CELLS);
    }

    #[test]
    fn test_human_bytes() {
        assert_eq!(human_bytes(0), "0.0B");
        assert_eq!(human_bytes(512), "512.0B");
        assert_eq!(human_bytes(1023), "1023.0B");
        assert_eq!(human_bytes(1024), "1.0KB");
        assert_eq!(human_bytes(1536), "1.5KB");
        assert_eq!(human_bytes(1_073_741_824), "1.0GB");
        assert_eq!(human_bytes(8_589_934_592), "8.0GB");
        assert_eq!(human_bytes(1u64 << 50), "1.0PB");
        assert_eq!(human_bytes(u64::MAX), "16384.0PB");
    }

    #[test]
    fn test_metric_text() {
        assert_eq!(percent_text(12.34), "12.3% [█░░░░░░░░░]");
        assert_eq!(memory_text(91.2, 8_589_934_592), "91.2% [█████████░] 8.0GB");
        assert_eq!(temperature_text(62.3), "62.3°C");
    }

    #[test]
    fn test_align_value() {
        assert_eq!(align_value(&percent_text(5.0)), "  5.0% [░░░░░░░░░░]");
        assert_eq!(align_value(&percent_text(91.2)), " 91.2% [█████████░]");
        assert_eq!(align_value(&percent_text(100.0)), "100.0% [██████████]");
        assert_eq!(align_value(&temperature_text(62.3)), " 62.3°C");
        assert_eq!(align_value(&temperature_text(-3.5)), " -3.5°C");
        assert_eq!(align_value("N/A"), "N/A");
    }
}
