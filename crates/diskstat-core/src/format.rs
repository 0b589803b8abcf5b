//! Human-readable size formatting.

/// Units used by [`format_size`], base 1024.
const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count with two fractional digits and the largest unit that
/// keeps the value below 1024 (clamped at PB).
///
/// ```
/// use diskstat_core::format_size;
///
/// assert_eq!(format_size(1536), "1.50 KB");
/// assert_eq!(format_size(0), "0.00 B");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(512), "512.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
    }

    #[test]
    fn test_scaling() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
        assert_eq!(format_size(1024u64.pow(4)), "1.00 TB");
    }

    #[test]
    fn test_clamped_at_largest_unit() {
        let one_pb = 1024u64.pow(5);
        assert_eq!(format_size(one_pb), "1.00 PB");
        // Beyond PB there is no larger unit; the value just grows.
        assert_eq!(format_size(2048 * 1024u64.pow(4)), "2.00 PB");
        assert!(format_size(u64::MAX).ends_with(" PB"));
    }
}
