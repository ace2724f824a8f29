//! Time formatting for the countdown and stopwatch displays

/// Text shown on a display that has nothing to count
pub const ZERO_TIME: &str = "00:00:00";

/// Format milliseconds as `HH:MM:SS`.
///
/// Every field is padded to two digits. Hours are not wrapped, so anything
/// from 100 hours upward renders with three or more hour digits.
pub fn format_time(milliseconds: u64) -> String {
    let total_seconds = milliseconds / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hh_mm_ss(text: &str) -> bool {
        let parts: Vec<&str> = text.split(':').collect();
        parts.len() == 3
            && parts
                .iter()
                .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn zero_is_all_zeros() {
        assert_eq!(format_time(0), ZERO_TIME);
    }

    #[test]
    fn sub_second_remainder_is_truncated() {
        assert_eq!(format_time(999), "00:00:00");
        assert_eq!(format_time(61_999), "00:01:01");
    }

    #[test]
    fn fields_line_up_with_components() {
        for h in [0u64, 1, 9, 42, 99] {
            for m in [0u64, 5, 30, 59] {
                for s in [0u64, 1, 10, 59] {
                    let ms = h * 3_600_000 + m * 60_000 + s * 1000;
                    let text = format_time(ms);
                    assert!(is_hh_mm_ss(&text), "bad shape: {}", text);
                    assert_eq!(text, format!("{:02}:{:02}:{:02}", h, m, s));
                }
            }
        }
    }

    #[test]
    fn hours_past_ninety_nine_widen_the_field() {
        assert_eq!(format_time(100 * 3_600_000), "100:00:00");
    }
}
