//! Exam form fields and the number rules for the duration inputs

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::display::ElementId;

/// Editable fields of the exam form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Hours,
    Minutes,
    Name,
    Info,
}

impl InputField {
    /// Page element that shows the field
    pub fn element(&self) -> ElementId {
        match self {
            InputField::Hours => ElementId::HoursInput,
            InputField::Minutes => ElementId::MinutesInput,
            InputField::Name => ElementId::NameInput,
            InputField::Info => ElementId::InfoInput,
        }
    }

    /// Whether the field only accepts whole numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, InputField::Hours | InputField::Minutes)
    }

    /// Name used in routes and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::Hours => "hours",
            InputField::Minutes => "minutes",
            InputField::Name => "name",
            InputField::Info => "info",
        }
    }
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" => Ok(InputField::Hours),
            "minutes" => Ok(InputField::Minutes),
            "name" => Ok(InputField::Name),
            "info" => Ok(InputField::Info),
            other => Err(format!("unknown input field: {}", other)),
        }
    }
}

/// Parse the longest leading decimal number, ignoring leading whitespace
fn leading_number(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

/// Check a duration field as it is typed.
///
/// Returns the replacement text when the value is not a whole number: the
/// floor of its leading number, or empty when that is zero or missing.
/// Returns `None` when the text is acceptable as is.
pub fn coerce_integer_input(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    match leading_number(raw) {
        Some(value) if value.is_finite() && value.fract() == 0.0 => None,
        Some(value) if value.is_finite() => {
            let floored = value.floor();
            if floored == 0.0 {
                Some(String::new())
            } else {
                Some(format!("{}", floored as i64))
            }
        }
        _ => Some(String::new()),
    }
}

/// Read a duration field the way the set button does: the leading integer,
/// or zero when there is none
pub fn parse_duration_field(raw: &str) -> i64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }

    // Absurdly long inputs saturate and are rejected by the duration check
    text[..end].parse().unwrap_or(if bytes[0] == b'-' { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_pass_untouched() {
        assert_eq!(coerce_integer_input(""), None);
        assert_eq!(coerce_integer_input("2"), None);
        assert_eq!(coerce_integer_input("90"), None);
        assert_eq!(coerce_integer_input("3.0"), None);
    }

    #[test]
    fn fractions_are_floored() {
        assert_eq!(coerce_integer_input("1.5"), Some("1".to_string()));
        assert_eq!(coerce_integer_input("45.9"), Some("45".to_string()));
        assert_eq!(coerce_integer_input("-1.5"), Some("-2".to_string()));
    }

    #[test]
    fn zero_floor_and_garbage_are_emptied() {
        assert_eq!(coerce_integer_input("0.5"), Some(String::new()));
        assert_eq!(coerce_integer_input("abc"), Some(String::new()));
        assert_eq!(coerce_integer_input("."), Some(String::new()));
    }

    #[test]
    fn trailing_text_after_an_integer_is_tolerated() {
        assert_eq!(coerce_integer_input("12abc"), None);
        assert_eq!(parse_duration_field("12abc"), 12);
    }

    #[test]
    fn duration_fields_default_to_zero() {
        assert_eq!(parse_duration_field(""), 0);
        assert_eq!(parse_duration_field("x"), 0);
        assert_eq!(parse_duration_field(" 7"), 7);
        assert_eq!(parse_duration_field("-3"), -3);
        assert_eq!(parse_duration_field("2.9"), 2);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("minutes".parse::<InputField>(), Ok(InputField::Minutes));
        assert!("seconds".parse::<InputField>().is_err());
        assert!(InputField::Hours.is_numeric());
        assert!(!InputField::Info.is_numeric());
    }
}
