//! Phone number formatting for display and candidate merging.

/// Keep only ASCII digits.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a phone number in local Israeli form.
///
/// Non-digits are dropped, a leading `972` country code becomes `0`, and a
/// 10-digit result is hyphenated as `XXX-XXXXXXX`. Anything else comes back
/// as bare digits.
pub fn format_phone(phone: &str) -> String {
    let mut digits = digits_only(phone);
    if let Some(rest) = digits.strip_prefix("972") {
        digits = format!("0{}", rest);
    }
    if digits.len() == 10 {
        format!("{}-{}", &digits[..3], &digits[3..])
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("+972 (50) 123-4567"), "972501234567");
        assert_eq!(digits_only("n/a"), "");
    }

    #[test]
    fn test_international_prefix() {
        assert_eq!(format_phone("972501234567"), "050-1234567");
        assert_eq!(format_phone("+972-50-123-4567"), "050-1234567");
    }

    #[test]
    fn test_local_number() {
        assert_eq!(format_phone("0501234567"), "050-1234567");
        assert_eq!(format_phone("050-123-4567"), "050-1234567");
    }

    #[test]
    fn test_other_lengths_stay_bare() {
        assert_eq!(format_phone("03-1234567"), "031234567");
        assert_eq!(format_phone("+1 (415) 555-1234"), "14155551234");
        assert_eq!(format_phone(""), "");
    }
}
