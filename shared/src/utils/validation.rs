//! Validation helpers for contact channels and verification codes

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a verification code
pub const CODE_LENGTH: usize = 6;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email regex must compile")
});

/// Validate an email address format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validate phone number format (E.164)
///
/// Accepts a leading `+` followed by 10 to 15 digits.
pub fn is_valid_phone_number(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };
    if digits.len() < 10 || digits.len() > 15 {
        return false;
    }
    digits.chars().all(|c| c.is_ascii_digit())
}

/// Validate a submitted verification code: exactly six ASCII digits
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}

/// Mask a phone number for logging, keeping only the last four characters.
///
/// Works on characters, not bytes; the value may be arbitrary user
/// input that never passed format validation.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    if chars[0] == '+' {
        format!("+{}{}", "*".repeat(chars.len() - 5), tail)
    } else {
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

/// Mask an email address for logging, keeping the first character and domain
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let mut chars = local.chars();
            let first = chars.next().map(String::from).unwrap_or_default();
            format!("{}{}@{}", first, "*".repeat(chars.count()), domain)
        }
        _ => "*".repeat(email.chars().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@domain"));
    }

    #[test]
    fn test_valid_phone_numbers() {
        assert!(is_valid_phone_number("+15551234567"));
        assert!(is_valid_phone_number("+861380013800"));
        assert!(is_valid_phone_number("+123456789012345"));
    }

    #[test]
    fn test_invalid_phone_numbers() {
        assert!(!is_valid_phone_number("15551234567")); // missing '+'
        assert!(!is_valid_phone_number("+123")); // too short
        assert!(!is_valid_phone_number("+1234567890123456")); // too long
        assert!(!is_valid_phone_number("+1555abc4567")); // letters
    }

    #[test]
    fn test_valid_codes() {
        assert!(is_valid_code("100000"));
        assert!(is_valid_code("999999"));
        assert!(!is_valid_code("12345"));
        assert!(!is_valid_code("1234567"));
        assert!(!is_valid_code("12a456"));
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("+15551234567"), "+*******4567");
        assert_eq!(mask_phone("123"), "***");
    }

    #[test]
    fn test_mask_phone_non_ascii_input() {
        // Unvalidated input reaches the mask on log paths; multi-byte
        // characters must not split.
        assert_eq!(mask_phone("€€€"), "***");
        assert_eq!(mask_phone("€€€€€"), "*€€€€");
        assert_eq!(mask_phone("+€€€€€"), "+*€€€€");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a****@example.com");
        assert_eq!(mask_email("bad-input"), "*********");
    }

    #[test]
    fn test_mask_email_non_ascii_local_part() {
        assert_eq!(mask_email("éric@example.com"), "é***@example.com");
    }
}
