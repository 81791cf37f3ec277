// String format rules

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rule::PropertyRule;

static CARD_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Passes when the string matches the pattern.
pub fn matches(pattern: Regex) -> PropertyRule {
    PropertyRule::new("Value is not in the correct format.", move |value, _| {
        Some(pattern.is_match(value.as_str()?))
    })
}

/// Passes for strings that survive a Luhn checksum after stripping
/// whitespace. Any other character, hyphens included, fails outright.
pub fn credit_card() -> PropertyRule {
    PropertyRule::new("Value is not a valid credit card number.", |value, _| {
        let card = value.as_str()?;
        let digits = CARD_WHITESPACE.replace_all(card, "");
        if !DIGITS_ONLY.is_match(&digits) {
            return Some(false);
        }
        Some(luhn_checksum(&digits))
    })
}

fn luhn_checksum(digits: &str) -> bool {
    let mut sum = 0u64;
    let mut double = false;
    for ch in digits.chars().rev() {
        let Some(mut digit) = ch.to_digit(10) else {
            return false;
        };
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += u64::from(digit);
        double = !double;
    }
    sum % 10 == 0
}
