//! Format validators for Russian company requisites
//!
//! INN and OGRN carry weighted check digits; KPP is a fixed-length code.
//! All checks run over the digits of the input, so values may arrive with
//! spaces or punctuation from a form or an extracted document.

use regex_lite::Regex;
use std::sync::OnceLock;

pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digit_values(s: &str) -> Option<Vec<u32>> {
    s.chars().map(|c| c.to_digit(10)).collect()
}

/// Taxpayer number: 10 digits for companies, 12 for individuals
pub fn is_valid_inn(raw: &str) -> bool {
    let inn = digits_only(raw);
    match inn.len() {
        10 => inn_checksum_10(&inn),
        12 => inn_checksum_12(&inn),
        _ => false,
    }
}

fn weighted_check(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = weights.iter().zip(digits).map(|(w, d)| w * d).sum();
    (sum % 11) % 10
}

fn inn_checksum_10(inn: &str) -> bool {
    let Some(digits) = digit_values(inn) else {
        return false;
    };
    const WEIGHTS: [u32; 9] = [2, 4, 10, 3, 5, 9, 4, 6, 8];
    weighted_check(&digits[..9], &WEIGHTS) == digits[9]
}

fn inn_checksum_12(inn: &str) -> bool {
    let Some(digits) = digit_values(inn) else {
        return false;
    };
    const W1: [u32; 10] = [7, 2, 4, 10, 3, 5, 9, 4, 6, 8];
    const W2: [u32; 11] = [3, 7, 2, 4, 10, 3, 5, 9, 4, 6, 8];
    weighted_check(&digits[..10], &W1) == digits[10] && weighted_check(&digits[..11], &W2) == digits[11]
}

/// Tax registration reason code: nine digits, no checksum defined
pub fn is_valid_kpp(raw: &str) -> bool {
    digits_only(raw).len() == 9
}

/// State registration number: 13 digits (companies, mod 11) or 15 digits
/// (sole proprietors, mod 13); the last digit checks the rest
pub fn is_valid_ogrn(raw: &str) -> bool {
    let ogrn = digits_only(raw);
    match ogrn.len() {
        13 => ogrn_checksum(&ogrn, 11),
        15 => ogrn_checksum(&ogrn, 13),
        _ => false,
    }
}

fn ogrn_checksum(ogrn: &str, modulus: u64) -> bool {
    let body = &ogrn[..ogrn.len() - 1];
    let (Ok(body), Some(last)) = (
        body.parse::<u64>(),
        ogrn.chars().last().and_then(|c| c.to_digit(10)),
    ) else {
        return false;
    };
    (body % modulus) % 10 == u64::from(last)
}

pub fn is_valid_email(raw: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    });
    re.is_match(raw.trim())
}

/// Loose plausibility heuristic: an address has letters, digits, and at
/// least one Russian address marker word
pub fn looks_like_address(raw: &str) -> bool {
    let normalized = raw.trim().to_lowercase();
    if normalized.chars().count() < 8 {
        return false;
    }
    let has_digit = normalized.chars().any(|c| c.is_numeric());
    let has_letter = normalized.chars().any(|c| c.is_alphabetic());

    const MARKERS: [&str; 18] = [
        "г", "город", "ул", "улица", "пр", "проспект", "д", "дом", "корп", "кв", "обл", "респ",
        "край", "р-н", "район", "пер", "проезд", "шоссе",
    ];
    let has_marker = MARKERS.iter().any(|m| normalized.contains(m));

    has_digit && has_letter && has_marker
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inn_10_checksum() {
        // 7707083893 is the published Sberbank INN; its check digit is valid
        assert!(is_valid_inn("7707083893"));
        assert!(is_valid_inn("77 07 08 38 93"));
        assert!(!is_valid_inn("7707083894"));
        assert!(!is_valid_inn("770708389"));
    }

    #[test]
    fn inn_12_checksum() {
        assert!(is_valid_inn("500100732259"));
        assert!(!is_valid_inn("500100732258"));
    }

    #[test]
    fn ogrn_13_and_15_checksums() {
        assert!(is_valid_ogrn("1027700132195"));
        assert!(!is_valid_ogrn("1027700132196"));
        assert!(is_valid_ogrn("304500116000157"));
        assert!(!is_valid_ogrn("304500116000158"));
        assert!(!is_valid_ogrn("12345"));
    }

    #[test]
    fn kpp_is_length_only() {
        assert!(is_valid_kpp("773601001"));
        assert!(is_valid_kpp("77-36-01-001"));
        assert!(!is_valid_kpp("7736"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("name@company.ru"));
        assert!(is_valid_email("  padded@mail.example.com "));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@signs.ru"));
    }

    #[test]
    fn address_heuristic() {
        assert!(looks_like_address("г. Москва, ул. Ленина, д. 1"));
        assert!(!looks_like_address("короткий"));
        assert!(!looks_like_address("1234567890"));
    }
}
