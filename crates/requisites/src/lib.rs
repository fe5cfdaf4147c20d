//! Company requisites: the value model behind the template placeholders
//!
//! Placeholder keys in templates correspond to the fields of
//! [`CompanyDetails`]; format rules catch a mistyped INN or OGRN before a
//! document is generated with it.

mod checks;

pub use checks::{
    digits_only, is_valid_email, is_valid_inn, is_valid_kpp, is_valid_ogrn, looks_like_address,
};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Company details as supplied by the caller (all fields optional; a
/// template only needs the keys it actually uses)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub company_name: Option<String>,
    pub legal_form: Option<String>,
    pub ceo_full_name: Option<String>,
    pub ceo_shorten_name: Option<String>,
    pub ogrn: Option<String>,
    pub inn: Option<String>,
    pub kpp: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CompanyDetails {
    /// Flatten into a placeholder key → value map for the fill engine
    pub fn to_values(&self) -> HashMap<String, String> {
        let mut values = HashMap::new();
        let fields = [
            ("company_name", &self.company_name),
            ("legal_form", &self.legal_form),
            ("ceo_full_name", &self.ceo_full_name),
            ("ceo_shorten_name", &self.ceo_shorten_name),
            ("ogrn", &self.ogrn),
            ("inn", &self.inn),
            ("kpp", &self.kpp),
            ("email", &self.email),
            ("address", &self.address),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                values.insert(key.to_string(), value.trim().to_string());
            }
        }
        values
    }
}

/// A format problem with one supplied value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub key: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(key: &str, message: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Check format rules over a placeholder value map. Only keys with a known
/// rule are checked; empty values are skipped (all requisites are
/// optional — presence is the template's concern, format is ours).
pub fn validate_values(values: &HashMap<String, String>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (key, raw) in values {
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "inn" => {
                if !is_valid_inn(value) {
                    issues.push(ValidationIssue::new(
                        key,
                        "INN must be 10 or 12 digits with a valid check digit",
                    ));
                }
            }
            "kpp" => {
                if !is_valid_kpp(value) {
                    issues.push(ValidationIssue::new(key, "KPP must contain 9 digits"));
                }
            }
            "ogrn" => {
                if !is_valid_ogrn(value) {
                    issues.push(ValidationIssue::new(
                        key,
                        "OGRN must be 13 or 15 digits with a valid check digit",
                    ));
                }
            }
            "email" => {
                if !is_valid_email(value) {
                    issues.push(ValidationIssue::new(key, "Email address is malformed"));
                }
            }
            "address" => {
                if !looks_like_address(value) {
                    issues.push(ValidationIssue::new(
                        key,
                        "Address does not look like a postal address",
                    ));
                }
            }
            _ => {}
        }
    }

    issues.sort_by(|a, b| a.key.cmp(&b.key));
    issues
}
