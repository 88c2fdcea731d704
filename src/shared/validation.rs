use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};

lazy_static! {
    /// Hospital codes: uppercase alphanumeric segments joined by single hyphens
    /// - Valid: "RS001", "RSUD-SOETOMO", "RS12"
    /// - Invalid: "rs001", "-RS1", "RS1-", "RS--1", "RS 001"
    pub static ref HOSPITAL_CODE_REGEX: Regex =
        Regex::new(r"^[A-Z0-9]+(?:-[A-Z0-9]+)*$").unwrap();

    /// Phone numbers as written on Indonesian forms, e.g. "(031) 5501078" or "+62 31 123"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9+()\-. ]{5,30}$").unwrap();
}

/// Deserialize an optional string, treating blank input as absent
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hospital_code_regex_valid() {
        assert!(HOSPITAL_CODE_REGEX.is_match("RS001"));
        assert!(HOSPITAL_CODE_REGEX.is_match("RSUD-SOETOMO"));
        assert!(HOSPITAL_CODE_REGEX.is_match("A"));
        assert!(HOSPITAL_CODE_REGEX.is_match("RS-1-A"));
    }

    #[test]
    fn test_hospital_code_regex_invalid() {
        assert!(!HOSPITAL_CODE_REGEX.is_match("rs001")); // lowercase
        assert!(!HOSPITAL_CODE_REGEX.is_match("-RS1"));
        assert!(!HOSPITAL_CODE_REGEX.is_match("RS1-"));
        assert!(!HOSPITAL_CODE_REGEX.is_match("RS--1"));
        assert!(!HOSPITAL_CODE_REGEX.is_match("RS 001"));
        assert!(!HOSPITAL_CODE_REGEX.is_match(""));
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("(031) 5501078"));
        assert!(PHONE_REGEX.is_match("+62 31 5910000"));
        assert!(!PHONE_REGEX.is_match("call me"));
        assert!(!PHONE_REGEX.is_match("123"));
    }

    #[derive(serde::Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "blank_as_none")]
        password: Option<String>,
    }

    #[test]
    fn test_blank_as_none() {
        let blank: Form = serde_json::from_str(r#"{"password": "  "}"#).unwrap();
        assert!(blank.password.is_none());

        let missing: Form = serde_json::from_str("{}").unwrap();
        assert!(missing.password.is_none());

        let set: Form = serde_json::from_str(r#"{"password": "rahasia"}"#).unwrap();
        assert_eq!(set.password.as_deref(), Some("rahasia"));
    }
}
