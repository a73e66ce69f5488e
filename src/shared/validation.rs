use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating contact phone numbers
    /// Optional leading "+", then 8 to 15 digits, spaces allowed between groups
    /// - Valid: "+229 97 00 00 00", "97000000", "+33612345678"
    /// - Invalid: "phone", "12-34", "+", "1234567"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9](?: ?[0-9]){7,14}$").unwrap();

    /// Regex for breakdown request reference numbers
    /// - Valid: "DEP-2026-0000042"
    /// - Invalid: "DEP-26-42", "TKT-2026-0000042"
    pub static ref REFERENCE_REGEX: Regex = Regex::new(r"^DEP-[0-9]{4}-[0-9]{7}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("+229 97 00 00 00"));
        assert!(PHONE_REGEX.is_match("97000000"));
        assert!(PHONE_REGEX.is_match("+33612345678"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("phone"));
        assert!(!PHONE_REGEX.is_match("12-34"));
        assert!(!PHONE_REGEX.is_match("+"));
        assert!(!PHONE_REGEX.is_match("1234567")); // too short
        assert!(!PHONE_REGEX.is_match(" 97000000")); // leading space
        assert!(!PHONE_REGEX.is_match(""));
    }

    #[test]
    fn test_reference_regex() {
        assert!(REFERENCE_REGEX.is_match("DEP-2026-0000042"));
        assert!(!REFERENCE_REGEX.is_match("DEP-26-42"));
        assert!(!REFERENCE_REGEX.is_match("TKT-2026-0000042"));
    }
}
