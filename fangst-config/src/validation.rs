//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across configuration modules.

use validator::ValidationError;

/// Longest filename template accepted before time expansion.
pub const MAX_TEMPLATE_LENGTH: usize = 1024;

/// Validate that a given value is a power of two.
pub fn validate_power_of_two(value: usize) -> Result<(), ValidationError> {
    if value.is_power_of_two() {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_power_of_two"))
    }
}

/// Validate an output filename template.
///
/// Rejects empty templates, embedded NUL bytes, and templates too long to
/// leave room for placeholder and time expansion within the path budget.
pub fn validate_template(template: &str) -> Result<(), ValidationError> {
    if template.is_empty() {
        return Err(ValidationError::new("empty_template"));
    }
    if template.contains('\0') {
        return Err(ValidationError::new("template_contains_nul"));
    }
    if template.len() > MAX_TEMPLATE_LENGTH {
        return Err(ValidationError::new("template_too_long"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_boundaries() {
        assert!(validate_power_of_two(128).is_ok());
        assert!(validate_power_of_two(65536).is_ok());
        assert!(validate_power_of_two(100).is_err());
    }

    #[test]
    fn template_rejects_degenerate_inputs() {
        assert!(validate_template("cap_%COREID_%FCOUNT.pcap.zst").is_ok());
        assert!(validate_template("").is_err());
        assert!(validate_template("bad\0name").is_err());
        assert!(validate_template(&"x".repeat(MAX_TEMPLATE_LENGTH + 1)).is_err());
    }
}
