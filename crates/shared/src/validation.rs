//! Common validation utilities.

use validator::ValidationError;

/// Validates that a name is not blank.
///
/// Length is not limited; the column is plain `TEXT`.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("name_blank");
        err.message = Some("Name must not be blank".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a phone number is positive.
pub fn validate_phone_number(phone: i64) -> Result<(), ValidationError> {
    if phone <= 0 {
        let mut err = ValidationError::new("phone_range");
        err.message = Some("Phone number must be positive".into());
        return Err(err);
    }

    Ok(())
}

/// Returns the message attached to a validation error, or its code.
pub fn error_message(err: &ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Name tests
    #[test]
    fn test_validate_name() {
        assert!(validate_name("Anna").is_ok());
        assert!(validate_name("Иван").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_name_accepts_long_names() {
        assert!(validate_name(&"a".repeat(101)).is_ok());
        assert!(validate_name(&"я".repeat(10_000)).is_ok());
    }

    #[test]
    fn test_validate_name_error_message() {
        let err = validate_name(" ").unwrap_err();
        assert_eq!(error_message(&err), "Name must not be blank");
    }

    // Phone tests
    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number(555).is_ok());
        assert!(validate_phone_number(79_991_234_567).is_ok());
        assert!(validate_phone_number(0).is_err());
        assert!(validate_phone_number(-1).is_err());
    }

    #[test]
    fn test_validate_phone_number_accepts_any_bigint_width() {
        assert!(validate_phone_number(1_000_000_000_000_000).is_ok());
        assert!(validate_phone_number(i64::MAX).is_ok());
    }

    #[test]
    fn test_validate_phone_number_error_message() {
        let err = validate_phone_number(-5).unwrap_err();
        assert_eq!(error_message(&err), "Phone number must be positive");
    }

    #[test]
    fn test_error_message_falls_back_to_code() {
        let err = ValidationError::new("custom_code");
        assert_eq!(error_message(&err), "custom_code");
    }
}
