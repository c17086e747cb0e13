//! Input validation for visitor-supplied fields.

use crate::error::{DatabaseError, Result};

/// Require a non-blank value.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DatabaseError::MissingField { field });
    }
    Ok(())
}

/// Validate a contact form submission: name, email, and message are all
/// required. Presence only; the store accepts any non-blank email.
pub fn validate_contact_submission(name: &str, email: &str, message: &str) -> Result<()> {
    require_non_empty("name", name)?;
    require_non_empty("email", email)?;
    require_non_empty("message", message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission() {
        assert!(validate_contact_submission("Priya", "priya@example.com", "Hi there").is_ok());
    }

    #[test]
    fn test_each_field_required() {
        assert!(matches!(
            validate_contact_submission("", "priya@example.com", "Hi"),
            Err(DatabaseError::MissingField { field: "name" })
        ));
        assert!(matches!(
            validate_contact_submission("Priya", "   ", "Hi"),
            Err(DatabaseError::MissingField { field: "email" })
        ));
        assert!(matches!(
            validate_contact_submission("Priya", "priya@example.com", ""),
            Err(DatabaseError::MissingField { field: "message" })
        ));
    }

    #[test]
    fn test_missing_field_message() {
        let err = DatabaseError::MissingField { field: "message" };
        assert_eq!(err.to_string(), "message is required");
    }
}
