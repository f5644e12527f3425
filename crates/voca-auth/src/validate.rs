use std::fmt;

/// Form field a validation failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    DisplayName,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
            Field::DisplayName => "display_name",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Local part of a valid address
pub(crate) fn email(email: &str) -> Result<&str, ValidationError> {
    let invalid = || ValidationError::new(Field::Email, "Please enter a valid email address");

    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() {
        return Err(invalid());
    }
    Ok(local)
}

pub(crate) fn password(password: &str, min_len: usize) -> Result<(), ValidationError> {
    if password.chars().count() < min_len {
        return Err(ValidationError::new(
            Field::Password,
            format!("Password must be at least {min_len} characters"),
        ));
    }
    Ok(())
}

pub(crate) fn confirmation(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::new(
            Field::ConfirmPassword,
            "Passwords do not match",
        ));
    }
    Ok(())
}

pub(crate) fn display_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::new(
            Field::DisplayName,
            "Display name is required",
        ));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_needs_at_and_both_parts() {
        assert_eq!(email("a@b.com"), Ok("a"));
        assert_eq!(email(" learner@example.org "), Ok("learner"));
        for bad in ["", "plain", "@b.com", "a@"] {
            assert_eq!(email(bad).unwrap_err().field, Field::Email, "{bad}");
        }
    }

    #[test]
    fn test_password_length() {
        assert!(password("123456", 6).is_ok());
        assert!(password("short", 6).is_err());
    }

    #[test]
    fn test_display_name_trimmed() {
        assert_eq!(display_name("  Ada "), Ok("Ada"));
        assert!(display_name("   ").is_err());
    }
}
