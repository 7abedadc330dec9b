use crate::error::{AppError, Result};

/// Validates an email address against a basic `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    if email.len() > 255 {
        return Err(AppError::Validation(
            "Email must be at most 255 characters".to_string(),
        ));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(AppError::Validation(
            "Email must not contain whitespace".to_string(),
        ));
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AppError::Validation("Invalid email address".to_string()));
    };

    if local.is_empty()
        || domain.is_empty()
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }

    Ok(())
}

/// Validates a password.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be at most 128 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a required name field.
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }

    Ok(())
}

/// Validates an optional phone number: digits, spaces, and `- + ( )` only.
pub fn validate_phone(phone: &str) -> Result<()> {
    let allowed = |c: char| c.is_ascii_digit() || c == ' ' || c == '-' || c == '+' || c == '(' || c == ')';

    if phone.is_empty() || !phone.chars().all(allowed) {
        return Err(AppError::Validation("Invalid phone number".to_string()));
    }

    Ok(())
}
