use serde::Serialize;

use crate::error::AppError;

/// Generic acknowledgement body for mutations.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Contest created successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement body for creations, carrying the new resource's id.
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "Contest created successfully")]
    pub message: String,
    pub id: uuid::Uuid,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: uuid::Uuid) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}

/// Validate a trimmed title (5-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    let len = title.chars().count();
    if len < 5 || len > 256 {
        return Err(AppError::Validation(
            "Title must be 5-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a description (5 characters to 1MB).
pub fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().chars().count() < 5 || description.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Description must be 5 characters to 1MB".into(),
        ));
    }
    Ok(())
}

/// Syntactic plausibility check, not RFC 5321 conformance. The address is
/// only ever used as a lookup key and a magic-link recipient.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    let valid = email.len() <= 254
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            })
        && !email.contains(char::is_whitespace);
    if !valid {
        return Err(AppError::Validation("Invalid email address".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bounds() {
        assert!(validate_title("Hello").is_ok());
        assert!(validate_title("  Hello  ").is_ok());
        assert!(validate_title("Hi").is_err());
        assert!(validate_title(&"x".repeat(257)).is_err());
    }

    #[test]
    fn email_plausibility() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice").is_err());
        assert!(validate_email("alice@nodot").is_err());
        assert!(validate_email("a lice@example.com").is_err());
        assert!(validate_email("@example.com").is_err());
    }
}
