use common::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::validate_email;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct MagicLoginRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SetUsernameRequest {
    #[schema(example = "alice")]
    pub username: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct CallbackQuery {
    /// Login ticket from the magic link.
    pub token: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub role: UserRole,
}

pub fn validate_magic_login(req: &MagicLoginRequest) -> Result<(), AppError> {
    validate_email(&req.email)
}

pub fn validate_set_username(req: &SetUsernameRequest) -> Result<(), AppError> {
    let username = req.username.trim();
    let len = username.chars().count();
    if len < 3 || len > 32 {
        return Err(AppError::Validation(
            "Username must be 3-32 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::Validation(
            "Username may only contain letters, digits, '_' and '-'".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        let ok = SetUsernameRequest {
            username: "alice_01".into(),
        };
        assert!(validate_set_username(&ok).is_ok());

        let short = SetUsernameRequest {
            username: "ab".into(),
        };
        assert!(validate_set_username(&short).is_err());

        let symbols = SetUsernameRequest {
            username: "alice!".into(),
        };
        assert!(validate_set_username(&symbols).is_err());
    }
}
