use anyhow::Result;
use chrono::{Duration, Utc};
use common::UserRole;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a session token (bearer header or `auth_token` cookie).
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid, // User ID
    pub email: String,
    pub role: UserRole,
    pub exp: usize, // Expiration timestamp
}

/// Claims carried by the short-lived ticket embedded in a magic link.
///
/// Deliberately identifies the user by email only; the callback re-resolves
/// the account so a user deleted between request and click cannot log in.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginTicketClaims {
    pub email: String,
    pub exp: usize,
}

/// Sign a session token for an authenticated user.
pub fn sign_session(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    ttl_hours: i64,
    secret: &str,
) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .expect("valid timestamp")
        .timestamp();

    let claims = SessionClaims {
        sub: user_id,
        email: email.to_owned(),
        role,
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a session token.
pub fn verify_session(token: &str, secret: &str) -> Result<SessionClaims> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Sign a magic-link login ticket.
pub fn sign_login_ticket(email: &str, ttl_minutes: i64, secret: &str) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::minutes(ttl_minutes))
        .expect("valid timestamp")
        .timestamp();

    let claims = LoginTicketClaims {
        email: email.to_owned(),
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a login ticket.
pub fn verify_login_ticket(token: &str, secret: &str) -> Result<LoginTicketClaims> {
    let token_data = decode::<LoginTicketClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret";

    #[test]
    fn session_token_round_trips() {
        let id = Uuid::new_v4();
        let token = sign_session(id, "alice@example.com", UserRole::Admin, 24, SECRET).unwrap();
        let claims = verify_session(&token, SECRET).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, UserRole::Admin);
    }

    #[test]
    fn session_token_rejects_wrong_secret() {
        let token =
            sign_session(Uuid::new_v4(), "alice@example.com", UserRole::User, 24, SECRET).unwrap();
        assert!(verify_session(&token, "other_secret").is_err());
    }

    #[test]
    fn login_ticket_round_trips() {
        let token = sign_login_ticket("bob@example.com", 15, SECRET).unwrap();
        let claims = verify_login_ticket(&token, SECRET).unwrap();
        assert_eq!(claims.email, "bob@example.com");
    }

    #[test]
    fn expired_login_ticket_is_rejected() {
        // Negative TTL puts exp well past the default validation leeway.
        let token = sign_login_ticket("bob@example.com", -60, SECRET).unwrap();
        assert!(verify_login_ticket(&token, SECRET).is_err());
    }

    #[test]
    fn ticket_is_not_a_valid_session() {
        let token = sign_login_ticket("bob@example.com", 15, SECRET).unwrap();
        assert!(verify_session(&token, SECRET).is_err());
    }
}
