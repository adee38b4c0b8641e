use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum::{Json, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use common::UserRole;
use sea_orm::*;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{
    CallbackQuery, MagicLoginRequest, MeResponse, SetUsernameRequest, validate_magic_login,
    validate_set_username,
};
use crate::models::shared::MessageResponse;
use crate::state::AppState;
use crate::utils::jwt;
use store::entity::user;

/// Name of the session cookie set at callback.
pub const AUTH_COOKIE: &str = "auth_token";

/// Request a magic login link.
///
/// Upserts the user by email, signs a short-lived login ticket and emits
/// the callback link to the operational log. Real email delivery is the
/// deployment's concern; the response never reveals whether the address
/// was already registered.
#[utoipa::path(
    post,
    path = "/api/v1/auth/magic-login",
    tag = "Auth",
    operation_id = "requestMagicLogin",
    request_body = MagicLoginRequest,
    responses(
        (status = 200, description = "Magic link issued", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn magic_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<MagicLoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_magic_login(&payload)?;
    let email = payload.email.trim().to_lowercase();

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;

    if existing.is_none() {
        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.clone()),
            username: Set(None),
            role: Set(UserRole::User),
            created_at: Set(chrono::Utc::now()),
        };

        // A concurrent request for the same address may win the insert;
        // either row works for ticket issuance.
        if let Err(e) = new_user.insert(&state.db).await {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {}
                _ => return Err(AppError::from(e)),
            }
        }
    }

    let ticket = jwt::sign_login_ticket(
        &email,
        state.config.auth.login_ticket_ttl_minutes,
        &state.config.auth.jwt_secret,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    // Stands in for the email transport.
    info!(
        email = %email,
        "Magic link: {}/api/v1/auth/callback?token={}",
        state.config.auth.backend_url,
        ticket
    );

    Ok(Json(MessageResponse::new(
        "If the address is valid, a login link has been sent",
    )))
}

/// Complete a magic-link login.
///
/// Verifies the ticket, sets the session cookie and redirects into the
/// frontend based on the account's state.
#[utoipa::path(
    get,
    path = "/api/v1/auth/callback",
    tag = "Auth",
    operation_id = "magicLoginCallback",
    params(CallbackQuery),
    responses(
        (status = 303, description = "Session established, redirecting to the frontend"),
        (status = 401, description = "Invalid or expired ticket (TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, query))]
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let claims = jwt::verify_login_ticket(&query.token, &state.config.auth.jwt_secret)
        .map_err(|_| AppError::TokenInvalid)?;

    let user = user::Entity::find()
        .filter(user::Column::Email.eq(&claims.email))
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    let session = jwt::sign_session(
        user.id,
        &user.email,
        user.role,
        state.config.auth.session_ttl_hours,
        &state.config.auth.jwt_secret,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    let cookie = Cookie::build((AUTH_COOKIE, session))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let frontend = &state.config.auth.frontend_url;
    let target = if user.role.is_admin() {
        format!("{frontend}/admin-dashboard")
    } else if user.username.is_none() {
        format!("{frontend}/set-username")
    } else {
        format!("{frontend}/dashboard")
    };

    Ok((jar.add(cookie), Redirect::to(&target)))
}

/// Return the current authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    operation_id = "me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AppError> {
    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        username: user.username,
        role: user.role,
    }))
}

/// Choose a username after first login.
#[utoipa::path(
    post,
    path = "/api/v1/auth/set-username",
    tag = "Auth",
    operation_id = "setUsername",
    request_body = SetUsernameRequest,
    responses(
        (status = 200, description = "Username set", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn set_username(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SetUsernameRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    validate_set_username(&payload)?;

    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    let mut active: user::ActiveModel = user.into();
    active.username = Set(Some(payload.username.trim().to_string()));
    active.update(&state.db).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Username set successfully")),
    ))
}
