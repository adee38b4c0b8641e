use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{validate_description, validate_title};
use crate::error::AppError;

/// Challenge fields as supplied by an admin, used both for standalone
/// challenge creation and for the full-set replacement on contest update.
#[derive(Clone, Deserialize, utoipa::ToSchema)]
pub struct ChallengePayload {
    pub position: i32,
    pub title: String,
    pub description: String,
    /// Reference to the externally hosted challenge document.
    pub doc_ref: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_points: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChallengeResponse {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub position: i32,
    pub title: String,
    pub description: String,
    pub doc_ref: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_points: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<store::entity::challenge::Model> for ChallengeResponse {
    fn from(m: store::entity::challenge::Model) -> Self {
        Self {
            id: m.id,
            contest_id: m.contest_id,
            position: m.position,
            title: m.title,
            description: m.description,
            doc_ref: m.doc_ref,
            start_time: m.start_time,
            end_time: m.end_time,
            max_points: m.max_points,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

/// Validate one challenge payload against its contest window.
pub fn validate_challenge(
    payload: &ChallengePayload,
    contest_start: DateTime<Utc>,
    contest_end: DateTime<Utc>,
) -> Result<(), AppError> {
    validate_title(&payload.title)?;
    validate_description(&payload.description)?;
    if payload.doc_ref.trim().is_empty() {
        return Err(AppError::Validation("doc_ref must not be empty".into()));
    }
    if payload.end_time <= payload.start_time {
        return Err(AppError::Validation(
            "Challenge end_time must be after start_time".into(),
        ));
    }
    if payload.start_time < contest_start || payload.end_time > contest_end {
        return Err(AppError::Validation(
            "Challenge window must lie within the contest window".into(),
        ));
    }
    if payload.position < 0 {
        return Err(AppError::Validation("Position must be >= 0".into()));
    }
    if payload.max_points < 0 {
        return Err(AppError::Validation("max_points must be >= 0".into()));
    }
    Ok(())
}
