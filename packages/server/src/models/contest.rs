use chrono::{DateTime, Utc};
use common::ContestStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::challenge::{ChallengePayload, ChallengeResponse, validate_challenge};
use super::shared::{validate_description, validate_title};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateContestRequest {
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Full-resource PUT body. The challenge list replaces the contest's
/// existing set wholesale.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateContestRequest {
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub challenges: Vec<ChallengePayload>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContestSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ContestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<store::entity::contest::Model> for ContestSummary {
    fn from(m: store::entity::contest::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            start_time: m.start_time,
            end_time: m.end_time,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContestDetailResponse {
    #[serde(flatten)]
    pub contest: ContestSummary,
    pub challenges: Vec<ChallengeResponse>,
}

/// Admin list row: own contest plus how many challenges it carries.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminContestListItem {
    pub id: Uuid,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ContestStatus,
    pub challenge_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn validate_create_contest(req: &CreateContestRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_description(&req.description)?;
    if req.end_time <= req.start_time {
        return Err(AppError::Validation(
            "end_time must be after start_time".into(),
        ));
    }
    Ok(())
}

pub fn validate_update_contest(req: &UpdateContestRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_description(&req.description)?;
    if req.end_time <= req.start_time {
        return Err(AppError::Validation(
            "end_time must be after start_time".into(),
        ));
    }
    for challenge in &req.challenges {
        validate_challenge(challenge, req.start_time, req.end_time)?;
    }
    Ok(())
}

/// Temporal edit-lock: a contest is editable only before it starts.
///
/// Checked against wall-clock time rather than the status column, so a
/// lagging status event cannot open an edit window the timeline has
/// already closed.
pub fn ensure_editable(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if now >= end_time {
        return Err(AppError::Conflict(
            "Contest has ended and can no longer be edited".into(),
        ));
    }
    if now >= start_time {
        return Err(AppError::Conflict(
            "Contest is currently running and cannot be edited".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    const START: &str = "2026-06-01T10:00:00Z";
    const END: &str = "2026-06-01T18:00:00Z";

    #[test]
    fn editable_before_start() {
        assert!(ensure_editable(t(START), t(END), t("2026-06-01T09:59:59Z")).is_ok());
    }

    #[test]
    fn locked_while_running() {
        let err = ensure_editable(t(START), t(END), t(START)).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = ensure_editable(t(START), t(END), t("2026-06-01T14:00:00Z")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn locked_at_and_after_end() {
        let err = ensure_editable(t(START), t(END), t(END)).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = ensure_editable(t(START), t(END), t("2026-07-01T00:00:00Z")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn inverted_contest_window_is_rejected() {
        let req = CreateContestRequest {
            title: "Spring Open".into(),
            description: "Annual spring contest".into(),
            start_time: t(END),
            end_time: t(START),
        };
        assert!(validate_create_contest(&req).is_err());
    }
}
