use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionUser {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub challenge_id: Uuid,
    pub points: i32,
    pub created_at: DateTime<Utc>,
    pub user: Option<SubmissionUser>,
}

impl From<(store::entity::submission::Model, Option<store::entity::user::Model>)>
    for SubmissionResponse
{
    fn from(
        (submission, user): (
            store::entity::submission::Model,
            Option<store::entity::user::Model>,
        ),
    ) -> Self {
        Self {
            id: submission.id,
            challenge_id: submission.challenge_id,
            points: submission.points,
            created_at: submission.created_at,
            user: user.map(|u| SubmissionUser {
                id: u.id,
                email: u.email,
                username: u.username,
            }),
        }
    }
}
