use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardUser {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i32,
    pub score: i32,
    pub updated_at: DateTime<Utc>,
    pub user: Option<LeaderboardUser>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardResponse {
    pub contest_id: Uuid,
    pub entries: Vec<LeaderboardEntry>,
}

impl From<(store::entity::leaderboard::Model, Option<store::entity::user::Model>)>
    for LeaderboardEntry
{
    fn from(
        (entry, user): (
            store::entity::leaderboard::Model,
            Option<store::entity::user::Model>,
        ),
    ) -> Self {
        Self {
            rank: entry.rank,
            score: entry.score,
            updated_at: entry.updated_at,
            user: user.map(|u| LeaderboardUser {
                id: u.id,
                email: u.email,
                username: u.username,
            }),
        }
    }
}
