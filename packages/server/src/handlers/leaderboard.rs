use axum::Json;
use axum::extract::{Path, State};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::leaderboard::{LeaderboardEntry, LeaderboardResponse};
use crate::state::AppState;
use store::entity::{contest, leaderboard, user};

/// Rank-ascending leaderboard for a contest.
#[utoipa::path(
    get,
    path = "/api/v1/contests/{id}/leaderboard",
    tag = "Leaderboard",
    operation_id = "getLeaderboard",
    params(("id" = Uuid, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Leaderboard entries", body = LeaderboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(%id))]
pub async fn get_leaderboard(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    contest::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))?;

    let rows = leaderboard::Entity::find()
        .filter(leaderboard::Column::ContestId.eq(id))
        .order_by_asc(leaderboard::Column::Rank)
        .find_also_related(user::Entity)
        .all(&state.db)
        .await?;

    Ok(Json(LeaderboardResponse {
        contest_id: id,
        entries: rows.into_iter().map(LeaderboardEntry::from).collect(),
    }))
}
