use axum::Json;
use axum::extract::{Path, State};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::models::challenge::ChallengeResponse;
use crate::models::contest::{ContestDetailResponse, ContestSummary};
use crate::state::AppState;
use store::entity::{challenge, contest};

/// List all contests, soonest first.
#[utoipa::path(
    get,
    path = "/api/v1/contests",
    tag = "Contests",
    operation_id = "listContests",
    responses(
        (status = 200, description = "All contests", body = [ContestSummary]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_contests(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestSummary>>, AppError> {
    let contests = contest::Entity::find()
        .order_by_asc(contest::Column::StartTime)
        .all(&state.db)
        .await?;

    Ok(Json(contests.into_iter().map(Into::into).collect()))
}

/// Fetch one contest with its challenges in position order.
#[utoipa::path(
    get,
    path = "/api/v1/contests/{id}",
    tag = "Contests",
    operation_id = "getContest",
    params(("id" = Uuid, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest details", body = ContestDetailResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(%id))]
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContestDetailResponse>, AppError> {
    let model = contest::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))?;

    let challenges = challenge::Entity::find()
        .filter(challenge::Column::ContestId.eq(id))
        .order_by_asc(challenge::Column::Position)
        .all(&state.db)
        .await?;

    Ok(Json(ContestDetailResponse {
        contest: model.into(),
        challenges: challenges
            .into_iter()
            .map(ChallengeResponse::from)
            .collect(),
    }))
}
