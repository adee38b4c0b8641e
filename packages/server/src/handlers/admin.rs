//! Admin-only contest management.
//!
//! Every operation is scoped to contests the caller owns; acting on someone
//! else's contest yields 404 rather than 403 to prevent enumeration.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::ContestStatus;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::challenge::{ChallengePayload, ChallengeResponse, validate_challenge};
use crate::models::contest::{
    AdminContestListItem, CreateContestRequest, UpdateContestRequest, ensure_editable,
    validate_create_contest, validate_update_contest,
};
use crate::models::shared::{CreatedResponse, MessageResponse};
use crate::models::submission::SubmissionResponse;
use crate::state::AppState;
use store::entity::{challenge, contest, leaderboard, submission, user};

/// Load a contest if and only if the caller administers it.
async fn find_owned_contest<C: ConnectionTrait>(
    conn: &C,
    contest_id: Uuid,
    auth_user: &AuthUser,
) -> Result<contest::Model, AppError> {
    contest::Entity::find_by_id(contest_id)
        .filter(contest::Column::AdminId.eq(auth_user.user_id))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))
}

fn challenge_active_model(
    id: Uuid,
    contest_id: Uuid,
    payload: &ChallengePayload,
    now: chrono::DateTime<chrono::Utc>,
) -> challenge::ActiveModel {
    challenge::ActiveModel {
        id: Set(id),
        contest_id: Set(contest_id),
        position: Set(payload.position),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description.clone()),
        doc_ref: Set(payload.doc_ref.trim().to_string()),
        start_time: Set(payload.start_time),
        end_time: Set(payload.end_time),
        max_points: Set(payload.max_points),
        // The worker flips this once ChallengeStarted lands.
        is_active: Set(false),
        active_changed_at: Set(None),
        created_at: Set(now),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/contests",
    tag = "Admin",
    operation_id = "createContest",
    request_body = CreateContestRequest,
    responses(
        (status = 201, description = "Contest created", body = CreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContestRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    validate_create_contest(&payload)?;

    let now = chrono::Utc::now();
    let id = Uuid::new_v4();
    let new_contest = contest::ActiveModel {
        id: Set(id),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        start_time: Set(payload.start_time),
        end_time: Set(payload.end_time),
        status: Set(ContestStatus::Scheduled),
        status_changed_at: Set(None),
        admin_id: Set(auth_user.user_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_contest.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Contest created successfully", id)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/contests",
    tag = "Admin",
    operation_id = "listOwnContests",
    responses(
        (status = 200, description = "Own contests with challenge counts", body = [AdminContestListItem]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(admin_id = %auth_user.user_id))]
pub async fn list_own_contests(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminContestListItem>>, AppError> {
    auth_user.require_admin()?;

    let contests = contest::Entity::find()
        .filter(contest::Column::AdminId.eq(auth_user.user_id))
        .order_by_desc(contest::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let ids: Vec<Uuid> = contests.iter().map(|c| c.id).collect();
    let counts: HashMap<Uuid, i64> = if ids.is_empty() {
        HashMap::new()
    } else {
        challenge::Entity::find()
            .select_only()
            .column(challenge::Column::ContestId)
            .column_as(challenge::Column::Id.count(), "count")
            .filter(challenge::Column::ContestId.is_in(ids))
            .group_by(challenge::Column::ContestId)
            .into_tuple::<(Uuid, i64)>()
            .all(&state.db)
            .await?
            .into_iter()
            .collect()
    };

    let items = contests
        .into_iter()
        .map(|c| AdminContestListItem {
            challenge_count: counts.get(&c.id).copied().unwrap_or(0),
            id: c.id,
            title: c.title,
            start_time: c.start_time,
            end_time: c.end_time,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        })
        .collect();

    Ok(Json(items))
}

/// Replace a contest and its full challenge set.
///
/// The edit-lock rejects any change once the contest window has opened.
/// Contest fields and the delete-then-recreate of challenges share one
/// transaction, so readers never observe a half-replaced set.
#[utoipa::path(
    put,
    path = "/api/v1/contests/{id}",
    tag = "Admin",
    operation_id = "updateContest",
    params(("id" = Uuid, Path, description = "Contest ID")),
    request_body = UpdateContestRequest,
    responses(
        (status = 200, description = "Contest updated", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest started or ended (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(%id))]
pub async fn update_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateContestRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.require_admin()?;
    validate_update_contest(&payload)?;

    let model = find_owned_contest(&state.db, id, &auth_user).await?;
    let now = chrono::Utc::now();
    ensure_editable(model.start_time, model.end_time, now)?;

    let txn = state.db.begin().await?;

    let mut active: contest::ActiveModel = model.into();
    active.title = Set(payload.title.trim().to_string());
    active.description = Set(payload.description.clone());
    active.start_time = Set(payload.start_time);
    active.end_time = Set(payload.end_time);
    active.updated_at = Set(now);
    active.update(&txn).await?;

    challenge::Entity::delete_many()
        .filter(challenge::Column::ContestId.eq(id))
        .exec(&txn)
        .await?;

    let replacements: Vec<challenge::ActiveModel> = payload
        .challenges
        .iter()
        .map(|c| challenge_active_model(Uuid::new_v4(), id, c, now))
        .collect();
    if !replacements.is_empty() {
        challenge::Entity::insert_many(replacements)
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;

    Ok(Json(MessageResponse::new("Contest updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/contests/{id}",
    tag = "Admin",
    operation_id = "deleteContest",
    params(("id" = Uuid, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(%id))]
pub async fn delete_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.require_admin()?;
    find_owned_contest(&state.db, id, &auth_user).await?;

    let txn = state.db.begin().await?;

    let challenge_ids: Vec<Uuid> = challenge::Entity::find()
        .select_only()
        .column(challenge::Column::Id)
        .filter(challenge::Column::ContestId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;

    if !challenge_ids.is_empty() {
        submission::Entity::delete_many()
            .filter(submission::Column::ChallengeId.is_in(challenge_ids))
            .exec(&txn)
            .await?;
    }

    leaderboard::Entity::delete_many()
        .filter(leaderboard::Column::ContestId.eq(id))
        .exec(&txn)
        .await?;

    challenge::Entity::delete_many()
        .filter(challenge::Column::ContestId.eq(id))
        .exec(&txn)
        .await?;

    contest::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    Ok(Json(MessageResponse::new("Contest deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/v1/contests/{id}/challenges",
    tag = "Admin",
    operation_id = "createChallenge",
    params(("id" = Uuid, Path, description = "Contest ID")),
    request_body = ChallengePayload,
    responses(
        (status = 201, description = "Challenge created", body = CreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest started or ended (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(%id))]
pub async fn create_challenge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<ChallengePayload>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    let model = find_owned_contest(&state.db, id, &auth_user).await?;

    let now = chrono::Utc::now();
    ensure_editable(model.start_time, model.end_time, now)?;
    validate_challenge(&payload, model.start_time, model.end_time)?;

    let challenge_id = Uuid::new_v4();
    challenge_active_model(challenge_id, id, &payload, now)
        .insert(&state.db)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Challenge created successfully",
            challenge_id,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/contests/{id}/challenges/{challenge_id}",
    tag = "Admin",
    operation_id = "getChallenge",
    params(
        ("id" = Uuid, Path, description = "Contest ID"),
        ("challenge_id" = Uuid, Path, description = "Challenge ID"),
    ),
    responses(
        (status = 200, description = "Challenge details", body = ChallengeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest or challenge not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(%id, %challenge_id))]
pub async fn get_challenge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, challenge_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ChallengeResponse>, AppError> {
    auth_user.require_admin()?;
    find_owned_contest(&state.db, id, &auth_user).await?;

    let model = challenge::Entity::find_by_id(challenge_id)
        .filter(challenge::Column::ContestId.eq(id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge not found".into()))?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/contests/{id}/challenges/{challenge_id}",
    tag = "Admin",
    operation_id = "updateChallenge",
    params(
        ("id" = Uuid, Path, description = "Contest ID"),
        ("challenge_id" = Uuid, Path, description = "Challenge ID"),
    ),
    request_body = ChallengePayload,
    responses(
        (status = 200, description = "Challenge updated", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest or challenge not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest started or ended (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(%id, %challenge_id))]
pub async fn update_challenge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, challenge_id)): Path<(Uuid, Uuid)>,
    AppJson(payload): AppJson<ChallengePayload>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.require_admin()?;
    let contest_model = find_owned_contest(&state.db, id, &auth_user).await?;

    let now = chrono::Utc::now();
    ensure_editable(contest_model.start_time, contest_model.end_time, now)?;
    validate_challenge(&payload, contest_model.start_time, contest_model.end_time)?;

    let model = challenge::Entity::find_by_id(challenge_id)
        .filter(challenge::Column::ContestId.eq(id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge not found".into()))?;

    // is_active and active_changed_at stay untouched; they belong to the
    // status worker.
    let mut active: challenge::ActiveModel = model.into();
    active.position = Set(payload.position);
    active.title = Set(payload.title.trim().to_string());
    active.description = Set(payload.description);
    active.doc_ref = Set(payload.doc_ref.trim().to_string());
    active.start_time = Set(payload.start_time);
    active.end_time = Set(payload.end_time);
    active.max_points = Set(payload.max_points);
    active.update(&state.db).await?;

    Ok(Json(MessageResponse::new("Challenge updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/contests/{id}/challenges/{challenge_id}",
    tag = "Admin",
    operation_id = "deleteChallenge",
    params(
        ("id" = Uuid, Path, description = "Contest ID"),
        ("challenge_id" = Uuid, Path, description = "Challenge ID"),
    ),
    responses(
        (status = 200, description = "Challenge deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest or challenge not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(%id, %challenge_id))]
pub async fn delete_challenge(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, challenge_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.require_admin()?;
    find_owned_contest(&state.db, id, &auth_user).await?;

    let txn = state.db.begin().await?;

    submission::Entity::delete_many()
        .filter(submission::Column::ChallengeId.eq(challenge_id))
        .exec(&txn)
        .await?;

    let result = challenge::Entity::delete_many()
        .filter(challenge::Column::Id.eq(challenge_id))
        .filter(challenge::Column::ContestId.eq(id))
        .exec(&txn)
        .await?;

    if result.rows_affected == 0 {
        txn.rollback().await?;
        return Err(AppError::NotFound("Challenge not found".into()));
    }

    txn.commit().await?;

    Ok(Json(MessageResponse::new("Challenge deleted successfully")))
}

/// Submissions across the contest's challenges, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/contests/{id}/submissions",
    tag = "Admin",
    operation_id = "listContestSubmissions",
    params(("id" = Uuid, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Submissions for the contest", body = [SubmissionResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(%id))]
pub async fn list_submissions(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SubmissionResponse>>, AppError> {
    auth_user.require_admin()?;
    find_owned_contest(&state.db, id, &auth_user).await?;

    let challenge_ids: Vec<Uuid> = challenge::Entity::find()
        .select_only()
        .column(challenge::Column::Id)
        .filter(challenge::Column::ContestId.eq(id))
        .into_tuple()
        .all(&state.db)
        .await?;

    if challenge_ids.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let rows = submission::Entity::find()
        .filter(submission::Column::ChallengeId.is_in(challenge_ids))
        .order_by_desc(submission::Column::CreatedAt)
        .find_also_related(user::Entity)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use common::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;
    use crate::config::{
        AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig,
    };

    fn test_state(db: sea_orm::DatabaseConnection) -> AppState {
        AppState {
            db,
            config: Arc::new(AppConfig {
                server: ServerConfig {
                    host: "127.0.0.1".into(),
                    port: 0,
                    cors: CorsConfig {
                        allow_origins: vec![],
                        max_age: 3600,
                    },
                },
                database: DatabaseConfig { url: String::new() },
                auth: AuthConfig {
                    jwt_secret: "test_secret".into(),
                    login_ticket_ttl_minutes: 15,
                    session_ttl_hours: 24,
                    frontend_url: "http://localhost:5173".into(),
                    backend_url: "http://localhost:3000".into(),
                    admin_email: "admin@example.com".into(),
                },
            }),
        }
    }

    fn admin() -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            email: "admin@example.com".into(),
            role: UserRole::Admin,
        }
    }

    fn update_payload(start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> UpdateContestRequest {
        UpdateContestRequest {
            title: "Spring Open".into(),
            description: "Annual spring contest".into(),
            start_time: start,
            end_time: end,
            challenges: vec![],
        }
    }

    #[tokio::test]
    async fn editing_someone_elses_contest_reads_as_not_found() {
        // The ownership filter returns no row for a foreign contest.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<contest::Model>::new()])
            .into_connection();
        let state = test_state(db);

        let now = Utc::now();
        let result = update_contest(
            admin(),
            axum::extract::State(state.clone()),
            axum::extract::Path(Uuid::new_v4()),
            crate::extractors::json::AppJson(update_payload(
                now + Duration::hours(1),
                now + Duration::hours(2),
            )),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));

        // Only the ownership lookup ran; nothing was mutated.
        let log = state.db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn editing_before_start_replaces_the_challenge_set_atomically() {
        let auth = admin();
        let now = Utc::now();
        let scheduled = contest::Model {
            id: Uuid::new_v4(),
            title: "Spring Open".into(),
            description: "Annual spring contest".into(),
            start_time: now + Duration::hours(1),
            end_time: now + Duration::hours(3),
            status: ContestStatus::Scheduled,
            status_changed_at: None,
            admin_id: auth.user_id,
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
        };
        let updated = contest::Model {
            title: "Spring Open Finals".into(),
            updated_at: now,
            ..scheduled.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // Ownership lookup, then the RETURNING row of the update.
            .append_query_results([vec![scheduled.clone()], vec![updated]])
            // delete_many of the old set, insert_many of the replacement.
            .append_exec_results([
                sea_orm::MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                sea_orm::MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let state = test_state(db);

        let mut payload = update_payload(scheduled.start_time, scheduled.end_time);
        payload.title = "Spring Open Finals".into();
        payload.challenges = vec![ChallengePayload {
            position: 0,
            title: "Warmup round".into(),
            description: "Solve the warmup".into(),
            doc_ref: "doc-1".into(),
            start_time: scheduled.start_time,
            end_time: scheduled.start_time + Duration::hours(1),
            max_points: 100,
        }];

        let result = update_contest(
            auth,
            axum::extract::State(state.clone()),
            axum::extract::Path(scheduled.id),
            crate::extractors::json::AppJson(payload),
        )
        .await;
        assert!(result.is_ok());

        // The ownership lookup runs first, then every mutation shares one
        // transaction: update, wholesale delete, bulk insert.
        let log = state.db.into_transaction_log();
        assert_eq!(log.len(), 2);
        let txn = format!("{:?}", log[1]);
        assert!(txn.contains("BEGIN"));
        assert!(txn.contains(r#"UPDATE \"contest\""#));
        assert!(txn.contains(r#"DELETE FROM \"challenge\""#));
        assert!(txn.contains(r#"INSERT INTO \"challenge\""#));
        assert!(txn.contains("COMMIT"));
    }

    #[tokio::test]
    async fn editing_a_running_contest_conflicts() {
        let auth = admin();
        let now = Utc::now();
        let running = contest::Model {
            id: Uuid::new_v4(),
            title: "Spring Open".into(),
            description: "Annual spring contest".into(),
            start_time: now - Duration::hours(1),
            end_time: now + Duration::hours(1),
            status: ContestStatus::Active,
            status_changed_at: Some(now - Duration::hours(1)),
            admin_id: auth.user_id,
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![running]])
            .into_connection();
        let state = test_state(db);

        let result = update_contest(
            auth,
            axum::extract::State(state.clone()),
            axum::extract::Path(Uuid::new_v4()),
            crate::extractors::json::AppJson(update_payload(
                now + Duration::hours(1),
                now + Duration::hours(2),
            )),
        )
        .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(state.db.into_transaction_log().len(), 1);
    }
}
