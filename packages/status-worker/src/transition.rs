use common::{ContestStatus, StatusEvent, StatusEventKind};
use sea_orm::{ConnectionTrait, DbErr};
use store::status::{self, StatusWrite};
use tracing::warn;

/// What became of a consumed event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The mapped write updated a row.
    Applied,
    /// The write matched no row: the event was stale (already applied, or
    /// superseded by a newer boundary) or the entity was deleted.
    Skipped,
    /// The payload lacks the identifier its kind requires. Dropped rather
    /// than redelivered; a malformed event can never succeed.
    Invalid,
}

/// Map an event to its store write and apply it.
///
/// Each kind maps to exactly one single-row mutation:
///
/// | kind             | write                          |
/// |------------------|--------------------------------|
/// | ContestStarted   | contest.status   := ACTIVE     |
/// | ContestEnded     | contest.status   := ENDED      |
/// | ChallengeStarted | challenge.is_active := true    |
/// | ChallengeEnded   | challenge.is_active := false   |
///
/// A `DbErr` propagates to the caller, which leaves the event
/// unacknowledged for queue-default redelivery.
pub async fn apply_status_event<C: ConnectionTrait>(
    conn: &C,
    event: &StatusEvent,
) -> Result<TransitionOutcome, DbErr> {
    let entity_id = match event.entity_id() {
        Ok(id) => id,
        Err(e) => {
            warn!(event_id = %event.id, error = %e, "Dropping malformed status event");
            return Ok(TransitionOutcome::Invalid);
        }
    };

    let effective_at = event.data.effective_at;
    let write = match event.name {
        StatusEventKind::ContestStarted => {
            status::update_contest_status(conn, entity_id, ContestStatus::Active, effective_at)
                .await?
        }
        StatusEventKind::ContestEnded => {
            status::update_contest_status(conn, entity_id, ContestStatus::Ended, effective_at)
                .await?
        }
        StatusEventKind::ChallengeStarted => {
            status::update_challenge_active(conn, entity_id, true, effective_at).await?
        }
        StatusEventKind::ChallengeEnded => {
            status::update_challenge_active(conn, entity_id, false, effective_at).await?
        }
    };

    Ok(match write {
        StatusWrite::Applied => TransitionOutcome::Applied,
        StatusWrite::Skipped => TransitionOutcome::Skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;
    use uuid::Uuid;

    fn ts() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z".parse().unwrap()
    }

    fn mock_db(rows: &[u64]) -> sea_orm::DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(rows.iter().map(|&rows_affected| MockExecResult {
                last_insert_id: 0,
                rows_affected,
            }))
            .into_connection()
    }

    #[tokio::test]
    async fn each_kind_maps_to_one_write() {
        let id = Uuid::new_v4();
        let events = [
            StatusEvent::contest_started(id, ts()),
            StatusEvent::contest_ended(id, ts()),
            StatusEvent::challenge_started(id, ts()),
            StatusEvent::challenge_ended(id, ts()),
        ];

        for event in &events {
            let db = mock_db(&[1]);
            let outcome = apply_status_event(&db, event).await.unwrap();
            assert_eq!(outcome, TransitionOutcome::Applied, "kind {}", event.name);
            assert_eq!(db.into_transaction_log().len(), 1, "kind {}", event.name);
        }
    }

    #[tokio::test]
    async fn exact_redelivery_is_a_noop_not_an_error() {
        let db = mock_db(&[1, 0]);
        let event = StatusEvent::contest_ended(Uuid::new_v4(), ts());

        let first = apply_status_event(&db, &event).await.unwrap();
        let redelivered = apply_status_event(&db, &event).await.unwrap();

        assert_eq!(first, TransitionOutcome::Applied);
        assert_eq!(redelivered, TransitionOutcome::Skipped);
    }

    #[tokio::test]
    async fn malformed_payload_is_dropped_without_touching_the_store() {
        let event: StatusEvent = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "name": "ChallengeStarted",
            "data": { "effectiveAt": "2026-03-01T12:00:00Z" },
        }))
        .unwrap();

        let db = mock_db(&[]);
        let outcome = apply_status_event(&db, &event).await.unwrap();

        assert_eq!(outcome, TransitionOutcome::Invalid);
        assert!(db.into_transaction_log().is_empty());
    }
}
