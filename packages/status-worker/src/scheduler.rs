//! The in-repo enqueuing authority.
//!
//! Production deployments may schedule boundary events externally; this
//! scanner makes the workspace self-sufficient. On every tick it looks for
//! entities whose time boundary has passed but whose flag has not flipped
//! yet, and enqueues the matching event with `effective_at` set to the
//! boundary instant. Publishing the same event again on a later tick is
//! harmless: delivery is at-least-once anyway and the store writes are
//! conditional on logical time.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use common::{ContestStatus, StatusEvent};
use mq::Mq;
use sea_orm::{
    ActiveEnum, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use store::entity::{challenge, contest};

/// Collect the boundary events that are due at `now`.
///
/// A contest past its end is ended regardless of whether it ever became
/// ACTIVE, so `ContestStarted` is only emitted for contests still inside
/// their window.
pub async fn find_due_events<C: ConnectionTrait>(
    conn: &C,
    now: DateTime<Utc>,
) -> Result<Vec<StatusEvent>, DbErr> {
    let mut events = Vec::new();

    let ending = contest::Entity::find()
        .filter(contest::Column::Status.ne(ContestStatus::Ended.to_value()))
        .filter(contest::Column::EndTime.lte(now))
        .all(conn)
        .await?;
    for c in ending {
        events.push(StatusEvent::contest_ended(c.id, c.end_time));
    }

    let starting = contest::Entity::find()
        .filter(contest::Column::Status.eq(ContestStatus::Scheduled.to_value()))
        .filter(contest::Column::StartTime.lte(now))
        .filter(contest::Column::EndTime.gt(now))
        .all(conn)
        .await?;
    for c in starting {
        events.push(StatusEvent::contest_started(c.id, c.start_time));
    }

    let opening = challenge::Entity::find()
        .filter(challenge::Column::IsActive.eq(false))
        .filter(challenge::Column::StartTime.lte(now))
        .filter(challenge::Column::EndTime.gt(now))
        .all(conn)
        .await?;
    for ch in opening {
        events.push(StatusEvent::challenge_started(ch.id, ch.start_time));
    }

    let closing = challenge::Entity::find()
        .filter(challenge::Column::IsActive.eq(true))
        .filter(challenge::Column::EndTime.lte(now))
        .all(conn)
        .await?;
    for ch in closing {
        events.push(StatusEvent::challenge_ended(ch.id, ch.end_time));
    }

    Ok(events)
}

/// Scan-and-enqueue loop. Runs until the surrounding task is aborted.
pub async fn run_boundary_scheduler(
    db: DatabaseConnection,
    mq: Arc<Mq>,
    queue_name: String,
    every: Duration,
) {
    info!(queue = %queue_name, interval_secs = every.as_secs(), "Starting boundary scheduler");

    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let events = match find_due_events(&db, Utc::now()).await {
            Ok(events) => events,
            Err(e) => {
                error!(error = %e, "Boundary scan failed");
                continue;
            }
        };

        for event in events {
            match mq.publish(&queue_name, None, &event, None).await {
                Ok(_) => {
                    debug!(event_id = %event.id, kind = %event.name, "Status event enqueued");
                }
                Err(e) => {
                    // The next tick will pick the boundary up again.
                    warn!(
                        event_id = %event.id,
                        kind = %event.name,
                        error = %e,
                        "Failed to enqueue status event"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::StatusEventKind;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn t(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn contest_row(id: Uuid, status: ContestStatus, start: &str, end: &str) -> contest::Model {
        contest::Model {
            id,
            title: "Spring Open".into(),
            description: "desc".into(),
            start_time: t(start),
            end_time: t(end),
            status,
            status_changed_at: None,
            admin_id: Uuid::new_v4(),
            created_at: t("2026-01-01T00:00:00Z"),
            updated_at: t("2026-01-01T00:00:00Z"),
        }
    }

    fn challenge_row(id: Uuid, active: bool, start: &str, end: &str) -> challenge::Model {
        challenge::Model {
            id,
            contest_id: Uuid::new_v4(),
            position: 0,
            title: "Warmup".into(),
            description: "desc".into(),
            doc_ref: "doc-1".into(),
            start_time: t(start),
            end_time: t(end),
            max_points: 100,
            is_active: active,
            active_changed_at: None,
            created_at: t("2026-01-01T00:00:00Z"),
        }
    }

    #[tokio::test]
    async fn emits_one_event_per_due_boundary() {
        let now = t("2026-03-01T12:00:00Z");
        let ended_id = Uuid::new_v4();
        let started_id = Uuid::new_v4();
        let opened_id = Uuid::new_v4();
        let closed_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![contest_row(
                ended_id,
                ContestStatus::Active,
                "2026-03-01T00:00:00Z",
                "2026-03-01T10:00:00Z",
            )]])
            .append_query_results([vec![contest_row(
                started_id,
                ContestStatus::Scheduled,
                "2026-03-01T11:00:00Z",
                "2026-03-02T00:00:00Z",
            )]])
            .append_query_results([vec![challenge_row(
                opened_id,
                false,
                "2026-03-01T11:30:00Z",
                "2026-03-01T14:00:00Z",
            )]])
            .append_query_results([vec![challenge_row(
                closed_id,
                true,
                "2026-03-01T09:00:00Z",
                "2026-03-01T11:00:00Z",
            )]])
            .into_connection();

        let events = find_due_events(&db, now).await.unwrap();
        assert_eq!(events.len(), 4);

        assert_eq!(events[0].name, StatusEventKind::ContestEnded);
        assert_eq!(events[0].data.contest_id, Some(ended_id));
        assert_eq!(events[0].data.effective_at, t("2026-03-01T10:00:00Z"));

        assert_eq!(events[1].name, StatusEventKind::ContestStarted);
        assert_eq!(events[1].data.contest_id, Some(started_id));
        assert_eq!(events[1].data.effective_at, t("2026-03-01T11:00:00Z"));

        assert_eq!(events[2].name, StatusEventKind::ChallengeStarted);
        assert_eq!(events[2].data.challenge_id, Some(opened_id));

        assert_eq!(events[3].name, StatusEventKind::ChallengeEnded);
        assert_eq!(events[3].data.challenge_id, Some(closed_id));
        assert_eq!(events[3].data.effective_at, t("2026-03-01T11:00:00Z"));
    }

    #[tokio::test]
    async fn quiet_scan_emits_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<contest::Model>::new()])
            .append_query_results([Vec::<contest::Model>::new()])
            .append_query_results([Vec::<challenge::Model>::new()])
            .append_query_results([Vec::<challenge::Model>::new()])
            .into_connection();

        let events = find_due_events(&db, t("2026-03-01T12:00:00Z")).await.unwrap();
        assert!(events.is_empty());
    }
}
