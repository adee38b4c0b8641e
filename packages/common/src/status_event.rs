use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The four time-boundary events the status transition worker understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum StatusEventKind {
    ContestStarted,
    ContestEnded,
    ChallengeStarted,
    ChallengeEnded,
}

impl StatusEventKind {
    /// Returns true for the kinds keyed by a contest id (the other two are
    /// keyed by a challenge id).
    pub fn targets_contest(self) -> bool {
        matches!(self, Self::ContestStarted | Self::ContestEnded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContestStarted => "ContestStarted",
            Self::ContestEnded => "ContestEnded",
            Self::ChallengeStarted => "ChallengeStarted",
            Self::ChallengeEnded => "ChallengeEnded",
        }
    }
}

impl fmt::Display for StatusEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event payload. Exactly one of `contest_id`/`challenge_id` is populated,
/// depending on the event kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEventData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<Uuid>,
    /// The wall-clock boundary instant this event represents. Mutations are
    /// applied only if this is newer than the entity's last-applied
    /// transition, making delivery order and redelivery irrelevant.
    pub effective_at: DateTime<Utc>,
}

/// A named, queued instruction to flip a contest's status or a challenge's
/// active flag. Ephemeral: lives in the queue until consumed, with no
/// persisted copy after processing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Assigned at enqueue time; echoed in the worker's completion notice.
    pub id: Uuid,
    pub name: StatusEventKind,
    pub data: StatusEventData,
}

/// Structural problems with an event payload. These are not retryable:
/// redelivering a payload that is missing its key cannot ever succeed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusEventError {
    #[error("{0} event is missing contestId")]
    MissingContestId(StatusEventKind),
    #[error("{0} event is missing challengeId")]
    MissingChallengeId(StatusEventKind),
}

impl StatusEvent {
    fn new(name: StatusEventKind, data: StatusEventData) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            data,
        }
    }

    pub fn contest_started(contest_id: Uuid, effective_at: DateTime<Utc>) -> Self {
        Self::new(
            StatusEventKind::ContestStarted,
            StatusEventData {
                contest_id: Some(contest_id),
                challenge_id: None,
                effective_at,
            },
        )
    }

    pub fn contest_ended(contest_id: Uuid, effective_at: DateTime<Utc>) -> Self {
        Self::new(
            StatusEventKind::ContestEnded,
            StatusEventData {
                contest_id: Some(contest_id),
                challenge_id: None,
                effective_at,
            },
        )
    }

    pub fn challenge_started(challenge_id: Uuid, effective_at: DateTime<Utc>) -> Self {
        Self::new(
            StatusEventKind::ChallengeStarted,
            StatusEventData {
                contest_id: None,
                challenge_id: Some(challenge_id),
                effective_at,
            },
        )
    }

    pub fn challenge_ended(challenge_id: Uuid, effective_at: DateTime<Utc>) -> Self {
        Self::new(
            StatusEventKind::ChallengeEnded,
            StatusEventData {
                contest_id: None,
                challenge_id: Some(challenge_id),
                effective_at,
            },
        )
    }

    /// Returns the identifier the event's kind is keyed by, or an error if
    /// the payload lacks it.
    pub fn entity_id(&self) -> Result<Uuid, StatusEventError> {
        if self.name.targets_contest() {
            self.data
                .contest_id
                .ok_or(StatusEventError::MissingContestId(self.name))
        } else {
            self.data
                .challenge_id
                .ok_or(StatusEventError::MissingChallengeId(self.name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn contest_event_wire_format() {
        let contest_id: Uuid = "6b9f4b6e-9d9b-4a5e-8f7e-0c6a0d9f1b2c".parse().unwrap();
        let event = StatusEvent::contest_started(contest_id, ts());

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["name"], json!("ContestStarted"));
        assert_eq!(
            value["data"]["contestId"],
            json!("6b9f4b6e-9d9b-4a5e-8f7e-0c6a0d9f1b2c")
        );
        assert_eq!(value["data"]["effectiveAt"], json!("2026-03-01T12:00:00Z"));
        assert!(value["data"].get("challengeId").is_none());
    }

    #[test]
    fn challenge_event_round_trip() {
        let event = StatusEvent::challenge_ended(Uuid::new_v4(), ts());
        let text = serde_json::to_string(&event).unwrap();
        let back: StatusEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn entity_id_follows_the_kind() {
        let contest_id = Uuid::new_v4();
        let challenge_id = Uuid::new_v4();

        let started = StatusEvent::contest_started(contest_id, ts());
        assert_eq!(started.entity_id().unwrap(), contest_id);

        let ended = StatusEvent::challenge_ended(challenge_id, ts());
        assert_eq!(ended.entity_id().unwrap(), challenge_id);
    }

    #[test]
    fn entity_id_rejects_payload_missing_its_key() {
        // A ContestEnded event whose producer populated the wrong field.
        let event: StatusEvent = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "name": "ContestEnded",
            "data": {
                "challengeId": Uuid::new_v4(),
                "effectiveAt": "2026-03-01T12:00:00Z",
            },
        }))
        .unwrap();

        assert_eq!(
            event.entity_id(),
            Err(StatusEventError::MissingContestId(
                StatusEventKind::ContestEnded
            ))
        );
    }
}
