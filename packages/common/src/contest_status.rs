#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a contest.
///
/// Transitions only move forward (`SCHEDULED -> ACTIVE -> ENDED`), driven
/// solely by time-boundary events applied by the status transition worker.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in
/// SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContestStatus {
    /// Created but not yet started.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "SCHEDULED"))]
    Scheduled,
    /// Currently running.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "ACTIVE"))]
    Active,
    /// Finished. Terminal: a contest never leaves this state.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "ENDED"))]
    Ended,
}

impl ContestStatus {
    /// Position in the forward-only lifecycle order.
    fn order(self) -> u8 {
        match self {
            Self::Scheduled => 0,
            Self::Active => 1,
            Self::Ended => 2,
        }
    }

    /// Returns true if this is the terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended)
    }

    /// Returns true if moving from `self` to `next` goes forward in the
    /// lifecycle. Staying in place or moving backward is not an advance.
    pub fn advances_to(self, next: ContestStatus) -> bool {
        next.order() > self.order()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Active => "ACTIVE",
            Self::Ended => "ENDED",
        }
    }

    pub const ALL: &'static [ContestStatus] = &[Self::Scheduled, Self::Active, Self::Ended];
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(Self::Scheduled),
            "ACTIVE" => Ok(Self::Active),
            "ENDED" => Ok(Self::Ended),
            other => Err(format!("unknown contest status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_only_advances_forward() {
        assert!(ContestStatus::Scheduled.advances_to(ContestStatus::Active));
        assert!(ContestStatus::Scheduled.advances_to(ContestStatus::Ended));
        assert!(ContestStatus::Active.advances_to(ContestStatus::Ended));

        assert!(!ContestStatus::Ended.advances_to(ContestStatus::Active));
        assert!(!ContestStatus::Ended.advances_to(ContestStatus::Scheduled));
        assert!(!ContestStatus::Active.advances_to(ContestStatus::Scheduled));
        assert!(!ContestStatus::Active.advances_to(ContestStatus::Active));
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(ContestStatus::Scheduled).unwrap(),
            serde_json::json!("SCHEDULED")
        );
        assert_eq!(
            serde_json::from_str::<ContestStatus>("\"ENDED\"").unwrap(),
            ContestStatus::Ended
        );
    }

    #[test]
    fn round_trips_from_str() {
        for &status in ContestStatus::ALL {
            assert_eq!(status.as_str().parse::<ContestStatus>().unwrap(), status);
        }
        assert!("FINISHED".parse::<ContestStatus>().is_err());
    }
}
