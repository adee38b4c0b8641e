use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenge")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub contest_id: Uuid,
    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: HasOne<super::contest::Entity>,

    /// Ordering index within the contest.
    pub position: i32,
    pub title: String,
    pub description: String, // in Markdown
    /// Reference to the externally hosted challenge document.
    pub doc_ref: String,

    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,
    pub max_points: i32,

    /// True only within [start_time, end_time), flipped by worker-delivered
    /// events. May lag the boundary until the event is processed.
    pub is_active: bool,
    /// Boundary instant of the last worker-applied flip.
    pub active_changed_at: Option<DateTimeUtc>,

    #[sea_orm(has_many)]
    pub submissions: HasMany<super::submission::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
