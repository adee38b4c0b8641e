use common::ContestStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub description: String, // in Markdown
    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,

    /// Owned by the status transition worker after creation; moves only
    /// SCHEDULED -> ACTIVE -> ENDED.
    pub status: ContestStatus,
    /// Boundary instant of the last worker-applied transition. Used to drop
    /// stale events delivered late or more than once.
    pub status_changed_at: Option<DateTimeUtc>,

    pub admin_id: Uuid,
    #[sea_orm(belongs_to, from = "admin_id", to = "id")]
    pub admin: HasOne<super::user::Entity>,

    #[sea_orm(has_many)]
    pub challenges: HasMany<super::challenge::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
