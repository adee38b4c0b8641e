use common::UserRole;
use sea_orm::*;
use tracing::info;
use uuid::Uuid;

use store::entity::user;

/// Ensure the configured admin account exists.
///
/// Safe to run on every startup; the unique email constraint makes the
/// insert a no-op once the account is present.
pub async fn seed_admin_user(db: &DatabaseConnection, email: &str) -> Result<(), DbErr> {
    let model = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_lowercase()),
        username: Set(None),
        role: Set(UserRole::Admin),
        created_at: Set(chrono::Utc::now()),
    };

    let result = user::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => {
            info!(email = %email, "Seeded admin user");
            Ok(())
        }
        Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}
