use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

fn connect_options(db_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);

    opt
}

/// Connect and synchronize the schema with the registered entities.
///
/// Only the server calls this; the worker connects with [`connect`] and
/// assumes the schema already exists.
pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(connect_options(db_url)).await?;
    db.get_schema_registry("store::entity::*").sync(&db).await?;

    Ok(db)
}

/// Connect without touching the schema.
pub async fn connect(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(connect_options(db_url)).await
}
