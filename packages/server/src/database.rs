use std::time::Duration;

use sea_orm::sea_query::{Index, SqliteQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::entity::achievement;

/// Connect and make sure the schema exists.
///
/// Safe to call against a database that is already set up: the table sync
/// only creates what is missing and the indexes use `IF NOT EXISTS`.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("achievement_server::entity::*")
        .sync(&db)
        .await?;
    ensure_indexes(&db).await;

    info!("Database ready");
    Ok(db)
}

/// Secondary indexes for the student lookup and the dashboard filters.
async fn ensure_indexes(db: &DatabaseConnection) {
    let indexes = [
        Index::create()
            .if_not_exists()
            .name("idx_achievement_usn")
            .table(achievement::Entity)
            .col(achievement::Column::Usn)
            .to_string(SqliteQueryBuilder),
        Index::create()
            .if_not_exists()
            .name("idx_achievement_year_event")
            .table(achievement::Entity)
            .col(achievement::Column::Year)
            .col(achievement::Column::EventType)
            .to_string(SqliteQueryBuilder),
    ];

    for stmt in indexes {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index: {}", stmt),
            Err(e) => warn!("Failed to create index ({}): {}", stmt, e),
        }
    }
}
