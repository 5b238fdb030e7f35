use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Shared by every request. The pool hands each request its own connection;
/// nothing else here is mutable.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}
