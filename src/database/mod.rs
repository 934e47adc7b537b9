use crate::config::DatabaseConfig;
use crate::error::{AppError, Result};
use crate::lifecycle::{LifecycleError, OnModuleDestroy, OnModuleInit};
use crate::modules::user::UserEntity;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, DatabaseConnection, DbErr, Schema};

/// Owns the connection pool. Registered as a lifecycle provider so the pool
/// opens before the server starts and closes after it stops.
pub struct Database {
    config: DatabaseConfig,
    connection: Option<DatabaseConnection>,
}

impl Database {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Pool handle. Cheap to clone.
    pub fn connection(&self) -> Result<DatabaseConnection> {
        self.connection
            .clone()
            .ok_or_else(|| AppError::StorageUnavailable("database is not connected".to_string()))
    }

    pub async fn connect(&mut self) -> Result<()> {
        if self.connection.is_some() {
            return Ok(());
        }

        let mut options = ConnectOptions::new(self.config.url.clone());
        options
            .max_connections(self.config.max_connections)
            .sqlx_logging(false);

        let connection = sea_orm::Database::connect(options).await?;
        tracing::info!(
            backend = ?connection.get_database_backend(),
            max_connections = self.config.max_connections,
            "Database: connection pool initialized"
        );

        if self.config.sync_schema {
            sync_schema(&connection).await?;
            tracing::info!("Database: schema synchronized");
        }

        self.connection = Some(connection);
        Ok(())
    }

    pub async fn close(&mut self) -> Result<()> {
        if let Some(connection) = self.connection.take() {
            connection.close().await?;
            tracing::info!("Database: connection pool closed");
        }
        Ok(())
    }
}

/// Create the `users` table when it does not exist yet.
async fn sync_schema(db: &DatabaseConnection) -> std::result::Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(UserEntity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}

#[async_trait]
impl OnModuleInit for Database {
    async fn on_module_init(&mut self) -> std::result::Result<(), LifecycleError> {
        self.connect()
            .await
            .map_err(|e| LifecycleError::init_failed(e.to_string()))
    }
}

#[async_trait]
impl OnModuleDestroy for Database {
    async fn on_module_destroy(&mut self) -> std::result::Result<(), LifecycleError> {
        self.close()
            .await
            .map_err(|e| LifecycleError::shutdown_failed(e.to_string()))
    }
}

/// Fresh in-memory SQLite database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_connection() -> DatabaseConnection {
    let mut database = Database::new(DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        sync_schema: true,
    });
    database.connect().await.unwrap();
    database.connection().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Application;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            sync_schema: true,
        }
    }

    #[test]
    fn test_connection_before_connect_is_unavailable() {
        let database = Database::new(memory_config());
        assert!(!database.is_connected());
        assert!(matches!(
            database.connection(),
            Err(AppError::StorageUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_schema_sync_is_idempotent() {
        let db = test_connection().await;
        sync_schema(&db).await.unwrap();
    }

    #[tokio::test]
    async fn test_lifecycle_opens_and_closes_pool() {
        let database = Arc::new(RwLock::new(Database::new(memory_config())));

        let app = Application::builder()
            .register_lifecycle(Arc::clone(&database), "Database")
            .build()
            .await
            .unwrap();
        assert!(database.read().await.is_connected());

        app.shutdown().await.unwrap();
        assert!(!database.read().await.is_connected());
    }

    #[tokio::test]
    async fn test_bad_url_fails_init() {
        let database = Arc::new(RwLock::new(Database::new(DatabaseConfig::new(
            "unsupported://nowhere",
        ))));

        let result = Application::builder()
            .register_lifecycle(Arc::clone(&database), "Database")
            .build()
            .await;
        assert!(result.is_err());
        assert!(!database.read().await.is_connected());
    }
}
