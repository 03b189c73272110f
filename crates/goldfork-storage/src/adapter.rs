// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use goldfork_config::model::StorageConfig;
use goldfork_core::types::{Message, NewReservation, Reservation, ReservationStatus, Session};
use goldfork_core::{AdapterType, GoldforkError, HealthStatus, PluginAdapter, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not
    /// initialized.
    fn db(&self) -> Result<&Database, GoldforkError> {
        self.db.get().ok_or_else(|| GoldforkError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, GoldforkError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GoldforkError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), GoldforkError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| GoldforkError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), GoldforkError> {
        self.db()?.close().await
    }

    // --- Session operations ---

    async fn create_session(&self, session: &Session) -> Result<(), GoldforkError> {
        queries::sessions::create_session(self.db()?, session).await
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>, GoldforkError> {
        queries::sessions::get_session(self.db()?, id).await
    }

    async fn touch_session(&self, id: &str) -> Result<(), GoldforkError> {
        let now = chrono::Utc::now().to_rfc3339();
        queries::sessions::touch_session(self.db()?, id, &now).await
    }

    // --- Message operations ---

    async fn insert_message(&self, message: &Message) -> Result<(), GoldforkError> {
        queries::messages::insert_message(self.db()?, message).await
    }

    async fn get_recent_messages(
        &self,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<Message>, GoldforkError> {
        queries::messages::get_recent_messages(self.db()?, session_id, limit).await
    }

    // --- Reservation operations ---

    async fn insert_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<i64, GoldforkError> {
        queries::reservations::insert_reservation(self.db()?, reservation).await
    }

    async fn get_reservation(&self, id: i64) -> Result<Option<Reservation>, GoldforkError> {
        queries::reservations::get_reservation(self.db()?, id).await
    }

    async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
        calendar_event_id: Option<&str>,
    ) -> Result<(), GoldforkError> {
        queries::reservations::update_reservation_status(self.db()?, id, status, calendar_event_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn sqlite_storage_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert!(storage.health_check().await.is_err());
    }

    #[tokio::test]
    async fn full_turn_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        let status = storage.health_check().await.unwrap();
        assert_eq!(status, HealthStatus::Healthy);

        let session = Session {
            id: "sess-adapter-1".to_string(),
            created_at: "2026-08-26T00:00:00+00:00".to_string(),
            updated_at: "2026-08-26T00:00:00+00:00".to_string(),
        };
        storage.create_session(&session).await.unwrap();

        let m1 = Message {
            id: "m1".to_string(),
            session_id: "sess-adapter-1".to_string(),
            role: "user".to_string(),
            content: "book a table for 4".to_string(),
            metadata: None,
            created_at: "2026-08-26T00:00:01+00:00".to_string(),
        };
        let m2 = Message {
            id: "m2".to_string(),
            session_id: "sess-adapter-1".to_string(),
            role: "assistant".to_string(),
            content: "happy to help".to_string(),
            metadata: None,
            created_at: "2026-08-26T00:00:02+00:00".to_string(),
        };
        storage.insert_message(&m1).await.unwrap();
        storage.insert_message(&m2).await.unwrap();

        let messages = storage
            .get_recent_messages("sess-adapter-1", 10)
            .await
            .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");

        let id = storage
            .insert_reservation(&NewReservation {
                session_id: "sess-adapter-1".to_string(),
                customer_name: "Jane Doe".to_string(),
                customer_email: "jane@x.com".to_string(),
                customer_phone: "555-1234".to_string(),
                party_size: 4,
                reservation_time: "2026-08-27T19:00:00+05:00".to_string(),
                special_requests: None,
                status: ReservationStatus::Confirmed,
                calendar_event_id: Some("evt-1".to_string()),
            })
            .await
            .unwrap();
        let fetched = storage.get_reservation(id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ReservationStatus::Confirmed);

        storage.close().await.unwrap();
    }
}
