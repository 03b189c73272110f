// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use goldfork_core::GoldforkError;
use tracing::debug;

/// Handle to the SQLite database.
///
/// Migrations run on open, before the async connection is handed out.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path`, applies pragmas,
    /// and runs pending migrations.
    pub async fn open(path: &str) -> Result<Self, GoldforkError> {
        // Migrations use a short-lived blocking connection so refinery's
        // error type never crosses the tokio-rusqlite call boundary.
        let migration_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), GoldforkError> {
            let mut conn =
                rusqlite::Connection::open(&migration_path).map_err(map_sq_err)?;
            crate::migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| GoldforkError::Storage {
            source: Box::new(e),
        })??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_sq_err)?;
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA synchronous=NORMAL;
                 PRAGMA foreign_keys=ON;
                 PRAGMA busy_timeout=5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Returns the shared async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL and closes the connection.
    pub async fn close(&self) -> Result<(), GoldforkError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Maps a tokio-rusqlite error into the storage error variant.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> GoldforkError {
    GoldforkError::Storage {
        source: Box::new(e),
    }
}

fn map_sq_err(e: rusqlite::Error) -> GoldforkError {
    GoldforkError::Storage {
        source: Box::new(e),
    }
}
