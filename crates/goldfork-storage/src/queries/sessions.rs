// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session CRUD operations.

use goldfork_core::GoldforkError;
use rusqlite::params;

use crate::database::Database;
use crate::models::Session;

/// Insert a new session.
pub async fn create_session(db: &Database, session: &Session) -> Result<(), GoldforkError> {
    let session = session.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_sessions (id, created_at, updated_at)
                 VALUES (?1, ?2, ?3)",
                params![session.id, session.created_at, session.updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch a session by id.
pub async fn get_session(db: &Database, id: &str) -> Result<Option<Session>, GoldforkError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, created_at, updated_at FROM chat_sessions WHERE id = ?1",
            )?;
            let mut rows = stmt.query_map(params![id], |row| {
                Ok(Session {
                    id: row.get(0)?,
                    created_at: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            })?;
            Ok(rows.next().transpose()?)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Advance a session's `updated_at` to the given timestamp.
pub async fn touch_session(
    db: &Database,
    id: &str,
    updated_at: &str,
) -> Result<(), GoldforkError> {
    let id = id.to_string();
    let updated_at = updated_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE chat_sessions SET updated_at = ?2 WHERE id = ?1",
                params![id, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_session(id: &str) -> Session {
        Session {
            id: id.to_string(),
            created_at: "2026-08-26T00:00:00+00:00".to_string(),
            updated_at: "2026-08-26T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_get_session() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("s.db").to_str().unwrap())
            .await
            .unwrap();

        create_session(&db, &make_session("sess-1")).await.unwrap();
        let fetched = get_session(&db, "sess-1").await.unwrap().unwrap();
        assert_eq!(fetched.id, "sess-1");

        assert!(get_session(&db, "nope").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn touch_updates_timestamp() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();

        create_session(&db, &make_session("sess-2")).await.unwrap();
        touch_session(&db, "sess-2", "2026-08-26T12:30:00+00:00")
            .await
            .unwrap();
        let fetched = get_session(&db, "sess-2").await.unwrap().unwrap();
        assert_eq!(fetched.updated_at, "2026-08-26T12:30:00+00:00");
        db.close().await.unwrap();
    }
}
