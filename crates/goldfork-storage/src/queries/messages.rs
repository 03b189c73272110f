// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message CRUD operations.
//!
//! Messages are append-only; there is no update or delete path.

use goldfork_core::GoldforkError;
use rusqlite::params;

use crate::database::Database;
use crate::models::Message;

/// Insert a new message.
pub async fn insert_message(db: &Database, msg: &Message) -> Result<(), GoldforkError> {
    let msg = msg.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_messages (id, session_id, role, content, metadata, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    msg.id,
                    msg.session_id,
                    msg.role,
                    msg.content,
                    msg.metadata,
                    msg.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the most recent `limit` messages for a session, in chronological order.
///
/// The query walks backwards from the newest message and the result is
/// reversed, so the window always ends at the latest turn.
pub async fn get_recent_messages(
    db: &Database,
    session_id: &str,
    limit: i64,
) -> Result<Vec<Message>, GoldforkError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_id, role, content, metadata, created_at
                 FROM chat_messages WHERE session_id = ?1
                 ORDER BY created_at DESC, rowid DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![session_id, limit], |row| {
                Ok(Message {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    role: row.get(2)?,
                    content: row.get(3)?,
                    metadata: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            messages.reverse();
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Session;
    use crate::queries::sessions::create_session;
    use tempfile::tempdir;

    async fn setup_db_with_session() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let session = Session {
            id: "sess-1".to_string(),
            created_at: "2026-08-26T00:00:00+00:00".to_string(),
            updated_at: "2026-08-26T00:00:00+00:00".to_string(),
        };
        create_session(&db, &session).await.unwrap();
        (db, dir)
    }

    fn make_msg(id: &str, role: &str, content: &str, timestamp: &str) -> Message {
        Message {
            id: id.to_string(),
            session_id: "sess-1".to_string(),
            role: role.to_string(),
            content: content.to_string(),
            metadata: None,
            created_at: timestamp.to_string(),
        }
    }

    #[tokio::test]
    async fn recent_messages_are_chronological() {
        let (db, _dir) = setup_db_with_session().await;

        for i in 0..5 {
            let msg = make_msg(
                &format!("m{i}"),
                if i % 2 == 0 { "user" } else { "assistant" },
                &format!("msg {i}"),
                &format!("2026-08-26T00:00:0{i}+00:00"),
            );
            insert_message(&db, &msg).await.unwrap();
        }

        let messages = get_recent_messages(&db, "sess-1", 10).await.unwrap();
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].id, "m0");
        assert_eq!(messages[4].id, "m4");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn window_keeps_the_latest_turns() {
        let (db, _dir) = setup_db_with_session().await;

        for i in 0..12 {
            let msg = make_msg(
                &format!("m{i:02}"),
                "user",
                &format!("msg {i}"),
                &format!("2026-08-26T00:00:{i:02}+00:00"),
            );
            insert_message(&db, &msg).await.unwrap();
        }

        let messages = get_recent_messages(&db, "sess-1", 10).await.unwrap();
        assert_eq!(messages.len(), 10);
        // The two oldest fell out of the window.
        assert_eq!(messages[0].id, "m02");
        assert_eq!(messages[9].id, "m11");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn metadata_round_trips() {
        let (db, _dir) = setup_db_with_session().await;

        let mut msg = make_msg("m-meta", "assistant", "done", "2026-08-26T00:01:00+00:00");
        msg.metadata = Some(r#"{"reservation_id":7}"#.to_string());
        insert_message(&db, &msg).await.unwrap();

        let messages = get_recent_messages(&db, "sess-1", 10).await.unwrap();
        assert_eq!(
            messages[0].metadata.as_deref(),
            Some(r#"{"reservation_id":7}"#)
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn empty_session_yields_no_messages() {
        let (db, _dir) = setup_db_with_session().await;
        let messages = get_recent_messages(&db, "sess-1", 10).await.unwrap();
        assert!(messages.is_empty());
        db.close().await.unwrap();
    }
}
