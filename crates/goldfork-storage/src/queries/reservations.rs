// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reservation CRUD operations.
//!
//! Rows are insert-only except for status and calendar reference, which the
//! booking orchestrator may update on the row it just created.

use std::str::FromStr;

use goldfork_core::GoldforkError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{NewReservation, Reservation, ReservationStatus};

/// Insert a reservation and return its autoincremented id.
pub async fn insert_reservation(
    db: &Database,
    reservation: &NewReservation,
) -> Result<i64, GoldforkError> {
    let r = reservation.clone();
    let created_at = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reservations
                 (session_id, customer_name, customer_email, customer_phone, party_size,
                  reservation_time, special_requests, status, calendar_event_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    r.session_id,
                    r.customer_name,
                    r.customer_email,
                    r.customer_phone,
                    i64::from(r.party_size),
                    r.reservation_time,
                    r.special_requests,
                    r.status.to_string(),
                    r.calendar_event_id,
                    created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch a reservation by id.
pub async fn get_reservation(
    db: &Database,
    id: i64,
) -> Result<Option<Reservation>, GoldforkError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_id, customer_name, customer_email, customer_phone,
                        party_size, reservation_time, special_requests, status,
                        calendar_event_id, created_at
                 FROM reservations WHERE id = ?1",
            )?;
            let mut rows = stmt.query_map(params![id], map_reservation_row)?;
            Ok(rows.next().transpose()?)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Count reservations stored for a session. Used by tests and diagnostics.
pub async fn count_for_session(db: &Database, session_id: &str) -> Result<i64, GoldforkError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM reservations WHERE session_id = ?1",
                params![session_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update status and calendar reference on an existing reservation.
pub async fn update_reservation_status(
    db: &Database,
    id: i64,
    status: ReservationStatus,
    calendar_event_id: Option<&str>,
) -> Result<(), GoldforkError> {
    let calendar_event_id = calendar_event_id.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE reservations SET status = ?2, calendar_event_id = ?3 WHERE id = ?1",
                params![id, status.to_string(), calendar_event_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn map_reservation_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let party_size: i64 = row.get(5)?;
    let status_raw: String = row.get(8)?;
    let status = ReservationStatus::from_str(&status_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            8,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;
    Ok(Reservation {
        id: row.get(0)?,
        session_id: row.get(1)?,
        customer_name: row.get(2)?,
        customer_email: row.get(3)?,
        customer_phone: row.get(4)?,
        party_size: party_size as u32,
        reservation_time: row.get(6)?,
        special_requests: row.get(7)?,
        status,
        calendar_event_id: row.get(9)?,
        created_at: row.get(10)?,
    })
}
