// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::GoldforkError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Message, NewReservation, Reservation, ReservationStatus, Session};

/// Adapter for the durable record store.
///
/// Conversation turns are append-only. Reservations are insert-only except
/// for status and calendar reference, which only the booking orchestrator
/// mutates, and only on the row it just created.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, pragmas).
    async fn initialize(&self) -> Result<(), GoldforkError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), GoldforkError>;

    // --- Session operations ---

    async fn create_session(&self, session: &Session) -> Result<(), GoldforkError>;

    async fn get_session(&self, id: &str) -> Result<Option<Session>, GoldforkError>;

    /// Advances the session's `updated_at` timestamp.
    async fn touch_session(&self, id: &str) -> Result<(), GoldforkError>;

    // --- Message operations ---

    async fn insert_message(&self, message: &Message) -> Result<(), GoldforkError>;

    /// Returns the most recent `limit` messages for a session, in
    /// chronological order.
    async fn get_recent_messages(
        &self,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<Message>, GoldforkError>;

    // --- Reservation operations ---

    /// Inserts a reservation row and returns its autoincremented id.
    async fn insert_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<i64, GoldforkError>;

    async fn get_reservation(&self, id: i64) -> Result<Option<Reservation>, GoldforkError>;

    /// Updates status and calendar reference on an existing reservation.
    async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
        calendar_event_id: Option<&str>,
    ) -> Result<(), GoldforkError>;
}
