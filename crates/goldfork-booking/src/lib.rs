// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking pipeline for the Goldfork reservation agent.
//!
//! Three stages, each its own module:
//!
//! - [`slots`] folds per-turn NLU extractions into the session draft and
//!   decides completeness.
//! - [`availability`] renders a verdict from operating hours and calendar
//!   capacity.
//! - [`orchestrator`] drives a complete draft through availability, the
//!   calendar write, and the durable write, in that order.

pub mod availability;
pub mod orchestrator;
pub mod slots;

pub use availability::AvailabilityChecker;
pub use orchestrator::BookingOrchestrator;
pub use slots::{SlotAggregator, SlotField};
