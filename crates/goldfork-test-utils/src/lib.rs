// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Goldfork integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock NLU provider with scripted replies
//! - [`MockCalendar`] - Mock calendar with scripted counts and creations
//! - [`MockSearch`] - Mock semantic search serving a fixed snippet set

pub mod mock_calendar;
pub mod mock_provider;
pub mod mock_search;

pub use mock_calendar::MockCalendar;
pub use mock_provider::MockProvider;
pub use mock_search::MockSearch;
