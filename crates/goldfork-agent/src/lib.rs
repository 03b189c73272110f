// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation layer for the Goldfork reservation agent.
//!
//! The [`TurnController`] runs one customer utterance through the full
//! pipeline (persist, history, context, NLU, slot merge, booking) and always
//! produces an assistant turn. The [`SessionRegistry`] holds each session's
//! in-flight reservation draft between turns.

pub mod controller;
pub mod registry;

pub use controller::{APOLOGY, AssistantTurn, HISTORY_LIMIT, TurnController};
pub use registry::SessionRegistry;
