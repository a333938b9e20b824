// ABOUTME: Bounded multi-turn intake conversation protocol
// ABOUTME: Session state machine plus the controller that budgets follow-ups and triggers reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! The wellness-check intake protocol
//!
//! A session starts with a fixed welcome message, accepts user turns one at
//! a time, and ends when an assistant reply contains the canonical
//! completion phrase or the follow-up budget runs out. Completion launches
//! detached report synthesis whose outcome is observable through a
//! [`ReportHandle`].

mod controller;
mod session;

pub use controller::{IntakeController, ReportHandle, TurnOutcome};
pub use session::{reply_completes, ConversationSession, SessionState, WELCOME_MESSAGE};
