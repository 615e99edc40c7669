//! # Core Application Logic
//!
//! This module contains Scout's conversation logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (transcript)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O in the reducer. │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                        ┌────────────────┐
//!     │    TUI     │                        │  Conversation  │
//!     │  Adapter   │                        │   Controller   │
//!     │ (ratatui)  │                        │  (async API)   │
//!     └────────────┘                        └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message`, `Origin` and the append-only `Transcript`
//! - [`state`]: `ConversationState` — transcript, pending input, busy flag
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`controller`]: async `submit()` on top of the reducer
//! - [`config`]: config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod controller;
pub mod message;
pub mod state;
