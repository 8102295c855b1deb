//! # Core Application Logic
//!
//! This module contains Hamsi's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • SessionController    │
//!                    │                         │
//!                    │  No terminal. No I/O.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │   Tests    │
//!             │  Adapter   │          │ (observer) │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`mode`]: the fixed catalog of conversation modes
//! - [`responder`]: the simulated assistant reply
//! - [`attachment`]: the file staged for the next message
//! - [`conversation`]: the message log and compose cycles
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`session`]: the controller that owns `App` and runs reply timers
//! - [`config`]: layered settings

pub mod action;
pub mod attachment;
pub mod config;
pub mod conversation;
pub mod error;
pub mod mode;
pub mod responder;
pub mod session;
pub mod state;

pub use error::SessionError;
pub use session::{SessionController, SessionObserver};
