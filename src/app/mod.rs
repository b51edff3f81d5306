//! Application layer coordinating state, intents, and commands.
//!
//! This module defines the list and detail state machines. It sits between the
//! store (which owns state and runs commands) and the domain types, and
//! performs no I/O itself.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! UI → Intents → Intent Handler → State Mutations → Commands → Coordinator
//!                     ↑                                            ↓
//!                     └─────────── Fetch Outcomes / Timers ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Commands emitted by the intent handler
//! - [`detail`]: Movie detail state and its transition function
//! - [`handler`]: List intent processing and state transitions
//! - [`modes`]: Loading phase and sort option types
//! - [`sorting`]: Display ordering and year extraction
//! - [`state`]: List state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use movieflix_core::app::{handle_intent, Intent, ListState};
//!
//! let mut state = ListState::default();
//! let (changed, command) = handle_intent(&mut state, Intent::Appeared);
//! assert!(changed && command.is_some());
//! ```

pub mod actions;
pub mod detail;
pub mod handler;
pub mod modes;
pub mod sorting;
pub mod state;

pub use actions::Command;
pub use detail::{handle_detail_intent, DetailCommand, DetailIntent, DetailState};
pub use handler::{handle_intent, Intent};
pub use modes::{LoadingPhase, SortOption};
pub use state::ListState;
