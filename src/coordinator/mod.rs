//! Asynchronous execution of list commands.
//!
//! This module runs the side effects the transition function describes: page
//! fetches against the injected service and the search debounce timer. Results
//! flow back to the store as intents over an unbounded channel.
//!
//! # Architecture
//!
//! - `messages`: request tickets and fetch outcomes
//! - `handler`: the [`FetchCoordinator`] task runner

pub mod handler;
pub mod messages;

pub use handler::FetchCoordinator;
pub use messages::{FetchOutcome, FetchRequest, FetchTicket};
