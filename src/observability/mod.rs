//! Structured logging built on `tracing`.
//!
//! Every layer of the crate emits `tracing` spans and events: one debug span
//! per handled intent, one per spawned fetch, with ticket, generation, page and
//! query as fields. This module installs the subscriber that renders them.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter (rotating) | stderr
//! ```
//!
//! # Features
//!
//! - **Level Filtering**: `RUST_LOG`, else the configured `trace_level`
//! - **Automatic Rotation**: log files rotate at 10MB with 3-backup retention
//! - **Timestamped Backups**: backups are suffixed with the local rotation time
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
