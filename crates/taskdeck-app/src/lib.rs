//! Application layer for taskdeck.
//!
//! This crate owns the in-memory task collection and its write-through
//! synchronization with the persistence adapter, plus the user
//! configuration shared by the CLI and TUI front ends.

pub mod board;
pub mod config;

// Re-exports for convenience
pub use board::{Change, StateStore, TaskBoard, TaskDraft};
pub use config::AppConfig;
