//! API Module
//!
//! Structure:
//! - commands.rs: operations a presentation layer calls
//! - engine_status.rs: status payloads

pub mod commands;
pub mod engine_status;

// Re-export current version as default
pub use commands::*;
