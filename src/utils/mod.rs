//! Utility functions and helpers for the places client.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and API-key redaction.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
