//! # Boundary Library
//!
//! This library exposes the boundary app modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;

// Re-export boundary_core for convenience
pub use boundary_core;

/// Wall-clock milliseconds since the Unix epoch.
///
/// The core never reads a clock; every timestamp it stores comes from here.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
