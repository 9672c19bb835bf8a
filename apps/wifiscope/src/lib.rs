//! # wifiscope Library
//!
//! This library exposes the wifiscope modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod platform;

// Re-export wifiscope_core for convenience
pub use wifiscope_core;
