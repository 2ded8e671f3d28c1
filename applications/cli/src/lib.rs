//! Tapedeck CLI Library
//!
//! Terminal host for the Tapedeck player: configuration loading, a simulated
//! audio engine, and the command/event session the binary runs.
//!
//! This library exposes the host components for testing purposes.

pub mod command;
pub mod config;
pub mod error;
pub mod session;
pub mod simulated;

// Re-export commonly used types for convenience
pub use command::{parse_input, Input, HELP};
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use session::{write_track_list, Session};
pub use simulated::SimulatedEngine;
