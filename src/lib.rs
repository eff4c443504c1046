pub mod config;
pub mod error;

// Upstream access
pub mod backend;
pub mod github;

// HTTP surface
pub mod api;

// Command-line interface
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
