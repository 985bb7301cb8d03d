//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod analysis;
pub mod annotate;
pub mod config;
pub mod summary;
pub mod watch;

// Re-export handlers for convenient access
pub use analysis::{analyze_source, load_record, record_for};
pub use annotate::execute_annotate;
pub use config::{execute_config, render_config};
pub use summary::execute_summary;
pub use watch::execute_watch;
