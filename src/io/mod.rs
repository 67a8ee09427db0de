//! Input/output boundary: object lists, tables, configuration and the CLI

/// Command-line interface and batch processing
pub mod cli;
/// Engine constants and runtime configuration
pub mod configuration;
/// Error type and path context
pub mod error;
/// JSON object list ingestion
pub mod input;
/// Batch progress display
pub mod progress;
/// Delimited table rendering
pub mod table;
