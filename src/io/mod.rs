/// Command-line interface and batch processing
pub mod cli;
/// Constants and runtime configuration
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// PNG slice-stack loading and export
pub mod image;
/// Progress display
pub mod progress;
