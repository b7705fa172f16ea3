//! Everything around the compositor: decoding, selection, CLI and errors

/// Command-line parsing and the composition run
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding and composite output
pub mod image;
/// Progress display
pub mod progress;
/// Ordered image selection with the 2 to 3 image policy
pub mod selection;
