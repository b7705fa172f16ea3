//! Horizontal image composition at a common height
//!
//! Decoded images are scaled to the tallest input height with their aspect
//! ratios preserved, drawn left to right with no gaps, and encoded as JPEG.

#![forbid(unsafe_code)]

/// Layout, rendering and encoding of the composite
pub mod composition;
/// Input/output operations and error handling
pub mod io;

pub use composition::{CompositeOptions, CompositeResult, Layout, compose, compose_with};
pub use io::error::{CompositionError, Result};
