//! Horizontal image composition
//!
//! - Layout computation at a shared target height
//! - Rendering and JPEG encoding of the composite

/// Rendering and encoding of the composite image
pub mod compositor;
/// Aspect-preserving side-by-side geometry
pub mod layout;

pub use compositor::{CompositeOptions, CompositeResult, compose, compose_with};
pub use layout::{Dimensions, Layout, PixelSpan, Placement};
