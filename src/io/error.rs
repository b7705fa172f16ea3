//! Error types for composition, decoding and output operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all composition operations
#[derive(Debug)]
pub enum CompositionError {
    /// No images were supplied to the compositor
    EmptyInput,

    /// An input image has a zero dimension and cannot be scaled
    InvalidImage {
        /// Position of the image in the input sequence
        index: usize,
        /// Reported pixel width
        width: u32,
        /// Reported pixel height
        height: u32,
    },

    /// The composite canvas would exceed what the output encoding can hold
    CanvasTooLarge {
        /// Requested canvas width in pixels
        width: u64,
        /// Requested canvas height in pixels
        height: u32,
        /// Largest permitted size along either axis
        limit: u32,
    },

    /// The composite canvas would hold more pixels than the memory budget allows
    CanvasBudget {
        /// Requested canvas width in pixels
        width: u32,
        /// Requested canvas height in pixels
        height: u32,
        /// Largest permitted pixel count
        budget: u64,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to decode an in-memory image blob
    ImageDecode {
        /// Position of the blob in the input sequence
        index: usize,
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// Failed to encode the composite raster
    Encode {
        /// Underlying encoder error
        source: image::ImageError,
    },

    /// The image selection holds too few or too many images for the operation
    SelectionSize {
        /// Number of images involved
        count: usize,
        /// Minimum accepted number of images
        min: usize,
        /// Maximum accepted number of images
        max: usize,
    },

    /// A selection position does not exist
    SelectionIndex {
        /// Requested position
        index: usize,
        /// Number of images currently selected
        len: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A computation or worker failed without a more specific cause
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "No images supplied for composition"),
            Self::InvalidImage {
                index,
                width,
                height,
            } => {
                write!(
                    f,
                    "Image {index} has invalid dimensions {width}x{height}: both must be positive"
                )
            }
            Self::CanvasTooLarge {
                width,
                height,
                limit,
            } => {
                write!(
                    f,
                    "Composite canvas {width}x{height} exceeds the {limit}px limit"
                )
            }
            Self::CanvasBudget {
                width,
                height,
                budget,
            } => {
                write!(
                    f,
                    "Composite canvas {width}x{height} exceeds the budget of {budget} pixels"
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageDecode { index, source } => {
                write!(f, "Failed to decode image {index}: {source}")
            }
            Self::Encode { source } => write!(f, "Failed to encode composite: {source}"),
            Self::SelectionSize { count, min, max } => {
                write!(
                    f,
                    "Selection holds {count} images but between {min} and {max} are required"
                )
            }
            Self::SelectionIndex { index, len } => {
                write!(
                    f,
                    "Selection position {index} is out of bounds (len: {len})"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for CompositionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. }
            | Self::ImageDecode { source, .. }
            | Self::Encode { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for composition results
pub type Result<T> = std::result::Result<T, CompositionError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CompositionError {
    CompositionError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> CompositionError {
    CompositionError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
