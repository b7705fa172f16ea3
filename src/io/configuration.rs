//! Composition constants and runtime configuration defaults

use image::Rgba;

// Selection policy enforced by the caller, not the compositor
/// Fewest images accepted for a composition request
pub const MIN_IMAGES: usize = 2;
/// Most images a selection may hold
pub const MAX_IMAGES: usize = 3;

/// JPEG quality used when none is given (matches the usual canvas export default)
pub const DEFAULT_JPEG_QUALITY: u8 = 92;
/// Lowest accepted JPEG quality
pub const MIN_JPEG_QUALITY: u8 = 1;
/// Highest accepted JPEG quality
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Fill for canvas areas not covered by opaque pixels
pub const BACKGROUND_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Baseline JPEG stores dimensions as 16-bit values
/// Largest canvas size along either axis
pub const MAX_JPEG_DIMENSION: u32 = 65_535;

// 2^28 pixels is 1 GiB as RGBA before the RGB copy for encoding
/// Largest canvas area in pixels
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Canvas size above which many viewers refuse to display the result
pub const LARGE_CANVAS_WARNING: u32 = 16_384;

/// Totals closer than this to a whole pixel are treated as that pixel
pub const SUBPIXEL_EPSILON: f64 = 1e-6;

// Output settings
/// Output file name when none is given
pub const DEFAULT_OUTPUT_NAME: &str = "composite.jpg";
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
