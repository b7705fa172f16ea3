//! Renders decoded images side by side and encodes the result as JPEG

use crate::composition::layout::{Dimensions, Layout};
use crate::io::configuration::{
    BACKGROUND_COLOR, DEFAULT_JPEG_QUALITY, LARGE_CANVAS_WARNING, MAX_CANVAS_PIXELS,
    MAX_JPEG_DIMENSION, MAX_JPEG_QUALITY, MIN_JPEG_QUALITY,
};
use crate::io::error::{CompositionError, Result, invalid_parameter};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, Rgba, RgbaImage};

/// Output encoding settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    /// JPEG quality in `1..=100`
    pub quality: u8,
    /// Colour behind transparent pixels
    pub background: Rgba<u8>,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            background: BACKGROUND_COLOR,
        }
    }
}

impl CompositeOptions {
    /// Default options with the given JPEG quality
    ///
    /// # Errors
    ///
    /// Returns an error if `quality` is outside `1..=100`
    pub fn with_quality(quality: u8) -> Result<Self> {
        if !(MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&quality) {
            return Err(invalid_parameter(
                "quality",
                &quality,
                &format!("must be between {MIN_JPEG_QUALITY} and {MAX_JPEG_QUALITY}"),
            ));
        }
        Ok(Self {
            quality,
            ..Self::default()
        })
    }
}

/// An encoded composite together with the geometry that produced it
#[derive(Debug, Clone)]
pub struct CompositeResult {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    layout: Layout,
}

impl CompositeResult {
    /// Encoded JPEG data
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the encoded JPEG data
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Output width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Layout used to place the inputs
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// MIME type of the encoded data
    pub const fn mime_type(&self) -> &'static str {
        "image/jpeg"
    }

    /// Conventional file extension of the encoded data
    pub const fn extension(&self) -> &'static str {
        "jpg"
    }
}

/// Compose images left to right at a common height using default options
///
/// # Errors
///
/// See [`compose_with`]
pub fn compose(images: &[DynamicImage]) -> Result<CompositeResult> {
    compose_with(images, &CompositeOptions::default())
}

/// Compose images left to right at a common height and encode as JPEG
///
/// Inputs are only read. The output height is the tallest input height and
/// every image keeps its aspect ratio.
///
/// # Errors
///
/// Returns an error if:
/// - `images` is empty
/// - Any image has a zero width or height
/// - The canvas would exceed the JPEG size limit or the pixel budget
/// - JPEG encoding fails
pub fn compose_with(images: &[DynamicImage], options: &CompositeOptions) -> Result<CompositeResult> {
    let (canvas, layout) = render(images, options.background)?;
    let bytes = encode_jpeg(&canvas, options.quality)?;

    Ok(CompositeResult {
        bytes,
        width: canvas.width(),
        height: canvas.height(),
        layout,
    })
}

/// Lay out and draw images onto an opaque canvas without encoding
///
/// # Errors
///
/// Returns an error if the layout cannot be computed or the canvas would
/// exceed the JPEG size limit or the pixel budget. No raster is allocated in
/// any of these cases.
pub fn render(images: &[DynamicImage], background: Rgba<u8>) -> Result<(RgbImage, Layout)> {
    let dimensions: Vec<Dimensions> = images.iter().map(Dimensions::of).collect();
    let layout = Layout::compute(&dimensions)?;
    check_canvas_size(&layout)?;

    let canvas_width = layout.canvas_width();
    let height = layout.target_height();
    log::debug!(
        "composing {} images onto {canvas_width}x{height} canvas (exact width {:.3})",
        layout.len(),
        layout.total_width()
    );

    let mut canvas = RgbaImage::from_pixel(canvas_width, height, background);
    for (image, span) in images.iter().zip(layout.pixel_spans()) {
        let source = image.to_rgba8();
        if source.dimensions() == (span.width, height) {
            imageops::overlay(&mut canvas, &source, i64::from(span.x), 0);
        } else {
            let scaled = imageops::resize(&source, span.width, height, FilterType::Triangle);
            imageops::overlay(&mut canvas, &scaled, i64::from(span.x), 0);
        }
    }

    Ok((DynamicImage::ImageRgba8(canvas).into_rgb8(), layout))
}

/// Encode an RGB raster as JPEG
///
/// # Errors
///
/// Returns an error if the encoder rejects the raster
pub fn encode_jpeg(canvas: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder
            .encode_image(canvas)
            .map_err(|source| CompositionError::Encode { source })?;
    }
    Ok(bytes)
}

fn check_canvas_size(layout: &Layout) -> Result<()> {
    let height = layout.target_height();
    let canvas_width = layout.canvas_width();

    if canvas_width > MAX_JPEG_DIMENSION || height > MAX_JPEG_DIMENSION {
        return Err(CompositionError::CanvasTooLarge {
            width: u64::from(canvas_width),
            height,
            limit: MAX_JPEG_DIMENSION,
        });
    }

    if u64::from(canvas_width) * u64::from(height) > MAX_CANVAS_PIXELS {
        return Err(CompositionError::CanvasBudget {
            width: canvas_width,
            height,
            budget: MAX_CANVAS_PIXELS,
        });
    }

    if canvas_width > LARGE_CANVAS_WARNING || height > LARGE_CANVAS_WARNING {
        log::warn!(
            "composite is {canvas_width}x{height}; many viewers cannot display images larger than {LARGE_CANVAS_WARNING}px"
        );
    }

    Ok(())
}
