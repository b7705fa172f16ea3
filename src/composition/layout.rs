//! Side-by-side layout at a shared height
//!
//! Every image is scaled to the tallest input height with its aspect ratio
//! preserved, then placed left to right with no gaps. Geometry is kept as
//! real numbers; [`Layout::pixel_spans`] rasterizes it onto whole columns.

use crate::io::configuration::SUBPIXEL_EPSILON;
use crate::io::error::{CompositionError, Result};
use image::GenericImageView;

/// Pixel dimensions of a decoded source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions from a width and height
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Read the dimensions of any image view
    pub fn of<I: GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    /// Width divided by height
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    const fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Horizontal placement of one image on the composite canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Width after scaling to the target height
    pub scaled_width: f64,
    /// Distance from the left canvas edge
    pub x_offset: f64,
}

impl Placement {
    /// Offset of the first column past this image
    pub fn right_edge(&self) -> f64 {
        self.x_offset + self.scaled_width
    }
}

/// Whole-pixel column range occupied by one image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSpan {
    /// First column
    pub x: u32,
    /// Number of columns
    pub width: u32,
}

/// Geometry of a horizontal composite, derived fresh for every composition
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    target_height: u32,
    placements: Vec<Placement>,
    total_width: f64,
}

impl Layout {
    /// Compute the layout for images of the given dimensions, in order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `dimensions` is empty
    /// - Any image has a zero width or height
    pub fn compute(dimensions: &[Dimensions]) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(CompositionError::EmptyInput);
        }

        if let Some((index, bad)) = dimensions
            .iter()
            .enumerate()
            .find(|(_, dims)| dims.is_degenerate())
        {
            return Err(CompositionError::InvalidImage {
                index,
                width: bad.width,
                height: bad.height,
            });
        }

        let target_height = dimensions.iter().map(|dims| dims.height).max().unwrap_or(0);
        let target = f64::from(target_height);

        let mut x_offset = 0.0;
        let placements = dimensions
            .iter()
            .map(|dims| {
                let scaled_width = target * f64::from(dims.width) / f64::from(dims.height);
                let placement = Placement {
                    scaled_width,
                    x_offset,
                };
                x_offset += scaled_width;
                placement
            })
            .collect();

        Ok(Self {
            target_height,
            placements,
            total_width: x_offset,
        })
    }

    /// Shared output height, the tallest input height
    pub const fn target_height(&self) -> u32 {
        self.target_height
    }

    /// Per-image placements in input order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Exact sum of all scaled widths
    pub const fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Number of images laid out
    pub const fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the layout holds no images (never true for a computed layout)
    pub const fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Canvas width in pixels, the total width rounded up
    ///
    /// Saturates at `u32::MAX`; callers bound the size before allocating.
    pub fn canvas_width(&self) -> u32 {
        snap_to_pixel(self.total_width).ceil() as u32
    }

    /// Rasterize placements onto whole columns
    ///
    /// Every boundary is its offset rounded up, the same way the canvas edge
    /// is derived from the total width, so spans tile the canvas and each
    /// stays within one pixel of its scaled width.
    pub fn pixel_spans(&self) -> Vec<PixelSpan> {
        let canvas_width = self.canvas_width();
        let starts: Vec<u32> = self
            .placements
            .iter()
            .map(|placement| (snap_to_pixel(placement.x_offset).ceil() as u32).min(canvas_width))
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(index, &x)| {
                let end = starts.get(index + 1).copied().unwrap_or(canvas_width);
                PixelSpan {
                    x,
                    width: end.saturating_sub(x),
                }
            })
            .collect()
    }
}

fn snap_to_pixel(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < SUBPIXEL_EPSILON {
        nearest
    } else {
        value
    }
}
