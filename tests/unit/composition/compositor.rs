//! Tests for rendering, encoding and composite geometry

#[cfg(test)]
mod tests {
    use hconcat::CompositionError;
    use hconcat::composition::compositor::{
        CompositeOptions, compose, compose_with, encode_jpeg, render,
    };
    use hconcat::composition::layout::{Dimensions, Layout};
    use hconcat::io::configuration::{
        BACKGROUND_COLOR, DEFAULT_JPEG_QUALITY, MAX_CANVAS_PIXELS, MAX_JPEG_DIMENSION,
    };
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    // Tests output geometry of the worked example after a JPEG round trip
    // Verified by allocating the canvas at min height
    #[test]
    fn test_compose_two_images_geometry() {
        let images = [solid(100, 50, [255, 0, 0]), solid(80, 100, [0, 0, 255])];

        let result = compose(&images).unwrap();

        assert_eq!(result.width(), 280);
        assert_eq!(result.height(), 100);

        let decoded = image::load_from_memory(result.bytes()).unwrap();
        assert_eq!(decoded.dimensions(), (280, 100));
    }

    // Tests single image composes to its own size
    // Verified by doubling the target height
    #[test]
    fn test_compose_single_image_unscaled() {
        let result = compose(&[solid(100, 50, [10, 200, 30])]).unwrap();

        assert_eq!((result.width(), result.height()), (100, 50));
    }

    // Tests images are drawn in input order from the left edge
    // Verified by drawing images right to left
    #[test]
    fn test_render_draws_in_order() {
        let images = [solid(100, 50, [255, 0, 0]), solid(80, 100, [0, 0, 255])];

        let (canvas, layout) = render(&images, BACKGROUND_COLOR).unwrap();

        assert_eq!(layout.target_height(), 100);
        assert_eq!(canvas.dimensions(), (280, 100));
        assert_eq!(canvas.get_pixel(10, 50), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(190, 90), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(210, 10), &Rgb([0, 0, 255]));
        assert_eq!(canvas.get_pixel(279, 99), &Rgb([0, 0, 255]));
    }

    // Tests upscaled image covers its full span with no background showing
    // Verified by drawing the image at its original size
    #[test]
    fn test_render_scaled_image_fills_span() {
        let images = [solid(10, 10, [0, 255, 0]), solid(5, 40, [0, 0, 0])];

        let (canvas, _layout) = render(&images, BACKGROUND_COLOR).unwrap();

        assert_eq!(canvas.dimensions(), (45, 40));
        assert_eq!(canvas.get_pixel(39, 39), &Rgb([0, 255, 0]));
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([0, 255, 0]));
    }

    // Tests transparent pixels show the background colour
    // Verified by converting inputs to RGB without blending
    #[test]
    fn test_render_blends_transparency_over_background() {
        let clear = DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 0])));
        let opaque = solid(20, 20, [0, 0, 0]);

        let (canvas, _layout) = render(&[clear, opaque], Rgba([255, 255, 255, 255])).unwrap();

        assert_eq!(canvas.get_pixel(5, 5), &Rgb([255, 255, 255]));
        assert_eq!(canvas.get_pixel(25, 5), &Rgb([0, 0, 0]));
    }

    // Tests colours survive lossy encoding closely enough to tell images apart
    // Verified by encoding only the first image
    #[test]
    fn test_compose_preserves_image_colors() {
        let images = [solid(64, 64, [250, 0, 0]), solid(64, 64, [0, 0, 250])];

        let result = compose(&images).unwrap();
        let decoded = image::load_from_memory(result.bytes()).unwrap().to_rgb8();

        let left = decoded.get_pixel(20, 32);
        let right = decoded.get_pixel(100, 32);
        assert!(left[0] > 200 && left[2] < 50, "left pixel {left:?}");
        assert!(right[2] > 200 && right[0] < 50, "right pixel {right:?}");
    }

    // Tests repeated composition yields identical geometry
    // Verified by carrying state between calls
    #[test]
    fn test_compose_is_idempotent() {
        let images = [
            solid(30, 20, [1, 2, 3]),
            solid(40, 50, [4, 5, 6]),
            solid(25, 35, [7, 8, 9]),
        ];

        let first = compose(&images).unwrap();
        let second = compose(&images).unwrap();

        assert_eq!(first.width(), second.width());
        assert_eq!(first.height(), second.height());
        assert_eq!(first.layout(), second.layout());
    }

    // Tests zero-height input is rejected before anything is drawn
    // Verified by skipping validation in render
    #[test]
    fn test_compose_rejects_zero_height() {
        let images = [solid(10, 10, [0, 0, 0]), DynamicImage::new_rgb8(10, 0)];

        assert!(matches!(
            compose(&images),
            Err(CompositionError::InvalidImage { index: 1, .. })
        ));
    }

    // Tests empty input is rejected
    // Verified by returning a 0x0 canvas
    #[test]
    fn test_compose_rejects_empty_input() {
        assert!(matches!(compose(&[]), Err(CompositionError::EmptyInput)));
    }

    // Tests canvases beyond the JPEG limit are refused before allocation
    // Verified by removing the size check
    #[test]
    fn test_compose_rejects_oversized_canvas() {
        // 1x1 scaled to 70000 tall becomes 70000 wide
        let images = [solid(1, 1, [0, 0, 0]), DynamicImage::new_luma8(1, 70_000)];

        assert!(matches!(
            compose(&images),
            Err(CompositionError::CanvasTooLarge { height: 70_000, .. })
        ));
    }

    // Tests the reported width is the rasterized canvas width that was checked
    // Verified by reporting the raw total width
    #[test]
    fn test_oversized_canvas_reports_canvas_width() {
        let images = [DynamicImage::new_luma8(1, 70_000), solid(1, 1, [0, 0, 0])];
        let dimensions: Vec<Dimensions> = images.iter().map(Dimensions::of).collect();
        let expected = Layout::compute(&dimensions).unwrap().canvas_width();

        match compose(&images) {
            Err(CompositionError::CanvasTooLarge { width, limit, .. }) => {
                assert_eq!(width, u64::from(expected));
                assert_eq!(width, 70_001);
                assert_eq!(limit, MAX_JPEG_DIMENSION);
            }
            other => unreachable!("expected CanvasTooLarge, got {other:?}"),
        }
    }

    // Tests a canvas within the axis limit but over the pixel budget is refused
    // Verified by checking only the per-axis JPEG limit
    #[test]
    fn test_compose_rejects_canvas_over_pixel_budget() {
        // 1x1 beside 1x40000 makes a 40001x40000 canvas
        let images = [solid(1, 1, [0, 0, 0]), DynamicImage::new_luma8(1, 40_000)];

        match render(&images, BACKGROUND_COLOR) {
            Err(CompositionError::CanvasBudget {
                width,
                height,
                budget,
            }) => {
                assert_eq!((width, height), (40_001, 40_000));
                assert_eq!(budget, MAX_CANVAS_PIXELS);
                assert!(u64::from(width) * u64::from(height) > budget);
            }
            other => unreachable!("expected CanvasBudget, got {other:?}"),
        }
    }

    // Tests default options use the documented quality and background
    // Verified by changing default quality
    #[test]
    fn test_default_options() {
        let options = CompositeOptions::default();

        assert_eq!(options.quality, DEFAULT_JPEG_QUALITY);
        assert_eq!(options.background, BACKGROUND_COLOR);
    }

    // Tests quality validation bounds
    // Verified by accepting zero quality
    #[test]
    fn test_with_quality_bounds() {
        assert!(CompositeOptions::with_quality(1).is_ok());
        assert!(CompositeOptions::with_quality(100).is_ok());
        assert!(matches!(
            CompositeOptions::with_quality(0),
            Err(CompositionError::InvalidParameter {
                parameter: "quality",
                ..
            })
        ));
        assert!(CompositeOptions::with_quality(101).is_err());
    }

    // Tests lower quality produces smaller output
    // Verified by ignoring the quality option
    #[test]
    fn test_quality_affects_size() {
        let mut gradient = RgbImage::new(128, 128);
        for (x, y, pixel) in gradient.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 2) as u8, (y * 2) as u8, ((x + y) % 256) as u8]);
        }
        let images = [DynamicImage::ImageRgb8(gradient), solid(64, 64, [9, 9, 9])];

        let low = compose_with(&images, &CompositeOptions::with_quality(10).unwrap()).unwrap();
        let high = compose_with(&images, &CompositeOptions::with_quality(95).unwrap()).unwrap();

        assert!(low.bytes().len() < high.bytes().len());
    }

    // Tests result metadata describes JPEG output
    // Verified by reporting PNG metadata
    #[test]
    fn test_result_metadata() {
        let result = compose(&[solid(4, 4, [0, 0, 0])]).unwrap();

        assert_eq!(result.mime_type(), "image/jpeg");
        assert_eq!(result.extension(), "jpg");
        assert_eq!(result.layout().len(), 1);

        let bytes = result.into_bytes();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    // Tests direct encoding produces a decodable JPEG
    // Verified by returning raw pixels
    #[test]
    fn test_encode_jpeg_roundtrip_dimensions() {
        let canvas = RgbImage::from_pixel(17, 9, Rgb([128, 64, 32]));

        let bytes = encode_jpeg(&canvas, 80).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();

        assert_eq!(decoded.dimensions(), (17, 9));
    }
}
