//! Downscaled previews and LUT swatches for look browsers.

use image::imageops::{self, FilterType};

use crate::error::GradeError;
use crate::image::PixelBuffer;
use crate::transform::lut::{Lut, apply_lut};

/// Longest side of a look preview, in pixels.
pub const PREVIEW_MAX_DIMENSION: u32 = 300;
/// Edge length of a LUT thumbnail, in pixels.
pub const THUMBNAIL_SIZE: u32 = 100;

/// Mid stop of the thumbnail ramp.
const RAMP_MID_GRAY: f64 = 128.0;

/// Dimensions after fitting the longer side into `max_dimension`.
///
/// Aspect ratio is kept and sizes are rounded. Images never grow, and an
/// image with a zero side is returned as is.
pub fn fit_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let scale = |short: u32, long: u32| -> u32 {
        let scaled = (short as f64 * max_dimension as f64 / long as f64).round() as u32;
        scaled.max(1)
    };

    if width > height {
        if width > max_dimension {
            return (max_dimension, scale(height, width));
        }
    } else if height > max_dimension {
        return (scale(width, height), max_dimension);
    }
    (width, height)
}

/// Downscale `buffer` so its longer side is at most `max_dimension`.
///
/// Returns a copy when the image already fits.
pub fn resize_to_fit(buffer: &PixelBuffer, max_dimension: u32) -> Result<PixelBuffer, GradeError> {
    let (width, height) = (buffer.width(), buffer.height());
    let (new_w, new_h) = fit_dimensions(width, height, max_dimension.max(1));
    if (new_w, new_h) == (width, height) {
        return Ok(buffer.clone());
    }

    let resized = imageops::resize(&buffer.to_rgba_image()?, new_w, new_h, FilterType::Triangle);
    tracing::debug!("resized {width}x{height} -> {new_w}x{new_h}");
    PixelBuffer::from_rgba_image(resized)
}

/// A [`PREVIEW_MAX_DIMENSION`] preview of `buffer` with `lut` applied.
pub fn generate_preview(buffer: &PixelBuffer, lut: &Lut) -> Result<PixelBuffer, GradeError> {
    Ok(apply_lut(&resize_to_fit(buffer, PREVIEW_MAX_DIMENSION)?, lut))
}

/// Swatch showing how `lut` maps a neutral ramp.
///
/// The ramp runs black → mid gray → white along the top-left to bottom-right
/// diagonal; the LUT is applied on top.
pub fn lut_thumbnail(lut: &Lut, size: u32) -> PixelBuffer {
    let mut ramp = PixelBuffer::filled(size, size, [0, 0, 0, 255]);
    if size == 0 {
        return ramp;
    }

    let span = 2.0 * size as f64;
    let width = size as usize;
    for (i, px) in ramp.pixels_mut().iter_mut().enumerate() {
        let (x, y) = (i % width, i / width);
        // Projection of the pixel center onto the diagonal.
        let t = (x + y + 1) as f64 / span;
        let v = ramp_value(t);
        px[0] = v;
        px[1] = v;
        px[2] = v;
    }
    apply_lut(&ramp, lut)
}

fn ramp_value(t: f64) -> u8 {
    let v = if t <= 0.5 {
        RAMP_MID_GRAY * (t / 0.5)
    } else {
        RAMP_MID_GRAY + (255.0 - RAMP_MID_GRAY) * ((t - 0.5) / 0.5)
    };
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::lut::ChannelTransform;

    #[test]
    fn test_fit_dimensions() {
        assert_eq!(fit_dimensions(1200, 800, 300), (300, 200));
        assert_eq!(fit_dimensions(800, 1200, 300), (200, 300));
        assert_eq!(fit_dimensions(1000, 1000, 300), (300, 300));
        assert_eq!(fit_dimensions(200, 100, 300), (200, 100));
        assert_eq!(fit_dimensions(3000, 1, 300), (300, 1));
    }

    #[test]
    fn test_zero_sided_image_is_unchanged() {
        assert_eq!(fit_dimensions(0, 1000, 300), (0, 1000));
        assert_eq!(fit_dimensions(1000, 0, 300), (1000, 0));

        let buf = PixelBuffer::new(0, 1000, Vec::new()).unwrap();
        let out = resize_to_fit(&buf, 300).unwrap();
        assert_eq!((out.width(), out.height()), (0, 1000));
        assert!(out.is_empty());
    }

    #[test]
    fn test_resize_never_upscales() {
        let buf = PixelBuffer::filled(40, 20, [9, 8, 7, 255]);
        assert_eq!(resize_to_fit(&buf, 300).unwrap(), buf);
    }

    #[test]
    fn test_preview_of_flat_image_is_flat() {
        let buf = PixelBuffer::filled(600, 450, [100, 100, 100, 255]);
        let lut = Lut::new(
            "lift",
            ChannelTransform::new(10.0, 1.0),
            ChannelTransform::IDENTITY,
            ChannelTransform::IDENTITY,
        );
        let out = generate_preview(&buf, &lut).unwrap();
        assert_eq!((out.width(), out.height()), (300, 225));
        assert!(out.pixels().iter().all(|px| *px == [110, 100, 100, 255]));
    }

    #[test]
    fn test_thumbnail_ramp_endpoints() {
        let thumb = lut_thumbnail(&Lut::identity("none"), THUMBNAIL_SIZE);
        assert_eq!((thumb.width(), thumb.height()), (100, 100));
        let first = thumb.pixel(0, 0).unwrap();
        let last = thumb.pixel(99, 99).unwrap();
        assert!(first[0] <= 2);
        assert!(last[0] >= 253);
        // The anti-diagonal sits on the mid stop.
        assert_eq!(thumb.pixel(99, 0).unwrap()[0], 128);
    }

    #[test]
    fn test_thumbnail_shows_lut() {
        let warm = crate::presets::find_builtin("Warm").unwrap().lut;
        let plain = lut_thumbnail(&Lut::identity("none"), 16);
        let graded = lut_thumbnail(&warm, 16);
        assert_eq!(graded, apply_lut(&plain, &warm));
    }
}
