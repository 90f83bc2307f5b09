//! Decode/encode boundary between encoded image bytes and [`PixelBuffer`].
//!
//! Decoding supports whatever the `image` crate was built with (PNG and JPEG
//! here). Everything is normalized to RGBA8.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use crate::error::GradeError;
use crate::image::PixelBuffer;

/// Quality used when writing a finished edit.
pub const EDIT_QUALITY: f32 = 0.95;
/// Quality used for downscaled previews.
pub const PREVIEW_QUALITY: f32 = 0.9;

/// Container format for encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy, no alpha channel.
    Jpeg,
    /// Lossless RGBA.
    Png,
}

impl OutputFormat {
    /// PNG for a `.png` extension (any case), JPEG otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Self::Png,
            _ => Self::Jpeg,
        }
    }
}

/// How to encode a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    pub format: OutputFormat,
    /// Lossy quality in `[0, 1]`. Ignored for PNG.
    pub quality: f32,
}

impl EncodeOptions {
    /// JPEG at [`EDIT_QUALITY`].
    pub const fn edit() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: EDIT_QUALITY,
        }
    }

    /// JPEG at [`PREVIEW_QUALITY`].
    pub const fn preview() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: PREVIEW_QUALITY,
        }
    }

    pub const fn png() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: 1.0,
        }
    }

    /// JPEG quality in `1..=100`.
    fn jpeg_quality(&self) -> u8 {
        let q = if self.quality.is_nan() {
            EDIT_QUALITY
        } else {
            self.quality.clamp(0.0, 1.0)
        };
        ((q * 100.0).round() as u8).max(1)
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::edit()
    }
}

/// Decode encoded image bytes, sniffing the format from content.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, GradeError> {
    let img = image::load_from_memory(bytes).map_err(GradeError::Decode)?;
    PixelBuffer::from_rgba_image(img.to_rgba8())
}

/// Read and decode an image file.
pub fn load(path: &Path) -> Result<PixelBuffer, GradeError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Encode `buffer` into a byte vector.
pub fn encode(buffer: &PixelBuffer, options: &EncodeOptions) -> Result<Vec<u8>, GradeError> {
    let (width, height) = (buffer.width(), buffer.height());
    let mut out = Cursor::new(Vec::new());

    match options.format {
        OutputFormat::Png => {
            PngEncoder::new(&mut out)
                .write_image(buffer.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(GradeError::Encode)?;
        }
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(buffer.to_rgba_image()?).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, options.jpeg_quality())
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(GradeError::Encode)?;
        }
    }

    Ok(out.into_inner())
}

/// Encode `buffer` and write it to `path`.
pub fn save(path: &Path, buffer: &PixelBuffer, options: &EncodeOptions) -> Result<(), GradeError> {
    let bytes = encode(buffer, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let data: Vec<u8> = (0..4 * 3 * 4).map(|i| (i * 7) as u8).collect();
        let buf = PixelBuffer::new(4, 3, data).unwrap();
        let bytes = encode(&buf, &EncodeOptions::png()).unwrap();
        assert_eq!(decode(&bytes).unwrap(), buf);
    }

    #[test]
    fn test_jpeg_drops_alpha_keeps_size() {
        let buf = PixelBuffer::filled(16, 8, [120, 60, 30, 10]);
        let bytes = encode(&buf, &EncodeOptions::edit()).unwrap();
        let back = decode(&bytes).unwrap();
        assert_eq!((back.width(), back.height()), (16, 8));
        assert!(back.pixels().iter().all(|px| px[3] == 255));
        // Flat color survives JPEG within a small tolerance.
        let px = back.pixels()[0];
        assert!((px[0] as i32 - 120).abs() <= 3);
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, GradeError::Decode(_)));
        assert!(err.to_string().starts_with("could not read image"));
    }

    #[test]
    fn test_jpeg_quality_mapping() {
        assert_eq!(EncodeOptions::edit().jpeg_quality(), 95);
        assert_eq!(EncodeOptions::preview().jpeg_quality(), 90);
        let low = EncodeOptions {
            format: OutputFormat::Jpeg,
            quality: -1.0,
        };
        assert_eq!(low.jpeg_quality(), 1);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("out.jpg")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), OutputFormat::Jpeg);
    }
}
