//! Image representation for the grading pipeline.

use ::image::RgbaImage;
use rayon::prelude::*;

use crate::error::GradeError;

/// Pixel count at which per-pixel maps switch to the rayon thread pool.
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// An RGBA8 raster, row-major, 4 bytes per pixel.
///
/// `data.len() == width * height * 4` always holds; every constructor checks it.
/// No stage in this crate ever writes the alpha byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes, rejecting a length that does not match the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, GradeError> {
        let expected = byte_len(width, height);
        if data.len() != expected {
            return Err(GradeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels, `width * height`.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when either dimension is 0.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixels as `[r, g, b, a]` quads. Zero-copy view over the raw bytes.
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }

    /// Mutable view of the pixel quads.
    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Pixel at column `x`, row `y`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels().get(index).copied()
    }

    /// Interleaved RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Wrap an `image` RGBA8 buffer.
    pub fn from_rgba_image(img: RgbaImage) -> Result<Self, GradeError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Copy into an `image` RGBA8 buffer for codecs and resampling.
    pub fn to_rgba_image(&self) -> Result<RgbaImage, GradeError> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or(
            GradeError::BufferSize {
                expected: byte_len(self.width, self.height),
                actual: self.data.len(),
            },
        )
    }

    /// Copy-on-write map over the RGB channels of every pixel.
    ///
    /// Alpha is carried over untouched. Pixels are independent, so large
    /// buffers are split across the rayon pool; the output does not depend
    /// on which path ran.
    pub fn map_rgb<F>(&self, f: F) -> Self
    where
        F: Fn([u8; 3]) -> [u8; 3] + Sync + Send,
    {
        let mut out = self.clone();
        let apply = |px: &mut [u8; 4]| {
            let [r, g, b] = f([px[0], px[1], px[2]]);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        };

        if self.pixel_count() >= PARALLEL_THRESHOLD {
            out.pixels_mut().par_iter_mut().for_each(&apply);
        } else {
            out.pixels_mut().iter_mut().for_each(&apply);
        }
        out
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            GradeError::BufferSize {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_pixel_indexing_is_row_major() {
        let data: Vec<u8> = (0..24).collect();
        let buf = PixelBuffer::new(3, 2, data).unwrap();
        assert_eq!(buf.pixel(0, 0), Some([0, 1, 2, 3]));
        assert_eq!(buf.pixel(2, 0), Some([8, 9, 10, 11]));
        assert_eq!(buf.pixel(0, 1), Some([12, 13, 14, 15]));
        assert_eq!(buf.pixel(3, 0), None);
        assert_eq!(buf.pixel(0, 2), None);
    }

    #[test]
    fn test_map_rgb_keeps_alpha_and_source() {
        let src = PixelBuffer::filled(4, 4, [10, 20, 30, 77]);
        let out = src.map_rgb(|[r, g, b]| [b, g, r]);
        assert!(out.pixels().iter().all(|px| *px == [30, 20, 10, 77]));
        assert!(src.pixels().iter().all(|px| *px == [10, 20, 30, 77]));
    }

    #[test]
    fn test_map_rgb_parallel_matches_sequential() {
        // 256 x 256 crosses the parallel threshold.
        let side = 256u32;
        let data: Vec<u8> = (0..side * side * 4).map(|i| (i % 251) as u8).collect();
        let big = PixelBuffer::new(side, side, data).unwrap();
        let f = |[r, g, b]: [u8; 3]| [r.wrapping_add(1), g / 2, 255 - b];

        let out = big.map_rgb(f);
        for (src, dst) in big.pixels().iter().zip(out.pixels()) {
            let [r, g, b] = f([src[0], src[1], src[2]]);
            assert_eq!(*dst, [r, g, b, src[3]]);
        }
    }

    #[test]
    fn test_rgba_image_conversion_keeps_bytes() {
        let data: Vec<u8> = (0..24).collect();
        let buf = PixelBuffer::new(2, 3, data).unwrap();
        let img = buf.to_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(PixelBuffer::from_rgba_image(img).unwrap(), buf);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = PixelBuffer::new(0, 5, Vec::new()).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.pixel_count(), 0);
        assert!(buf.map_rgb(|c| c).is_empty());
    }
}
