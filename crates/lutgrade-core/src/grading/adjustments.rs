//! Slider-based tonal adjustments (brightness, contrast, temperature, tint,
//! saturation, vibrance).
//!
//! Channels are 8-bit code values carried as `f64`. Steps run in a fixed
//! order and only the final result is clamped, so intermediate values may
//! leave `[0, 255]`.

use crate::image::PixelBuffer;
use crate::transform::lut::store_channel;
use crate::transform::params::AdjustmentSet;

/// Red/green push per unit of warm temperature.
const WARM_RED: f64 = 30.0;
const WARM_GREEN: f64 = 15.0;
/// Blue push per unit of cool temperature.
const COOL_BLUE: f64 = 30.0;
/// Green push per unit of positive tint.
const TINT_GREEN: f64 = 30.0;
/// Red and blue push per unit of negative (magenta) tint.
const TINT_MAGENTA: f64 = 15.0;

/// Slider values mapped to the factors the per-pixel steps consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentFactors {
    /// `1 + brightness / 100`.
    pub brightness: f64,
    /// `1 + contrast / 100`.
    pub contrast: f64,
    /// `1 + saturation / 100`.
    pub saturation: f64,
    /// `temperature / 100`.
    pub temperature: f64,
    /// `tint / 100`.
    pub tint: f64,
    /// `vibrance / 100`.
    pub vibrance: f64,
}

impl From<&AdjustmentSet> for AdjustmentFactors {
    fn from(set: &AdjustmentSet) -> Self {
        Self {
            brightness: 1.0 + set.brightness / 100.0,
            contrast: 1.0 + set.contrast / 100.0,
            saturation: 1.0 + set.saturation / 100.0,
            temperature: set.temperature / 100.0,
            tint: set.tint / 100.0,
            vibrance: set.vibrance / 100.0,
        }
    }
}

/// Apply every adjustment in `set` to `buffer`, returning a new buffer.
///
/// Values are expected in `[-100, 100]` and are not re-clamped here. A neutral
/// set yields an unmodified copy. Alpha is never touched.
pub fn apply_adjustments(buffer: &PixelBuffer, set: &AdjustmentSet) -> PixelBuffer {
    if set.is_neutral() {
        return buffer.clone();
    }

    let factors = AdjustmentFactors::from(set);
    buffer.map_rgb(|[r, g, b]| {
        let out = adjust_rgb([r as f64, g as f64, b as f64], &factors);
        [
            store_channel(out[0]),
            store_channel(out[1]),
            store_channel(out[2]),
        ]
    })
}

/// Run the full adjustment chain on one pixel, unclamped.
///
/// Order matters and is fixed:
/// 1. Brightness
/// 2. Contrast
/// 3. Temperature
/// 4. Tint
/// 5. Saturation
/// 6. Vibrance
pub fn adjust_rgb(rgb: [f64; 3], factors: &AdjustmentFactors) -> [f64; 3] {
    let rgb = apply_brightness(rgb, factors.brightness);
    let rgb = apply_contrast(rgb, factors.contrast);
    let rgb = apply_temperature(rgb, factors.temperature);
    let rgb = apply_tint(rgb, factors.tint);
    let rgb = apply_saturation(rgb, factors.saturation);
    apply_vibrance(rgb, factors.vibrance)
}

/// Scale every channel by `factor`.
pub fn apply_brightness(rgb: [f64; 3], factor: f64) -> [f64; 3] {
    rgb.map(|c| c * factor)
}

/// Stretch channels away from mid-gray.
///
/// ```text
/// out = ((in / 255 − 0.5) × factor + 0.5) × 255
/// ```
pub fn apply_contrast(rgb: [f64; 3], factor: f64) -> [f64; 3] {
    rgb.map(|c| ((c / 255.0 - 0.5) * factor + 0.5) * 255.0)
}

/// Shift along the blue-yellow axis.
///
/// Positive `temperature` adds red and half as much green; zero or negative
/// adds blue.
pub fn apply_temperature(rgb: [f64; 3], temperature: f64) -> [f64; 3] {
    let [mut r, mut g, mut b] = rgb;
    if temperature > 0.0 {
        r += temperature * WARM_RED;
        g += temperature * WARM_GREEN;
    } else {
        b += temperature.abs() * COOL_BLUE;
    }
    [r, g, b]
}

/// Shift along the green-magenta axis.
///
/// Positive `tint` adds green; zero or negative adds red and blue equally.
pub fn apply_tint(rgb: [f64; 3], tint: f64) -> [f64; 3] {
    let [mut r, mut g, mut b] = rgb;
    if tint > 0.0 {
        g += tint * TINT_GREEN;
    } else {
        r += tint.abs() * TINT_MAGENTA;
        b += tint.abs() * TINT_MAGENTA;
    }
    [r, g, b]
}

/// Scale each channel's distance from the pixel mean.
///
/// ```text
/// avg = (r + g + b) / 3
/// out = avg + factor × (in − avg)
/// ```
pub fn apply_saturation(rgb: [f64; 3], factor: f64) -> [f64; 3] {
    let avg = mean(rgb);
    rgb.map(|c| avg + factor * (c - avg))
}

/// Saturation boost that fades out as the pixel is already saturated.
///
/// ```text
/// sat    = (max − min) / max        (0 when max == 0)
/// factor = 1 + vibrance × (1 − sat)
/// out    = avg + factor × (in − avg)
/// ```
///
/// A gray pixel has no spread and is left as is for any `vibrance`.
pub fn apply_vibrance(rgb: [f64; 3], vibrance: f64) -> [f64; 3] {
    let avg = mean(rgb);
    let max_c = rgb[0].max(rgb[1]).max(rgb[2]);
    let min_c = rgb[0].min(rgb[1]).min(rgb[2]);
    let sat_level = if max_c == 0.0 {
        0.0
    } else {
        (max_c - min_c) / max_c
    };
    let factor = 1.0 + vibrance * (1.0 - sat_level);
    rgb.map(|c| avg + factor * (c - avg))
}

fn mean(rgb: [f64; 3]) -> f64 {
    (rgb[0] + rgb[1] + rgb[2]) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::params::AdjustmentKind;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_fractional_sliders_reach_factors_exactly() {
        let set = AdjustmentSet::default()
            .with(AdjustmentKind::Brightness, 12.3)
            .with(AdjustmentKind::Tint, -0.1);
        let factors = AdjustmentFactors::from(&set);
        assert_eq!(factors.brightness, 1.0 + 12.3 / 100.0);
        assert_eq!(factors.tint, -0.1 / 100.0);
    }

    fn grade_pixel(rgba: [u8; 4], set: &AdjustmentSet) -> [u8; 4] {
        let buf = PixelBuffer::filled(1, 1, rgba);
        apply_adjustments(&buf, set).pixels()[0]
    }

    #[test]
    fn test_neutral_set_is_identity() {
        let data: Vec<u8> = (0..64u8).flat_map(|v| [v * 4, 255 - v, v, v ^ 0x5a]).collect();
        let buf = PixelBuffer::new(8, 8, data).unwrap();
        assert_eq!(apply_adjustments(&buf, &AdjustmentSet::default()), buf);
    }

    #[test]
    fn test_brightness_clamps_at_white() {
        let set = AdjustmentSet::default().with(AdjustmentKind::Brightness, 100.0);
        let out = grade_pixel([250, 10, 0, 255], &set);
        assert_eq!(out, [255, 20, 0, 255]);
    }

    #[test]
    fn test_contrast_pivots_on_mid_gray() {
        let out = apply_contrast([127.5, 100.0, 200.0], 1.5);
        assert!((out[0] - 127.5).abs() < EPSILON);
        assert!((out[1] - 86.25).abs() < EPSILON);
        assert!((out[2] - 236.25).abs() < EPSILON);

        let set = AdjustmentSet::default().with(AdjustmentKind::Contrast, 50.0);
        assert_eq!(grade_pixel([100, 150, 200, 9], &set), [86, 161, 236, 9]);
    }

    #[test]
    fn test_temperature_warm_and_cool() {
        assert_eq!(apply_temperature([0.0; 3], 0.5), [15.0, 7.5, 0.0]);
        assert_eq!(apply_temperature([0.0; 3], -0.5), [0.0, 0.0, 15.0]);

        // 107.5 rounds half to even.
        let set = AdjustmentSet::default().with(AdjustmentKind::Temperature, 50.0);
        assert_eq!(grade_pixel([100, 100, 100, 255], &set), [115, 108, 100, 255]);
    }

    #[test]
    fn test_tint_green_and_magenta() {
        assert_eq!(apply_tint([0.0; 3], 1.0), [0.0, 30.0, 0.0]);
        assert_eq!(apply_tint([0.0; 3], -1.0), [15.0, 0.0, 15.0]);
    }

    #[test]
    fn test_saturation_minus_100_is_gray() {
        let set = AdjustmentSet::default().with(AdjustmentKind::Saturation, -100.0);
        assert_eq!(grade_pixel([90, 120, 150, 1], &set), [120, 120, 120, 1]);
    }

    #[test]
    fn test_vibrance_gray_pixel_unchanged() {
        for vibrance in [-100.0, -37.0, 0.0, 55.0, 100.0] {
            let set = AdjustmentSet::default().with(AdjustmentKind::Vibrance, vibrance);
            assert_eq!(grade_pixel([128, 128, 128, 255], &set), [128, 128, 128, 255]);
        }
    }

    #[test]
    fn test_vibrance_black_pixel_guarded() {
        let out = apply_vibrance([0.0, 0.0, 0.0], 1.0);
        assert_eq!(out, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_vibrance_favors_muted_pixels() {
        // sat = 0.5 -> factor 1.5
        let muted = apply_vibrance([200.0, 100.0, 100.0], 1.0);
        let avg = 400.0 / 3.0;
        assert!((muted[0] - (avg + 1.5 * (200.0 - avg))).abs() < EPSILON);
        assert!((muted[1] - (avg + 1.5 * (100.0 - avg))).abs() < EPSILON);

        // Fully saturated pixel: sat = 1 -> factor 1
        let vivid = apply_vibrance([255.0, 0.0, 0.0], 1.0);
        for i in 0..3 {
            assert!((vivid[i] - [255.0, 0.0, 0.0][i]).abs() < EPSILON);
        }
    }

    #[test]
    fn test_only_final_result_is_clamped() {
        // Brightness overshoots to 510 before contrast pulls it back down.
        let set = AdjustmentSet::default()
            .with(AdjustmentKind::Brightness, 100.0)
            .with(AdjustmentKind::Contrast, -100.0);
        let out = grade_pixel([255, 255, 255, 255], &set);
        assert_eq!(out, [128, 128, 128, 255]);
    }

    #[test]
    fn test_input_buffer_is_not_modified() {
        let buf = PixelBuffer::filled(2, 2, [40, 80, 120, 200]);
        let set = AdjustmentSet::default().with(AdjustmentKind::Saturation, 60.0);
        let out = apply_adjustments(&buf, &set);
        assert_ne!(out, buf);
        assert!(buf.pixels().iter().all(|px| *px == [40, 80, 120, 200]));
    }
}
