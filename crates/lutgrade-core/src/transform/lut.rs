//! Per-channel LUT model and its application.
//!
//! A `Lut` here is not a 3D lookup table: each of R, G, B gets an independent
//! affine map `out = offset + in × factor` over 8-bit values. Imported `.cube`
//! and `.3dl` files are reduced to this model (see [`crate::lut_import`]).

use serde::{Deserialize, Serialize};

use crate::image::PixelBuffer;

/// Affine map for one color channel, in 8-bit code values.
///
/// `offset` is typically in `[-255, 255]` and `factor` in `[0, 2]`. Channel math
/// runs in double precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelTransform {
    pub offset: f64,
    pub factor: f64,
}

impl ChannelTransform {
    /// `offset = 0`, `factor = 1`.
    pub const IDENTITY: Self = Self::new(0.0, 1.0);

    pub const fn new(offset: f64, factor: f64) -> Self {
        Self { offset, factor }
    }

    /// Map one channel value, clamped to `[0, 255]`.
    pub fn apply(&self, value: u8) -> u8 {
        let out = self.offset + value as f64 * self.factor;
        store_channel(out)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for ChannelTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A named look: one [`ChannelTransform`] per color channel.
///
/// The name is for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lut {
    pub name: String,
    pub r: ChannelTransform,
    pub g: ChannelTransform,
    pub b: ChannelTransform,
}

impl Lut {
    pub fn new(
        name: impl Into<String>,
        r: ChannelTransform,
        g: ChannelTransform,
        b: ChannelTransform,
    ) -> Self {
        Self {
            name: name.into(),
            r,
            g,
            b,
        }
    }

    /// A LUT that leaves every pixel unchanged.
    pub fn identity(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ChannelTransform::IDENTITY,
            ChannelTransform::IDENTITY,
            ChannelTransform::IDENTITY,
        )
    }

    pub fn is_identity(&self) -> bool {
        self.channels().iter().all(ChannelTransform::is_identity)
    }

    /// Transforms in R, G, B order.
    pub fn channels(&self) -> [ChannelTransform; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse the JSON form `{"name", "r": {"offset", "factor"}, "g": .., "b": ..}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Apply to a single RGB triple.
    pub fn apply_rgb(&self, [r, g, b]: [u8; 3]) -> [u8; 3] {
        [self.r.apply(r), self.g.apply(g), self.b.apply(b)]
    }
}

/// Apply `lut` to every pixel of `buffer`, returning a new buffer.
///
/// ```text
/// out_c = clamp(offset_c + in_c × factor_c, 0, 255)   for c in R, G, B
/// ```
///
/// Alpha is copied unchanged; the input is never modified.
pub fn apply_lut(buffer: &PixelBuffer, lut: &Lut) -> PixelBuffer {
    buffer.map_rgb(|rgb| lut.apply_rgb(rgb))
}

/// Clamp to `[0, 255]` and round half to even. NaN stores as 0.
pub(crate) fn store_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}
