//! Error type shared by every fallible operation in the core.
//!
//! Pixel stages never fail; everything here originates at the decode,
//! encode, or parse boundary.

use crate::lut_import::LutParseError;

#[derive(Debug, thiserror::Error)]
pub enum GradeError {
    #[error("could not read image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },
    #[error("could not apply LUT: {0}")]
    LutParse(#[from] LutParseError),
    #[error("could not apply LUT: invalid LUT JSON: {0}")]
    LutJson(#[from] serde_json::Error),
    #[error("invalid value {value} for adjustment `{name}`")]
    InvalidAdjustment { name: &'static str, value: f64 },
    #[error("unknown adjustment `{0}`")]
    UnknownAdjustment(String),
}
