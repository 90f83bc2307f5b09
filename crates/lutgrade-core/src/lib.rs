//! lutgrade core: pixel pipeline for tonal adjustments and LUT looks.
//!
//! This crate contains the adjustment math, the per-channel LUT model,
//! LUT file import, and the decode/encode boundary. No CLI or terminal
//! dependencies.

pub mod codec;
pub mod error;
pub mod grading;
pub mod image;
pub mod lut_import;
pub mod presets;
pub mod preview;
pub mod session;
pub mod transform;

// Re-exports for convenience.
pub use codec::{EncodeOptions, OutputFormat};
pub use error::GradeError;
pub use grading::adjustments::apply_adjustments;
pub use crate::image::PixelBuffer;
pub use lut_import::{LutParseError, parse_lut_file, try_parse_lut_file};
pub use session::GradeSession;
pub use transform::evaluate::{GradeOptions, process_encoded, process_image};
pub use transform::lut::{ChannelTransform, Lut, apply_lut};
pub use transform::params::{AdjustmentKind, AdjustmentSet};
