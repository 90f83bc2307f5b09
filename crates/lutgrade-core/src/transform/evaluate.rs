//! Stage composition. Adjustments run first, then the LUT look.

use crate::codec::{self, EncodeOptions};
use crate::error::GradeError;
use crate::grading::adjustments::apply_adjustments;
use crate::image::PixelBuffer;
use crate::transform::lut::{Lut, apply_lut};
use crate::transform::params::AdjustmentSet;

/// What to apply in a single [`process_image`] call. Both parts are optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradeOptions<'a> {
    pub lut: Option<&'a Lut>,
    pub adjustments: Option<&'a AdjustmentSet>,
}

impl<'a> GradeOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lut(mut self, lut: &'a Lut) -> Self {
        self.lut = Some(lut);
        self
    }

    pub fn with_adjustments(mut self, adjustments: &'a AdjustmentSet) -> Self {
        self.adjustments = Some(adjustments);
        self
    }
}

/// Apply the full grade to `buffer` and return the result as a new buffer.
///
/// 1. Tonal adjustments, skipped when absent or neutral
/// 2. LUT, skipped when absent
///
/// The LUT is a final look on top of the tonal correction; the order is not
/// configurable. With nothing to apply the result is a copy of `buffer`.
pub fn process_image(buffer: &PixelBuffer, options: &GradeOptions<'_>) -> PixelBuffer {
    let adjustments = options.adjustments.filter(|set| !set.is_neutral());

    let graded = match adjustments {
        Some(set) => {
            tracing::debug!(
                "adjustments on {}x{}: {:?}",
                buffer.width(),
                buffer.height(),
                set
            );
            Some(apply_adjustments(buffer, set))
        }
        None => None,
    };

    match (options.lut, graded) {
        (Some(lut), Some(graded)) => {
            tracing::debug!("LUT `{}` on adjusted image", lut.name);
            apply_lut(&graded, lut)
        }
        (Some(lut), None) => {
            tracing::debug!("LUT `{}` on source image", lut.name);
            apply_lut(buffer, lut)
        }
        (None, Some(graded)) => graded,
        (None, None) => buffer.clone(),
    }
}

/// Decode `bytes`, grade, and re-encode.
///
/// Fails with [`GradeError::Decode`] for input that is not a readable image.
pub fn process_encoded(
    bytes: &[u8],
    options: &GradeOptions<'_>,
    encode: &EncodeOptions,
) -> Result<Vec<u8>, GradeError> {
    let source = codec::decode(bytes)?;
    let graded = process_image(&source, options);
    codec::encode(&graded, encode)
}
