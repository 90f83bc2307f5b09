//! Caller-owned editing state.
//!
//! A `GradeSession` bundles the source image with the current slider values
//! and selected look. Nothing in the pipeline holds onto it; rendering reads
//! it and returns a fresh buffer. Debouncing rapid slider changes is up to
//! the caller.

use crate::image::PixelBuffer;
use crate::transform::evaluate::{GradeOptions, process_image};
use crate::transform::lut::Lut;
use crate::transform::params::{AdjustmentKind, AdjustmentSet};

#[derive(Debug, Clone)]
pub struct GradeSession {
    source: PixelBuffer,
    adjustments: AdjustmentSet,
    lut: Option<Lut>,
}

impl GradeSession {
    /// Start a session with neutral adjustments and no look.
    pub fn new(source: PixelBuffer) -> Self {
        Self {
            source,
            adjustments: AdjustmentSet::default(),
            lut: None,
        }
    }

    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    pub fn adjustments(&self) -> &AdjustmentSet {
        &self.adjustments
    }

    /// Set one slider, clamped to `[-100, 100]`.
    pub fn set_adjustment(&mut self, kind: AdjustmentKind, value: f64) {
        self.adjustments.set(kind, value);
    }

    /// Replace every slider at once.
    pub fn set_adjustments(&mut self, adjustments: AdjustmentSet) {
        self.adjustments = adjustments.clamped();
    }

    pub fn select_lut(&mut self, lut: Lut) {
        tracing::debug!("selected look `{}`", lut.name);
        self.lut = Some(lut);
    }

    pub fn clear_lut(&mut self) {
        self.lut = None;
    }

    pub fn selected_lut(&self) -> Option<&Lut> {
        self.lut.as_ref()
    }

    /// Neutral sliders, no look. The source image is kept.
    pub fn reset(&mut self) {
        self.adjustments.reset();
        self.lut = None;
    }

    /// Render the current grade of the source image.
    pub fn render(&self) -> PixelBuffer {
        let options = GradeOptions {
            lut: self.lut.as_ref(),
            adjustments: Some(&self.adjustments),
        };
        process_image(&self.source, &options)
    }
}
