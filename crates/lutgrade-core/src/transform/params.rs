//! Tonal adjustment parameters.
//!
//! `AdjustmentSet` holds the six slider values a grade is built from. It is a
//! plain value owned by the caller; the pipeline only reads it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GradeError;

/// Lowest accepted slider value.
pub const ADJUSTMENT_MIN: f64 = -100.0;
/// Highest accepted slider value.
pub const ADJUSTMENT_MAX: f64 = 100.0;

/// Identifies one of the six tonal controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Brightness,
    Contrast,
    Saturation,
    Temperature,
    Tint,
    Vibrance,
}

impl AdjustmentKind {
    /// All controls, in the order the pipeline applies them.
    pub const ALL: [AdjustmentKind; 6] = [
        AdjustmentKind::Brightness,
        AdjustmentKind::Contrast,
        AdjustmentKind::Temperature,
        AdjustmentKind::Tint,
        AdjustmentKind::Saturation,
        AdjustmentKind::Vibrance,
    ];

    /// Key used in serialized sets and on the command line.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Temperature => "temperature",
            Self::Tint => "tint",
            Self::Vibrance => "vibrance",
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AdjustmentKind {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GradeError::UnknownAdjustment(s.to_string()))
    }
}

/// Slider values in `[-100, 100]`. 0 is neutral for every control.
///
/// Missing keys deserialize to 0, so a partial JSON object is always a valid set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentSet {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub temperature: f64,
    pub tint: f64,
    pub vibrance: f64,
}

impl AdjustmentSet {
    pub fn get(&self, kind: AdjustmentKind) -> f64 {
        match kind {
            AdjustmentKind::Brightness => self.brightness,
            AdjustmentKind::Contrast => self.contrast,
            AdjustmentKind::Saturation => self.saturation,
            AdjustmentKind::Temperature => self.temperature,
            AdjustmentKind::Tint => self.tint,
            AdjustmentKind::Vibrance => self.vibrance,
        }
    }

    fn slot(&mut self, kind: AdjustmentKind) -> &mut f64 {
        match kind {
            AdjustmentKind::Brightness => &mut self.brightness,
            AdjustmentKind::Contrast => &mut self.contrast,
            AdjustmentKind::Saturation => &mut self.saturation,
            AdjustmentKind::Temperature => &mut self.temperature,
            AdjustmentKind::Tint => &mut self.tint,
            AdjustmentKind::Vibrance => &mut self.vibrance,
        }
    }

    /// Store `value`, clamped to the slider range.
    ///
    /// A NaN is stored as 0.
    pub fn set(&mut self, kind: AdjustmentKind, value: f64) {
        *self.slot(kind) = clamp_value(value);
    }

    /// Like [`set`](Self::set) but rejects non-finite input instead of zeroing it.
    ///
    /// Out-of-range finite values are still clamped rather than rejected.
    pub fn try_set(&mut self, kind: AdjustmentKind, value: f64) -> Result<(), GradeError> {
        if !value.is_finite() {
            return Err(GradeError::InvalidAdjustment {
                name: kind.label(),
                value,
            });
        }
        self.set(kind, value);
        Ok(())
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, kind: AdjustmentKind, value: f64) -> Self {
        self.set(kind, value);
        self
    }

    /// Copy with every value clamped to `[-100, 100]`.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for kind in AdjustmentKind::ALL {
            out.set(kind, self.get(kind));
        }
        out
    }

    /// True when no control would change a pixel.
    pub fn is_neutral(&self) -> bool {
        AdjustmentKind::ALL.iter().all(|&kind| self.get(kind) == 0.0)
    }

    /// Return every control to 0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn clamp_value(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX)
}
