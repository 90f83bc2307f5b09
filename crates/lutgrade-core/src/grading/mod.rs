//! Grading tools for the six tonal sliders.

pub mod adjustments;
