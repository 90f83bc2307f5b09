//! Transform pipeline: parameter definitions, LUT model and stage composition.

pub mod evaluate;
pub mod lut;
pub mod params;
