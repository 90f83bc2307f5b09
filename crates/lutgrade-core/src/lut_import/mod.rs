//! LUT file import.
//!
//! `.cube` and `.3dl` files are parsed in full, but the result is reduced to
//! the per-channel [`Lut`] model with fixed approximate transforms. The table
//! itself is not sampled: an imported LUT approximates the look of the file,
//! it does not reproduce the original 3D lookup.

pub mod cube;
pub mod three_dl;

use std::path::Path;

use crate::error::GradeError;
use crate::transform::lut::{ChannelTransform, Lut};

pub use cube::{CubeFile, CubeKind, parse_cube};
pub use three_dl::{ThreeDlFile, parse_3dl};

/// Approximation used for `.cube` files and unknown extensions.
pub const CUBE_APPROXIMATION: [ChannelTransform; 3] = [
    ChannelTransform::new(20.0, 1.2),
    ChannelTransform::new(0.0, 1.1),
    ChannelTransform::new(-10.0, 0.9),
];

/// Approximation used for `.3dl` files.
pub const THREE_DL_APPROXIMATION: [ChannelTransform; 3] = [
    ChannelTransform::new(25.0, 1.25),
    ChannelTransform::new(5.0, 1.15),
    ChannelTransform::new(-15.0, 0.85),
];

/// Substituted by [`parse_lut_file`] when a file does not parse.
pub const FALLBACK_APPROXIMATION: [ChannelTransform; 3] = [
    ChannelTransform::new(30.0, 1.2),
    ChannelTransform::new(10.0, 1.1),
    ChannelTransform::new(-20.0, 0.9),
];

/// Display name for imported `.3dl` files, which carry no title.
pub const THREE_DL_NAME: &str = "3DL Imported";

#[derive(Debug, thiserror::Error)]
pub enum LutParseError {
    #[error("line {line}: invalid `{directive}` directive")]
    InvalidDirective { line: usize, directive: String },
    #[error("line {line}: expected three numeric values")]
    InvalidRow { line: usize },
    #[error("line {line}: invalid input mesh")]
    InvalidMesh { line: usize },
    #[error("table data without a size directive")]
    MissingSize,
    #[error("expected {expected} table entries, found {actual}")]
    EntryCount { expected: usize, actual: usize },
}

/// LUT file formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutFormat {
    Cube,
    ThreeDl,
    Unknown,
}

impl LutFormat {
    /// Detect from the file extension, ignoring case.
    pub fn from_filename(filename: &str) -> Self {
        match Path::new(filename).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("cube") => Self::Cube,
            Some(ext) if ext.eq_ignore_ascii_case("3dl") => Self::ThreeDl,
            _ => Self::Unknown,
        }
    }
}

/// Import a LUT file, failing on malformed content.
pub fn try_parse_lut_file(filename: &str, content: &str) -> Result<Lut, LutParseError> {
    let format = LutFormat::from_filename(filename);
    let lut = match format {
        LutFormat::Cube => {
            let cube = parse_cube(content)?;
            let name = cube.title.unwrap_or_else(|| file_stem(filename));
            approximate(name, CUBE_APPROXIMATION)
        }
        LutFormat::ThreeDl => {
            parse_3dl(content)?;
            approximate(THREE_DL_NAME, THREE_DL_APPROXIMATION)
        }
        LutFormat::Unknown => approximate(file_stem(filename), CUBE_APPROXIMATION),
    };

    tracing::info!("imported `{}` from {filename} ({format:?}, approximate)", lut.name);
    Ok(lut)
}

/// Import a LUT file, never failing.
///
/// Content that does not parse is replaced by [`FALLBACK_APPROXIMATION`]
/// named after the file. Use [`try_parse_lut_file`] to see the error instead.
pub fn parse_lut_file(filename: &str, content: &str) -> Lut {
    try_parse_lut_file(filename, content).unwrap_or_else(|e| {
        tracing::warn!("could not parse LUT {filename}: {e}; using fallback look");
        approximate(file_stem(filename), FALLBACK_APPROXIMATION)
    })
}

/// Read a LUT from disk.
///
/// `.json` files hold a serialized [`Lut`]; anything else goes through
/// [`parse_lut_file`], or [`try_parse_lut_file`] when `strict` is set.
pub fn load_lut_file(path: &Path, strict: bool) -> Result<Lut, GradeError> {
    let content = std::fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        return Ok(Lut::from_json(&content)?);
    }

    if strict {
        Ok(try_parse_lut_file(&filename, &content)?)
    } else {
        Ok(parse_lut_file(&filename, &content))
    }
}

fn approximate(name: impl Into<String>, [r, g, b]: [ChannelTransform; 3]) -> Lut {
    Lut::new(name, r, g, b)
}

/// File name without its last extension.
fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}
