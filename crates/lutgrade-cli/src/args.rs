//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lutgrade")]
#[command(version, about = "Apply tonal adjustments and LUT looks to images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Grade an image: adjustments first, then the look
    Grade {
        /// Input image (PNG or JPEG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output image; `.png` writes PNG, anything else JPEG
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        #[command(flatten)]
        look: LookArgs,

        /// Slider value as NAME=VALUE, e.g. `contrast=-20` (repeatable)
        #[arg(short, long = "adjust", value_name = "NAME=VALUE")]
        adjust: Vec<String>,

        /// JSON file with slider values; `--adjust` entries override it
        #[arg(long, value_name = "FILE")]
        adjustments: Option<PathBuf>,

        /// JPEG quality in [0, 1]
        #[arg(short, long, value_name = "Q")]
        quality: Option<f32>,
    },

    /// Import a .cube/.3dl file and print the resulting look as JSON
    Import {
        /// LUT file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Fail on malformed files instead of substituting a fallback look
        #[arg(long)]
        strict: bool,
    },

    /// List built-in looks
    Presets,

    /// Write a downscaled preview of an image with a look applied
    Preview {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        #[command(flatten)]
        look: LookArgs,

        /// Longest side in pixels
        #[arg(long, value_name = "PX")]
        max_dim: Option<u32>,
    },

    /// Write a gradient swatch showing a look
    Thumbnail {
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        #[command(flatten)]
        look: LookArgs,

        /// Edge length in pixels
        #[arg(long, value_name = "PX", default_value_t = lutgrade_core::preview::THUMBNAIL_SIZE)]
        size: u32,
    },
}

/// Where the look comes from. At most one source.
#[derive(Args, Debug, Clone)]
pub struct LookArgs {
    /// LUT file (.cube, .3dl, or serialized .json)
    #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
    pub lut: Option<PathBuf>,

    /// Built-in look by name or id
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Fail on malformed LUT files instead of substituting a fallback look
    #[arg(long)]
    pub strict: bool,
}
