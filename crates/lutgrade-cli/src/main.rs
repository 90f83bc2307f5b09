//! lutgrade: grade images from the command line.

mod args;
mod config;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lutgrade_core::codec::{self, EncodeOptions, OutputFormat};
use lutgrade_core::lut_import::load_lut_file;
use lutgrade_core::presets::{builtin_luts, find_builtin};
use lutgrade_core::preview::{lut_thumbnail, resize_to_fit};
use lutgrade_core::{AdjustmentKind, AdjustmentSet, GradeOptions, Lut, apply_lut, process_image};

use args::{Cli, Commands, LookArgs};
use config::CliConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::default();
    init_tracing(&config.log_filter);

    match cli.command {
        Commands::Grade {
            input,
            out,
            look,
            adjust,
            adjustments,
            quality,
        } => {
            let source = codec::load(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let lut = resolve_look(&look)?;
            let set = build_adjustments(adjustments.as_deref(), &adjust)?;

            let options = GradeOptions {
                lut: lut.as_ref(),
                adjustments: Some(&set),
            };
            let graded = process_image(&source, &options);

            let encode = EncodeOptions {
                format: OutputFormat::from_path(&out),
                quality: quality.unwrap_or(config.quality),
            };
            codec::save(&out, &graded, &encode)
                .with_context(|| format!("writing {}", out.display()))?;
            tracing::info!(
                "graded {} -> {} ({}x{})",
                input.display(),
                out.display(),
                graded.width(),
                graded.height()
            );
        }
        Commands::Import { file, strict } => {
            let lut = load_lut_file(&file, strict)
                .with_context(|| format!("importing {}", file.display()))?;
            println!("{}", lut.to_json()?);
        }
        Commands::Presets => {
            for preset in builtin_luts() {
                let [r, g, b] = preset.lut.channels();
                println!(
                    "{:>2}  {:<8} r({:+}, x{}) g({:+}, x{}) b({:+}, x{})  {}",
                    preset.id,
                    preset.lut.name,
                    r.offset,
                    r.factor,
                    g.offset,
                    g.factor,
                    b.offset,
                    b.factor,
                    preset.description
                );
            }
        }
        Commands::Preview {
            input,
            out,
            look,
            max_dim,
        } => {
            let source = codec::load(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let lut = require_look(&look)?;
            let small = resize_to_fit(&source, max_dim.unwrap_or(config.preview_max_dim))?;
            let preview = apply_lut(&small, &lut);

            let encode = EncodeOptions {
                format: OutputFormat::from_path(&out),
                quality: config.preview_quality,
            };
            codec::save(&out, &preview, &encode)
                .with_context(|| format!("writing {}", out.display()))?;
        }
        Commands::Thumbnail { out, look, size } => {
            let lut = require_look(&look)?;
            let thumb = lut_thumbnail(&lut, size);
            codec::save(&out, &thumb, &EncodeOptions::png())
                .with_context(|| format!("writing {}", out.display()))?;
        }
    }

    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The selected look, if any.
fn resolve_look(look: &LookArgs) -> Result<Option<Lut>> {
    if let Some(name) = &look.preset {
        let Some(preset) = find_builtin(name) else {
            bail!("unknown preset `{name}`");
        };
        return Ok(Some(preset.lut));
    }
    if let Some(path) = &look.lut {
        let lut = load_lut_file(path, look.strict)
            .with_context(|| format!("loading LUT {}", path.display()))?;
        return Ok(Some(lut));
    }
    Ok(None)
}

fn require_look(look: &LookArgs) -> Result<Lut> {
    resolve_look(look)?.context("a look is required: pass --lut FILE or --preset NAME")
}

/// Slider values from an optional JSON file, then `NAME=VALUE` overrides.
fn build_adjustments(file: Option<&Path>, overrides: &[String]) -> Result<AdjustmentSet> {
    let mut set = match file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let set: AdjustmentSet = serde_json::from_str(&json)
                .with_context(|| format!("parsing {}", path.display()))?;
            set.clamped()
        }
        None => AdjustmentSet::default(),
    };

    for entry in overrides {
        let Some((name, value)) = entry.split_once('=') else {
            bail!("expected NAME=VALUE, got `{entry}`");
        };
        let kind: AdjustmentKind = name.parse()?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("invalid number in `{entry}`"))?;
        set.try_set(kind, value)?;
    }

    Ok(set)
}
