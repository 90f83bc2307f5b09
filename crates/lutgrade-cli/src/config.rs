//! Runtime configuration for the command-line front end.

use lutgrade_core::codec::{EDIT_QUALITY, PREVIEW_QUALITY};
use lutgrade_core::preview::PREVIEW_MAX_DIMENSION;

/// Default tracing filter when `LUTGRADE_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

/// Environment-driven defaults. Command-line flags take precedence.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// JPEG quality in `[0, 1]` for graded output.
    pub quality: f32,
    /// JPEG quality in `[0, 1]` for previews.
    pub preview_quality: f32,
    /// Longest side of a preview, in pixels.
    pub preview_max_dim: u32,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            quality: env_parse("LUTGRADE_QUALITY").unwrap_or(EDIT_QUALITY),
            preview_quality: env_parse("LUTGRADE_PREVIEW_QUALITY").unwrap_or(PREVIEW_QUALITY),
            preview_max_dim: env_parse("LUTGRADE_PREVIEW_MAX_DIM").unwrap_or(PREVIEW_MAX_DIMENSION),
            log_filter: std::env::var("LUTGRADE_LOG")
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
