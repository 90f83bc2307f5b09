//! Adobe/Resolve `.cube` text parser.

use super::LutParseError;

/// Largest 3D grid edge accepted from a size directive or `.3dl` mesh.
pub const MAX_3D_SIZE: u32 = 256;

/// Dimensionality declared by the size directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeKind {
    /// `LUT_1D_SIZE n`, `n` rows.
    OneD,
    /// `LUT_3D_SIZE n`, `n³` rows.
    ThreeD,
}

/// Parsed contents of a `.cube` file.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeFile {
    /// Text of the `TITLE` directive with quotes removed.
    pub title: Option<String>,
    /// Declared table kind and grid size.
    pub size: Option<(CubeKind, u32)>,
    pub domain_min: [f64; 3],
    pub domain_max: [f64; 3],
    /// Table rows in file order (red varies fastest).
    pub table: Vec<[f64; 3]>,
}

impl Default for CubeFile {
    fn default() -> Self {
        Self {
            title: None,
            size: None,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            table: Vec::new(),
        }
    }
}

impl CubeFile {
    /// Number of rows the size directive calls for.
    ///
    /// `None` when no size was declared or the count does not fit in `usize`.
    pub fn expected_entries(&self) -> Option<usize> {
        self.size.and_then(|(kind, n)| match kind {
            CubeKind::OneD => Some(n as usize),
            CubeKind::ThreeD => (n as usize).checked_pow(3),
        })
    }
}

/// Parse `.cube` text.
///
/// Header-only files are valid. When table rows are present there must be
/// exactly as many as the size directive declares. Unknown keywords are
/// skipped.
pub fn parse_cube(content: &str) -> Result<CubeFile, LutParseError> {
    let mut cube = CubeFile::default();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        // `#` is legal inside a quoted title.
        if let Some(title) = parse_title(raw.trim()) {
            cube.title = title;
            continue;
        }
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((k, r)) => (k, r.trim()),
            None => (line, ""),
        };

        match keyword {
            "LUT_1D_SIZE" | "LUT_3D_SIZE" => {
                let n = rest
                    .split_whitespace()
                    .next()
                    .and_then(|s| s.parse::<u32>().ok())
                    .filter(|&n| n > 0)
                    .ok_or_else(|| invalid_directive(line_no, keyword))?;
                let kind = if keyword == "LUT_1D_SIZE" {
                    CubeKind::OneD
                } else {
                    CubeKind::ThreeD
                };
                if kind == CubeKind::ThreeD && n > MAX_3D_SIZE {
                    return Err(invalid_directive(line_no, keyword));
                }
                cube.size = Some((kind, n));
            }
            "DOMAIN_MIN" => {
                cube.domain_min =
                    parse_triple(rest).ok_or_else(|| invalid_directive(line_no, keyword))?;
            }
            "DOMAIN_MAX" => {
                cube.domain_max =
                    parse_triple(rest).ok_or_else(|| invalid_directive(line_no, keyword))?;
            }
            "LUT_1D_INPUT_RANGE" | "LUT_3D_INPUT_RANGE" => {
                let [lo, hi] = parse_floats::<2>(rest)
                    .ok_or_else(|| invalid_directive(line_no, keyword))?;
                cube.domain_min = [lo; 3];
                cube.domain_max = [hi; 3];
            }
            "LUT_1D_TABLE" | "LUT_3D_TABLE" => {}
            _ if is_numeric_token(keyword) => {
                let row =
                    parse_triple(line).ok_or(LutParseError::InvalidRow { line: line_no })?;
                cube.table.push(row);
            }
            other => {
                tracing::debug!("skipping unknown .cube keyword `{other}` on line {line_no}");
            }
        }
    }

    if !cube.table.is_empty() {
        let expected = cube.expected_entries().ok_or(LutParseError::MissingSize)?;
        if cube.table.len() != expected {
            return Err(LutParseError::EntryCount {
                expected,
                actual: cube.table.len(),
            });
        }
    }

    Ok(cube)
}

/// `Some(title)` when `line` is a `TITLE` directive. An empty title is `None`.
///
/// A quoted title ends at its closing quote; anything after it may be a
/// comment. An unquoted title runs to the first `#`.
fn parse_title(line: &str) -> Option<Option<String>> {
    let rest = line.strip_prefix("TITLE")?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let title = match rest.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or_default(),
        None => strip_comment(rest),
    };
    let title = title.trim();
    Some((!title.is_empty()).then(|| title.to_string()))
}

pub(super) fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or_default().trim()
}

/// True when `token` reads as a number, i.e. the line is table data rather
/// than a keyword.
pub(super) fn is_numeric_token(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

fn parse_triple(s: &str) -> Option<[f64; 3]> {
    parse_floats::<3>(s)
}

/// Exactly `N` whitespace-separated finite floats.
fn parse_floats<const N: usize>(s: &str) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    let mut tokens = s.split_whitespace();
    for slot in &mut out {
        *slot = tokens.next()?.parse::<f64>().ok().filter(|v| v.is_finite())?;
    }
    tokens.next().is_none().then_some(out)
}

fn invalid_directive(line: usize, directive: &str) -> LutParseError {
    LutParseError::InvalidDirective {
        line,
        directive: directive.to_string(),
    }
}
