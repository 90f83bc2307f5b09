//! Autodesk/Lustre `.3dl` text parser.
//!
//! Layout: an optional keyword header, one line of integer input-mesh
//! positions (its entry count is the grid size), then one integer RGB row per
//! grid point. Row values are normalized to `[0, 1]` by the output bit depth.

use super::LutParseError;
use super::cube::{MAX_3D_SIZE, is_numeric_token, strip_comment};

/// Parsed contents of a `.3dl` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreeDlFile {
    /// Input mesh positions from the first numeric line.
    pub mesh: Vec<u32>,
    /// Output bit depth inferred from the largest table value (10, 12 or 16).
    pub output_bits: u8,
    /// Normalized rows in file order.
    pub table: Vec<[f64; 3]>,
}

impl ThreeDlFile {
    /// Grid points per axis, or `None` for a file without a mesh line.
    pub fn size(&self) -> Option<u32> {
        (!self.mesh.is_empty()).then_some(self.mesh.len() as u32)
    }
}

/// Parse `.3dl` text.
///
/// Files with no numeric content are valid and yield an empty table. When rows
/// are present there must be exactly `size³` of them.
pub fn parse_3dl(content: &str) -> Result<ThreeDlFile, LutParseError> {
    let mut mesh: Option<Vec<u32>> = None;
    let mut raw_rows: Vec<[u32; 3]> = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }
        let first = line.split_whitespace().next().unwrap_or_default();
        if !is_numeric_token(first) {
            tracing::debug!("skipping .3dl header line {line_no}");
            continue;
        }

        if mesh.is_none() {
            let values = parse_ints(line)
                .filter(|v| v.len() <= MAX_3D_SIZE as usize)
                .ok_or(LutParseError::InvalidMesh { line: line_no })?;
            mesh = Some(values);
            continue;
        }

        match parse_ints(line).as_deref() {
            Some(&[r, g, b]) => raw_rows.push([r, g, b]),
            _ => return Err(LutParseError::InvalidRow { line: line_no }),
        }
    }

    let mesh = mesh.unwrap_or_default();
    if !raw_rows.is_empty() {
        let expected = mesh.len().pow(3);
        if raw_rows.len() != expected {
            return Err(LutParseError::EntryCount {
                expected,
                actual: raw_rows.len(),
            });
        }
    }

    let peak = raw_rows.iter().flatten().copied().max().unwrap_or(0);
    let output_bits = output_bits_for(peak);
    let scale = ((1u32 << output_bits) - 1) as f64;
    let table = raw_rows
        .iter()
        .map(|row| row.map(|v| v as f64 / scale))
        .collect();

    Ok(ThreeDlFile {
        mesh,
        output_bits,
        table,
    })
}

/// Smallest common output depth that can hold `peak`. 10-bit unless larger.
fn output_bits_for(peak: u32) -> u8 {
    match peak {
        0..=1023 => 10,
        1024..=4095 => 12,
        _ => 16,
    }
}

fn parse_ints(line: &str) -> Option<Vec<u32>> {
    line.split_whitespace()
        .map(|t| t.parse::<u32>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn identity_2x2(max: u32) -> String {
        let mut s = String::from("# two point mesh\n0 1023\n");
        for b in [0, max] {
            for g in [0, max] {
                for r in [0, max] {
                    s.push_str(&format!("{r} {g} {b}\n"));
                }
            }
        }
        s
    }

    #[test]
    fn test_parse_ten_bit_table() {
        let file = parse_3dl(&identity_2x2(1023)).unwrap();
        assert_eq!(file.size(), Some(2));
        assert_eq!(file.output_bits, 10);
        assert_eq!(file.table.len(), 8);
        assert!((file.table[7][0] - 1.0).abs() < EPSILON);
        assert_eq!(file.table[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_twelve_bit_table_detected() {
        let file = parse_3dl(&identity_2x2(4095)).unwrap();
        assert_eq!(file.output_bits, 12);
        assert!((file.table[7][2] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_keyword_header_is_skipped() {
        let content = format!("3DMESH\nMesh 1 10\n{}", identity_2x2(1023));
        assert_eq!(parse_3dl(&content).unwrap().size(), Some(2));
    }

    #[test]
    fn test_non_integer_mesh_is_rejected() {
        let err = parse_3dl("0 0.5 1\n").unwrap_err();
        assert!(matches!(err, LutParseError::InvalidMesh { line: 1 }));
    }

    #[test]
    fn test_oversized_mesh_is_rejected() {
        let mesh: Vec<String> = (0..=MAX_3D_SIZE).map(|v| v.to_string()).collect();
        let content = format!("{}\n0 0 0\n", mesh.join(" "));
        let err = parse_3dl(&content).unwrap_err();
        assert!(matches!(err, LutParseError::InvalidMesh { line: 1 }));
    }

    #[test]
    fn test_empty_file_is_valid() {
        let file = parse_3dl("").unwrap();
        assert_eq!(file.size(), None);
        assert!(file.table.is_empty());
    }

    #[test]
    fn test_float_row_is_rejected() {
        let err = parse_3dl("0 1023\n0.5 0 0\n").unwrap_err();
        assert!(matches!(err, LutParseError::InvalidRow { line: 2 }));
    }

    #[test]
    fn test_row_count_mismatch() {
        let err = parse_3dl("0 512 1023\n0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            LutParseError::EntryCount {
                expected: 27,
                actual: 1
            }
        ));
    }
}
