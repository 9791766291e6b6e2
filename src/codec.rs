//! Text codec for convolution kernel files.
//!
//! The on-disk format is newline-separated:
//!
//! ```text
//! width height      (or a single size integer, legacy square form)
//! offset
//! divisor
//! anchor x
//! anchor y
//! w w w ...         (height rows of width space-separated floats)
//! ```
//!
//! Decoding sniffs the header: two integers select the rectangular form,
//! one integer the legacy square form. Encoding always writes the
//! rectangular form. Any malformed, missing or non-numeric field is a hard
//! [`KernelFormatError`]; nothing is silently defaulted.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{FilterError, KernelFormatError};
use crate::kernel::Kernel;

/// Serialize a kernel in the rectangular text form.
///
/// Floats are written with six decimals and a trailing space per kernel
/// value, matching the historical writer byte for byte.
pub fn encode_kernel(kernel: &Kernel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", kernel.width(), kernel.height());
    let _ = writeln!(out, "{:.6}", kernel.offset());
    let _ = writeln!(out, "{:.6}", kernel.divisor());
    let _ = writeln!(out, "{}", kernel.anchor_x());
    let _ = writeln!(out, "{}", kernel.anchor_y());
    for ky in 0..kernel.height() {
        for kx in 0..kernel.width() {
            let _ = write!(out, "{:.6} ", kernel.weights()[[ky, kx]]);
        }
        out.push('\n');
    }
    out
}

/// Parse a kernel from its text form, accepting both header variants.
pub fn decode_kernel(text: &str) -> Result<Kernel, FilterError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 5 {
        return Err(KernelFormatError::Truncated {
            expected: 6,
            got: lines.len(),
        }
        .into());
    }

    let (width, height) = parse_header(lines[0])?;
    if width % 2 == 0 || height % 2 == 0 {
        return Err(KernelFormatError::EvenDimension { width, height }.into());
    }

    let offset = parse_float(2, lines[1])?;
    let divisor = parse_float(3, lines[2])?;
    let anchor_x = parse_int(4, lines[3])?;
    let anchor_y = parse_int(5, lines[4])?;

    if lines.len() < 5 + height {
        return Err(KernelFormatError::Truncated {
            expected: 5 + height,
            got: lines.len(),
        }
        .into());
    }

    let mut rows = Vec::with_capacity(height);
    for (row, line) in lines[5..5 + height].iter().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != width {
            return Err(KernelFormatError::RowLength {
                row,
                expected: width,
                got: fields.len(),
            }
            .into());
        }
        let mut values = Vec::with_capacity(width);
        for field in fields {
            values.push(parse_float(6 + row, field)?);
        }
        rows.push(values);
    }

    Kernel::from_rows(&rows, anchor_x, anchor_y, Some(divisor), offset)
}

/// Read and decode a single kernel file.
pub fn read_kernel_file(path: &Path) -> Result<Kernel, FilterError> {
    let text = fs::read_to_string(path).map_err(KernelFormatError::Io)?;
    let kernel = decode_kernel(&text)?;
    debug!(path = %path.display(), width = kernel.width(), height = kernel.height(), "loaded kernel");
    Ok(kernel)
}

/// Encode and write a kernel file in the rectangular form.
pub fn write_kernel_file(path: &Path, kernel: &Kernel) -> Result<(), FilterError> {
    fs::write(path, encode_kernel(kernel)).map_err(KernelFormatError::Io)?;
    Ok(())
}

/// Load every `.filter` file in a directory, named by file stem.
pub fn load_kernel_dir(dir: &Path) -> Result<Vec<(String, Kernel)>, FilterError> {
    let mut kernels = Vec::new();
    for entry in fs::read_dir(dir).map_err(KernelFormatError::Io)? {
        let entry = entry.map_err(KernelFormatError::Io)?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "filter") {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let kernel = read_kernel_file(&path)?;
            kernels.push((name, kernel));
        }
    }
    debug!(dir = %dir.display(), count = kernels.len(), "loaded kernel directory");
    Ok(kernels)
}

/// Line 1 holds either `width height` or the legacy single `size`.
fn parse_header(line: &str) -> Result<(usize, usize), KernelFormatError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [w, h] => {
            let width = parse_int(1, w)?;
            let height = parse_int(1, h)?;
            Ok((width, height))
        }
        [size] => {
            let size = parse_int(1, size)?;
            Ok((size, size))
        }
        _ => Err(KernelFormatError::InvalidHeader(line.to_string())),
    }
}

fn parse_int(line: usize, value: &str) -> Result<usize, KernelFormatError> {
    value
        .trim()
        .parse()
        .map_err(|_| KernelFormatError::InvalidNumber {
            line,
            value: value.to_string(),
        })
}

fn parse_float(line: usize, value: &str) -> Result<f32, KernelFormatError> {
    value
        .trim()
        .parse()
        .map_err(|_| KernelFormatError::InvalidNumber {
            line,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FilterError, KernelFormatError};

    fn sample_kernel() -> Kernel {
        Kernel::from_rows(
            &[
                vec![0.0, -1.0, 0.0],
                vec![-1.0, 5.0, -1.0],
                vec![0.0, -1.0, 0.0],
            ],
            1,
            1,
            None,
            0.5,
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let kernel = sample_kernel();
        let decoded = decode_kernel(&encode_kernel(&kernel)).unwrap();

        assert_eq!(decoded.width(), kernel.width());
        assert_eq!(decoded.height(), kernel.height());
        assert_eq!(decoded.anchor_x(), kernel.anchor_x());
        assert_eq!(decoded.anchor_y(), kernel.anchor_y());
        assert!((decoded.divisor() - kernel.divisor()).abs() < 1e-6);
        assert!((decoded.offset() - kernel.offset()).abs() < 1e-6);
        for ky in 0..3 {
            for kx in 0..3 {
                assert!(
                    (decoded.weights()[[ky, kx]] - kernel.weights()[[ky, kx]]).abs() < 1e-6
                );
            }
        }
    }

    #[test]
    fn test_rectangular_header() {
        let text = "3 1\n0.000000\n1.000000\n1\n0\n1.000000 2.000000 3.000000 \n";
        let kernel = decode_kernel(text).unwrap();

        assert_eq!(kernel.width(), 3);
        assert_eq!(kernel.height(), 1);
        assert_eq!(kernel.weights()[[0, 2]], 3.0);
    }

    #[test]
    fn test_legacy_square_header() {
        let text = "3\n0.000000\n9.000000\n1\n1\n1 1 1\n1 1 1\n1 1 1\n";
        let kernel = decode_kernel(text).unwrap();

        assert_eq!(kernel.width(), 3);
        assert_eq!(kernel.height(), 3);
        assert_eq!(kernel.divisor(), 9.0);
    }

    #[test]
    fn test_even_dimension_rejected() {
        let text = "2 2\n0\n1\n0\n0\n1 1\n1 1\n";

        assert!(matches!(
            decode_kernel(text),
            Err(FilterError::Format(KernelFormatError::EvenDimension { .. }))
        ));
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        let text = "1 1\nabc\n1\n0\n0\n1\n";

        assert!(matches!(
            decode_kernel(text),
            Err(FilterError::Format(KernelFormatError::InvalidNumber {
                line: 2,
                ..
            }))
        ));
    }

    #[test]
    fn test_short_row_rejected() {
        let text = "3 3\n0\n1\n1\n1\n1 1 1\n1 1\n1 1 1\n";

        assert!(matches!(
            decode_kernel(text),
            Err(FilterError::Format(KernelFormatError::RowLength {
                row: 1,
                expected: 3,
                got: 2,
            }))
        ));
    }

    #[test]
    fn test_truncated_file_rejected() {
        assert!(matches!(
            decode_kernel("3 3\n0\n1\n"),
            Err(FilterError::Format(KernelFormatError::Truncated { .. }))
        ));
        assert!(matches!(
            decode_kernel("3 3\n0\n1\n1\n1\n1 1 1\n"),
            Err(FilterError::Format(KernelFormatError::Truncated {
                expected: 8,
                got: 6,
            }))
        ));
    }

    #[test]
    fn test_zero_divisor_in_file_rejected() {
        let text = "1 1\n0.000000\n0.000000\n0\n0\n1.000000 \n";

        assert!(matches!(decode_kernel(text), Err(FilterError::ZeroDivisor)));
    }

    #[test]
    fn test_garbled_header_rejected() {
        assert!(matches!(
            decode_kernel("3 3 3\n0\n1\n0\n0\n1 1 1\n1 1 1\n1 1 1\n"),
            Err(FilterError::Format(KernelFormatError::InvalidHeader(_)))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join("rasterkit-codec-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sharpen.filter");

        let kernel = sample_kernel();
        write_kernel_file(&path, &kernel).unwrap();
        let loaded = read_kernel_file(&path).unwrap();
        assert_eq!(loaded.width(), 3);
        assert!((loaded.weights()[[1, 1]] - 5.0).abs() < 1e-6);

        let named = load_kernel_dir(&dir).unwrap();
        assert!(named.iter().any(|(name, _)| name == "sharpen"));

        fs::remove_file(&path).unwrap();
    }
}
