//! Morphology filters: Erode, Dilate.
//!
//! Per-channel minimum (erosion) or maximum (dilation) over an odd square
//! window. Samples outside the image count as black: borders darken an
//! erosion and can never win a dilation. Output rows are computed in
//! parallel against the shared, read-only input.
//!
//! ## Supported Formats
//!
//! Images with 1, 3, or 4 channels (height, width, channels). For RGBA
//! input the output alpha is forced opaque.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use crate::error::FilterError;

/// Which extremum the window scan keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    /// Per-channel minimum: dark regions grow.
    Erode,
    /// Per-channel maximum: bright regions grow.
    Dilate,
}

/// Apply erosion or dilation over a `size` x `size` window.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `size` - Window size, must be odd
/// * `op` - [`MorphOp::Erode`] or [`MorphOp::Dilate`]
///
/// # Returns
/// Filtered image with same dimensions, or an error for an even window
pub fn morph_u8(
    input: ArrayView3<u8>,
    size: usize,
    op: MorphOp,
) -> Result<Array3<u8>, FilterError> {
    if size % 2 == 0 {
        return Err(FilterError::EvenWindow(size));
    }
    let (height, width, channels) = input.dim();
    let color_channels = if channels == 4 { 3 } else { channels };
    let offset = (size / 2) as isize;

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = vec![0u8; width * channels];
            for x in 0..width {
                for c in 0..color_channels {
                    let mut extreme: u8 = match op {
                        MorphOp::Erode => 255,
                        MorphOp::Dilate => 0,
                    };
                    for ky in -offset..=offset {
                        for kx in -offset..=offset {
                            let sy = y as isize + ky;
                            let sx = x as isize + kx;
                            let sample = if sx < 0
                                || sx >= width as isize
                                || sy < 0
                                || sy >= height as isize
                            {
                                0
                            } else {
                                input[[sy as usize, sx as usize, c]]
                            };
                            extreme = match op {
                                MorphOp::Erode => extreme.min(sample),
                                MorphOp::Dilate => extreme.max(sample),
                            };
                        }
                    }
                    row[x * channels + c] = extreme;
                }
                if channels == 4 {
                    row[x * channels + 3] = 255;
                }
            }
            row
        })
        .collect();

    let mut output = Array3::<u8>::zeros((height, width, channels));
    for (y, row) in rows.into_iter().enumerate() {
        for x in 0..width {
            for c in 0..channels {
                output[[y, x, c]] = row[x * channels + c];
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_window_rejected() {
        let img = Array3::<u8>::zeros((3, 3, 3));

        assert!(matches!(
            morph_u8(img.view(), 4, MorphOp::Erode),
            Err(FilterError::EvenWindow(4))
        ));
    }

    #[test]
    fn test_dilate_grows_bright_spot() {
        let mut img = Array3::<u8>::zeros((5, 5, 3));
        img[[2, 2, 0]] = 255;

        let result = morph_u8(img.view(), 3, MorphOp::Dilate).unwrap();

        assert_eq!(result[[1, 2, 0]], 255);
        assert_eq!(result[[2, 1, 0]], 255);
        assert_eq!(result[[3, 3, 0]], 255);
        assert_eq!(result[[0, 0, 0]], 0); // Out of reach
    }

    #[test]
    fn test_erode_border_goes_black() {
        let mut img = Array3::<u8>::zeros((3, 3, 3));
        img.fill(255);

        let result = morph_u8(img.view(), 3, MorphOp::Erode).unwrap();

        // Every window except the center's touches the outside (black)
        assert_eq!(result[[0, 0, 0]], 0);
        assert_eq!(result[[0, 1, 0]], 0);
        assert_eq!(result[[1, 1, 0]], 255);
    }

    #[test]
    fn test_dilate_border_unaffected_by_outside() {
        let mut img = Array3::<u8>::zeros((3, 3, 3));
        img.fill(100);

        let result = morph_u8(img.view(), 3, MorphOp::Dilate).unwrap();

        // Outside samples are 0 and never beat a real 100
        assert_eq!(result[[0, 0, 0]], 100);
    }

    #[test]
    fn test_opening_is_non_expansive() {
        // A 2-pixel foreground survives erode+dilate only where it was
        let mut img = Array3::<u8>::zeros((7, 7, 1));
        img[[3, 3, 0]] = 255;
        img[[3, 4, 0]] = 255;

        let eroded = morph_u8(img.view(), 3, MorphOp::Erode).unwrap();
        let opened = morph_u8(eroded.view(), 3, MorphOp::Dilate).unwrap();

        for y in 0..7 {
            for x in 0..7 {
                if opened[[y, x, 0]] > 0 {
                    assert_eq!(img[[y, x, 0]], 255, "opening expanded at ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_alpha_forced_opaque() {
        let mut img = Array3::<u8>::zeros((3, 3, 4));
        img[[1, 1, 3]] = 17;

        let result = morph_u8(img.view(), 1, MorphOp::Dilate).unwrap();

        assert_eq!(result[[1, 1, 3]], 255);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut img = Array3::<u8>::zeros((3, 3, 3));
        img[[1, 1, 0]] = 200;
        img[[1, 1, 2]] = 50;

        let result = morph_u8(img.view(), 3, MorphOp::Dilate).unwrap();

        assert_eq!(result[[0, 0, 0]], 200);
        assert_eq!(result[[0, 0, 1]], 0);
        assert_eq!(result[[0, 0, 2]], 50);
    }
}
