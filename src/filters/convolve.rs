//! Generic 2D convolution.
//!
//! Applies an odd-sized weighted [`Kernel`] with anchor, divisor and
//! offset. Output rows are computed in parallel: every row task reads the
//! shared input view and writes only its own row buffer, so no
//! synchronization is needed.
//!
//! ## Supported Formats
//!
//! Images with 1, 3, or 4 channels (height, width, channels). For RGBA
//! input the alpha channel of every processed pixel is forced opaque.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use crate::kernel::Kernel;

/// How samples past the image edge are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Out-of-range coordinates are clamped to the nearest valid
    /// row/column; every output pixel is computed.
    ClampToEdge,
    /// Pixels within half a kernel of any edge are left unprocessed
    /// (zeroed/transparent); only the interior is computed.
    SkipMargin,
}

/// Convolve an image with a kernel.
///
/// For every output pixel `(x, y)` and kernel cell `(kx, ky)` the input is
/// sampled at `(x + kx - anchor_x, y + ky - anchor_y)`. Color samples are
/// normalized to 0.0-1.0, weighted and summed; the result is
/// `clamp(sum * 255 / divisor + offset, 0, 255)` per channel.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `kernel` - Validated convolution kernel
/// * `border` - Edge handling policy
///
/// # Returns
/// Convolved image with the same dimensions as the input
pub fn convolve_u8(input: ArrayView3<u8>, kernel: &Kernel, border: BorderPolicy) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let color_channels = if channels == 4 { 3 } else { channels };

    let k_w = kernel.width();
    let k_h = kernel.height();
    let anchor_x = kernel.anchor_x() as isize;
    let anchor_y = kernel.anchor_y() as isize;
    let divisor = kernel.divisor();
    let offset = kernel.offset();
    let margin_x = k_w / 2;
    let margin_y = k_h / 2;

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = vec![0u8; width * channels];

            let (x_start, x_end) = match border {
                BorderPolicy::ClampToEdge => (0, width),
                BorderPolicy::SkipMargin => {
                    if y < margin_y || y + margin_y >= height {
                        return row;
                    }
                    (margin_x, width.saturating_sub(margin_x))
                }
            };

            for x in x_start..x_end {
                let mut sums = [0.0f32; 4];
                for ky in 0..k_h {
                    for kx in 0..k_w {
                        let sx = (x as isize + kx as isize - anchor_x)
                            .clamp(0, width as isize - 1) as usize;
                        let sy = (y as isize + ky as isize - anchor_y)
                            .clamp(0, height as isize - 1) as usize;
                        let weight = kernel.weights()[[ky, kx]];
                        for (c, sum) in sums.iter_mut().enumerate().take(color_channels) {
                            *sum += weight * (input[[sy, sx, c]] as f32 / 255.0);
                        }
                    }
                }
                for (c, sum) in sums.iter().enumerate().take(color_channels) {
                    row[x * channels + c] =
                        (sum * 255.0 / divisor + offset).clamp(0.0, 255.0) as u8;
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
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_rgba(height: usize, width: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 4));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = (x * 40) as u8;
                img[[y, x, 1]] = (y * 40) as u8;
                img[[y, x, 2]] = 128;
                img[[y, x, 3]] = 255;
            }
        }
        img
    }

    #[test]
    fn test_clamp_border_preserves_dimensions() {
        let img = gradient_rgba(4, 6);
        let kernel = Kernel::from_rows(
            &[
                vec![1.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
            ],
            1,
            1,
            None,
            0.0,
        )
        .unwrap();

        let result = convolve_u8(img.view(), &kernel, BorderPolicy::ClampToEdge);

        assert_eq!(result.dim(), (4, 6, 4));
    }

    #[test]
    fn test_identity_kernel_reproduces_input() {
        let img = gradient_rgba(3, 5);

        let result = convolve_u8(img.view(), &Kernel::identity(), BorderPolicy::ClampToEdge);

        assert_eq!(result, img);
    }

    #[test]
    fn test_centered_identity_on_black_stays_black() {
        // 3x3 all-black, kernel [[0,0,0],[0,1,0],[0,0,0]], anchor (1,1)
        let mut img = Array3::<u8>::zeros((3, 3, 4));
        for y in 0..3 {
            for x in 0..3 {
                img[[y, x, 3]] = 255;
            }
        }
        let kernel = Kernel::from_rows(
            &[
                vec![0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0],
            ],
            1,
            1,
            Some(1.0),
            0.0,
        )
        .unwrap();

        let result = convolve_u8(img.view(), &kernel, BorderPolicy::ClampToEdge);

        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(result[[y, x, 0]], 0);
                assert_eq!(result[[y, x, 1]], 0);
                assert_eq!(result[[y, x, 2]], 0);
                assert_eq!(result[[y, x, 3]], 255);
            }
        }
    }

    #[test]
    fn test_offset_biases_output() {
        let img = Array3::<u8>::zeros((2, 2, 3));
        let kernel = Kernel::from_rows(&[vec![1.0]], 0, 0, Some(1.0), 40.0).unwrap();

        let result = convolve_u8(img.view(), &kernel, BorderPolicy::ClampToEdge);

        assert_eq!(result[[0, 0, 0]], 40);
        assert_eq!(result[[1, 1, 2]], 40);
    }

    #[test]
    fn test_box_blur_averages_uniform_region() {
        let mut img = Array3::<u8>::zeros((5, 5, 3));
        img.fill(90);
        let kernel = Kernel::from_rows(
            &[
                vec![1.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
            ],
            1,
            1,
            None,
            0.0,
        )
        .unwrap();

        let result = convolve_u8(img.view(), &kernel, BorderPolicy::ClampToEdge);

        // Uniform input stays uniform under an averaging kernel
        assert!((result[[2, 2, 0]] as i32 - 90).abs() <= 1);
        assert!((result[[0, 0, 1]] as i32 - 90).abs() <= 1);
    }

    #[test]
    fn test_skip_margin_leaves_border_untouched() {
        let mut img = Array3::<u8>::zeros((5, 5, 4));
        img.fill(200);
        let kernel = Kernel::from_rows(
            &[
                vec![0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0],
            ],
            1,
            1,
            Some(1.0),
            0.0,
        )
        .unwrap();

        let result = convolve_u8(img.view(), &kernel, BorderPolicy::SkipMargin);

        // Border row/column unprocessed (zeroed), interior computed
        assert_eq!(result[[0, 2, 0]], 0);
        assert_eq!(result[[0, 2, 3]], 0);
        assert_eq!(result[[2, 0, 0]], 0);
        assert_eq!(result[[2, 2, 0]], 200);
        assert_eq!(result[[2, 2, 3]], 255);
    }

    #[test]
    fn test_alpha_forced_opaque() {
        let mut img = gradient_rgba(3, 3);
        img[[1, 1, 3]] = 10;

        let result = convolve_u8(img.view(), &Kernel::identity(), BorderPolicy::ClampToEdge);

        assert_eq!(result[[1, 1, 3]], 255);
    }

    #[test]
    fn test_skip_margin_on_image_smaller_than_kernel() {
        let img = gradient_rgba(2, 2);
        let kernel = Kernel::from_rows(
            &[
                vec![1.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
            ],
            1,
            1,
            None,
            0.0,
        )
        .unwrap();

        let result = convolve_u8(img.view(), &kernel, BorderPolicy::SkipMargin);

        // Nothing is in the interior; the whole output stays zeroed
        assert!(result.iter().all(|&v| v == 0));
    }
}
