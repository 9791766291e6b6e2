//! Error-diffusion dithering.
//!
//! Quantizes each sample to the nearest rung of a uniform ladder and
//! propagates the rounding error to unvisited neighbors through a
//! [`DiffusionKernel`]. Processing order is raster order (row-major,
//! top-to-bottom, left-to-right) and must stay sequential: every pixel
//! reads error contributions written by its predecessors.
//!
//! Two instantiations are provided: per-channel diffusion over the color
//! channels present, and luma-only diffusion in YCbCr space which leaves
//! chroma untouched.

use ndarray::{Array2, Array3, ArrayView3};
use tracing::debug;

use crate::diffusion::DiffusionKernel;
use crate::error::FilterError;
use crate::filters::color_science::{split_ycbcr, ycbcr_to_rgb};

/// Diffuse one plane in place.
///
/// On entry the plane holds the channel's original values (0-255 scale);
/// on exit every cell holds its quantized rung. `levels` must already be
/// validated to be at least 2.
pub(crate) fn diffuse_plane(plane: &mut Array2<f32>, levels: u32, kernel: &DiffusionKernel) {
    let (height, width) = plane.dim();
    let step = 255.0 / (levels - 1) as f32;
    let fx = kernel.fx as isize;
    let fy = kernel.fy as isize;

    for y in 0..height {
        for x in 0..width {
            let acc = plane[[y, x]];
            let rung = (acc / step).round() * step;
            plane[[y, x]] = rung;
            let err = acc - rung;

            for dy in -fy..=fy {
                for dx in -fx..=fx {
                    let weight = kernel.weight(dx, dy);
                    if weight == 0.0 {
                        continue;
                    }
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx >= 0 && nx < width as isize && ny >= 0 && ny < height as isize {
                        plane[[ny as usize, nx as usize]] += err * weight;
                    }
                }
            }
        }
    }
}

/// Dither each color channel independently.
///
/// Every channel present (1 or 3) gets its own error plane seeded with the
/// channel's original values. Alpha (if present) is preserved.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `levels` - Rungs on the quantization ladder, at least 2
/// * `kernel` - Error diffusion kernel
///
/// # Returns
/// Dithered image with same channel count
pub fn error_diffusion_u8(
    input: ArrayView3<u8>,
    levels: u32,
    kernel: &DiffusionKernel,
) -> Result<Array3<u8>, FilterError> {
    if levels < 2 {
        return Err(FilterError::TooFewLevels(levels));
    }
    let (height, width, channels) = input.dim();
    let color_channels = if channels == 4 { 3 } else { channels };
    let mut output = Array3::<u8>::zeros((height, width, channels));

    debug!(kernel = kernel.name, levels, "error diffusion");

    for c in 0..color_channels {
        let mut plane = Array2::<f32>::zeros((height, width));
        for y in 0..height {
            for x in 0..width {
                plane[[y, x]] = input[[y, x, c]] as f32;
            }
        }
        diffuse_plane(&mut plane, levels, kernel);
        for y in 0..height {
            for x in 0..width {
                output[[y, x, c]] = plane[[y, x]].clamp(0.0, 255.0) as u8;
            }
        }
    }

    if channels == 4 {
        for y in 0..height {
            for x in 0..width {
                output[[y, x, 3]] = input[[y, x, 3]];
            }
        }
    }
    Ok(output)
}

/// Dither perceptual brightness only.
///
/// The image is transformed to YCbCr, the Y plane is error-diffused, and
/// the result is transformed back with the original chroma. Single-channel
/// input degenerates to plain single-plane diffusion. For RGBA input the
/// output alpha is forced opaque.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `levels` - Rungs on the quantization ladder, at least 2
/// * `kernel` - Error diffusion kernel
///
/// # Returns
/// Luma-dithered image with same channel count
pub fn luma_diffusion_u8(
    input: ArrayView3<u8>,
    levels: u32,
    kernel: &DiffusionKernel,
) -> Result<Array3<u8>, FilterError> {
    if levels < 2 {
        return Err(FilterError::TooFewLevels(levels));
    }
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    debug!(kernel = kernel.name, levels, "luma diffusion");

    let (mut y_plane, cb_plane, cr_plane) = split_ycbcr(input);
    diffuse_plane(&mut y_plane, levels, kernel);

    for y in 0..height {
        for x in 0..width {
            if channels == 1 {
                output[[y, x, 0]] = y_plane[[y, x]].clamp(0.0, 255.0) as u8;
            } else {
                let (r, g, b) =
                    ycbcr_to_rgb(y_plane[[y, x]], cb_plane[[y, x]], cr_plane[[y, x]]);
                output[[y, x, 0]] = r as u8;
                output[[y, x, 1]] = g as u8;
                output[[y, x, 2]] = b as u8;
                if channels == 4 {
                    output[[y, x, 3]] = 255;
                }
            }
        }
    }
    Ok(output)
}
