//! Grayscale conversion.
//!
//! Uses the BT.601 luma weights, the same weighting the YCbCr transform
//! in [`color_science`](super::color_science) applies to its Y channel.
//! Output is a single-channel (height, width, 1) buffer.

use ndarray::{Array3, ArrayView3};

/// BT.601 luma coefficients.
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// Convert an image to single-channel luminance.
///
/// Grayscale input is copied through; color input is reduced to
/// `0.299 R + 0.587 G + 0.114 B`, truncated to 8 bits. Alpha (if present)
/// is dropped: the output is pure luminance.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// Luminance image of shape (height, width, 1)
pub fn grayscale_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            output[[y, x, 0]] = if channels == 1 {
                input[[y, x, 0]]
            } else {
                pixel_to_gray(
                    input[[y, x, 0]],
                    input[[y, x, 1]],
                    input[[y, x, 2]],
                )
            };
        }
    }
    output
}

/// BT.601 luma of one pixel, truncated to 8 bits.
#[inline]
pub fn pixel_to_gray(r: u8, g: u8, b: u8) -> u8 {
    (LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32) as u8
}
