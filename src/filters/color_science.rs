//! Colorspace conversion: RGB <-> YCbCr.
//!
//! BT.601 full-range transform with chroma centered on 128, used by the
//! luma-only dithering filter so that perceptual brightness can be
//! quantized independently of color.

use ndarray::{Array2, ArrayView3};

/// Convert one RGB pixel (0-255 scale) to YCbCr (0-255 scale).
#[inline]
pub fn rgb_to_ycbcr(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0;
    let cr = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0;
    (y, cb, cr)
}

/// Convert one YCbCr pixel back to RGB, clamped to 0-255.
#[inline]
pub fn ycbcr_to_rgb(y: f32, cb: f32, cr: f32) -> (f32, f32, f32) {
    let r = y + 1.402 * (cr - 128.0);
    let g = y - 0.344136 * (cb - 128.0) - 0.714136 * (cr - 128.0);
    let b = y + 1.772 * (cb - 128.0);
    (
        r.clamp(0.0, 255.0),
        g.clamp(0.0, 255.0),
        b.clamp(0.0, 255.0),
    )
}

/// Split a color image into Y, Cb and Cr planes.
///
/// Single-channel input yields a Y plane equal to the channel with both
/// chroma planes held at the neutral 128.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// `(y, cb, cr)` planes of shape (height, width)
pub fn split_ycbcr(input: ArrayView3<u8>) -> (Array2<f32>, Array2<f32>, Array2<f32>) {
    let (height, width, channels) = input.dim();
    let mut y_plane = Array2::<f32>::zeros((height, width));
    let mut cb_plane = Array2::<f32>::from_elem((height, width), 128.0);
    let mut cr_plane = Array2::<f32>::from_elem((height, width), 128.0);

    for y in 0..height {
        for x in 0..width {
            if channels == 1 {
                y_plane[[y, x]] = input[[y, x, 0]] as f32;
            } else {
                let (yv, cb, cr) = rgb_to_ycbcr(
                    input[[y, x, 0]] as f32,
                    input[[y, x, 1]] as f32,
                    input[[y, x, 2]] as f32,
                );
                y_plane[[y, x]] = yv;
                cb_plane[[y, x]] = cb;
                cr_plane[[y, x]] = cr;
            }
        }
    }
    (y_plane, cb_plane, cr_plane)
}
