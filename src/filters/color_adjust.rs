//! Point transforms: Invert, Brightness, Contrast, Gamma.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Input samples are 8-bit; the arithmetic runs in f32 on values
//! normalized to 0.0-1.0 and is clamped back to 0-255.
//!
//! ## Supported Formats
//!
//! All filters accept images with 1, 3, or 4 channels:
//! - **Grayscale**: (height, width, 1) - single luminance channel
//! - **RGB**: (height, width, 3) - red, green, blue
//! - **RGBA**: (height, width, 4) - red, green, blue, alpha
//!
//! Channel count is inferred from the input array dimensions.
//! Alpha channel (if present) is always preserved unchanged.

use ndarray::{Array3, ArrayView3};

// ============================================================================
// Invert
// ============================================================================

/// Invert image colors.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// Color-inverted image (alpha preserved if present)
pub fn invert_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    let color_channels = if channels == 4 { 3 } else { channels };

    for y in 0..height {
        for x in 0..width {
            for c in 0..color_channels {
                output[[y, x, c]] = 255 - input[[y, x, c]];
            }
            if channels == 4 {
                output[[y, x, 3]] = input[[y, x, 3]];
            }
        }
    }
    output
}

// ============================================================================
// Brightness
// ============================================================================

/// Scale image brightness by a multiplicative factor.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `factor` - Multiplier on the normalized value; 1.0 = no change
///
/// # Returns
/// Brightness-adjusted image with same channel count
pub fn brightness_u8(input: ArrayView3<u8>, factor: f32) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    let color_channels = if channels == 4 { 3 } else { channels };

    for y in 0..height {
        for x in 0..width {
            for c in 0..color_channels {
                let v = input[[y, x, c]] as f32 / 255.0;
                output[[y, x, c]] = (v * factor * 255.0).clamp(0.0, 255.0) as u8;
            }
            if channels == 4 {
                output[[y, x, 3]] = input[[y, x, 3]];
            }
        }
    }
    output
}

// ============================================================================
// Contrast
// ============================================================================

/// Adjust contrast by amplifying each value's distance from mid-gray.
///
/// Each normalized value `v` becomes `v + factor * (v - 0.5)`: positive
/// factors push values away from 0.5, negative factors pull them in.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `factor` - Contrast gain; 0.0 = no change
///
/// # Returns
/// Contrast-adjusted image with same channel count
pub fn contrast_u8(input: ArrayView3<u8>, factor: f32) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    let color_channels = if channels == 4 { 3 } else { channels };

    for y in 0..height {
        for x in 0..width {
            for c in 0..color_channels {
                let v = input[[y, x, c]] as f32 / 255.0;
                let shifted = (v + factor * (v - 0.5)).clamp(0.0, 1.0);
                output[[y, x, c]] = (shifted * 255.0).clamp(0.0, 255.0) as u8;
            }
            if channels == 4 {
                output[[y, x, 3]] = input[[y, x, 3]];
            }
        }
    }
    output
}

// ============================================================================
// Gamma
// ============================================================================

/// Apply gamma correction.
///
/// Each normalized value is raised to the power `gamma`: values above 1.0
/// darken the image, values below brighten it.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `gamma` - Exponent applied to the normalized value; 1.0 = no change
///
/// # Returns
/// Gamma-corrected image with same channel count
pub fn gamma_u8(input: ArrayView3<u8>, gamma: f32) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    let color_channels = if channels == 4 { 3 } else { channels };

    for y in 0..height {
        for x in 0..width {
            for c in 0..color_channels {
                let v = input[[y, x, c]] as f32 / 255.0;
                output[[y, x, c]] = (v.powf(gamma) * 255.0).clamp(0.0, 255.0) as u8;
            }
            if channels == 4 {
                output[[y, x, 3]] = input[[y, x, 3]];
            }
        }
    }
    output
}
