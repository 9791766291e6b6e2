//! Uniform color quantization.
//!
//! Reduces each channel's range to K equal-width buckets and replaces
//! every sample with its bucket's mean value. Two full passes are
//! required: bucket means are only known after the whole image has been
//! scanned, so a single-pass approximation would change the output.

use ndarray::{Array3, ArrayView3};

/// Quantize each color channel to `k` equal-width buckets.
///
/// Each K is clamped to 1-256. For single-channel input only `k_r`
/// applies. Alpha (if present) is passed through unchanged.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `k_r`, `k_g`, `k_b` - Bucket counts per channel
///
/// # Returns
/// Quantized image with same channel count
pub fn uniform_quantize_u8(input: ArrayView3<u8>, k_r: u32, k_g: u32, k_b: u32) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    let color_channels = if channels == 4 { 3 } else { channels };
    let ks = [
        k_r.clamp(1, 256),
        k_g.clamp(1, 256),
        k_b.clamp(1, 256),
    ];

    for c in 0..color_channels {
        let k = ks[c] as usize;
        let step = 256 / k as u32;

        // Pass 1: bucket sums and counts
        let mut sums = vec![0u64; k];
        let mut counts = vec![0usize; k];
        for y in 0..height {
            for x in 0..width {
                let v = input[[y, x, c]] as u32;
                let bucket = ((v / step) as usize).min(k - 1);
                sums[bucket] += v as u64;
                counts[bucket] += 1;
            }
        }

        // Bucket means; empty buckets map to 0
        let means: Vec<u8> = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| {
                if count == 0 {
                    0
                } else {
                    (sum / count as u64) as u8
                }
            })
            .collect();

        // Pass 2: rewrite every sample with its bucket mean
        for y in 0..height {
            for x in 0..width {
                let v = input[[y, x, c]] as u32;
                let bucket = ((v / step) as usize).min(k - 1);
                output[[y, x, c]] = means[bucket];
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
    output
}
