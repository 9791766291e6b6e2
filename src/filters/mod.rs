//! Filter engines.
//!
//! ## Supported Formats
//!
//! All engines accept images with 1, 3, or 4 channels:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! Channel count is inferred from input array dimensions. Samples are
//! 8-bit; internal arithmetic runs in f32.
//!
//! ## Architecture
//!
//! - **Pure** - Every engine reads its input view and allocates a fresh
//!   output; nothing is mutated in place and no global state exists.
//! - **Alpha rules per engine** - Point transforms preserve alpha;
//!   convolution, morphology and luma dithering force it opaque; see each
//!   module.
//! - **Parallelism** - Convolution and morphology compute output rows in
//!   parallel with rayon. Error diffusion is inherently sequential in
//!   raster order and stays single-threaded.
//!
//! ## Engine Categories
//!
//! - **Point transforms**: invert, brightness, contrast, gamma
//! - **Grayscale**: BT.601 luma reduction to one channel
//! - **Convolution**: odd-sized weighted kernels, two border policies
//! - **Morphology**: erode, dilate over a square window
//! - **Quantization**: two-pass uniform bucket means
//! - **Dithering**: per-channel and YCbCr-luma error diffusion
//! - **Color science**: RGB <-> YCbCr conversion

pub mod color_adjust;
pub mod color_science;
pub mod convolve;
pub mod dither;
pub mod grayscale;
pub mod morphology;
pub mod quantize;
