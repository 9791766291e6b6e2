//! rasterkit
//!
//! The computational core of a raster-image filter application: point
//! transforms, generic 2D convolution, morphological erosion/dilation,
//! uniform color quantization, error-diffusion dithering (per-channel and
//! YCbCr luma-only), a replayable filter pipeline and a text codec for
//! convolution kernel files.
//!
//! ## Image Format
//!
//! Images are `ndarray` arrays of shape (height, width, channels) with
//! 8-bit samples; channel count is 1 (grayscale), 3 (RGB) or 4 (RGBA) and
//! is inferred from the array shape. Decoding image files and rendering
//! results are the calling layer's concern.
//!
//! ## Usage
//!
//! ```
//! use ndarray::Array3;
//! use rasterkit::{Filter, FilterPipeline};
//!
//! let image = Array3::<u8>::zeros((4, 4, 4));
//! let mut pipeline = FilterPipeline::new(image)?;
//! pipeline.add_filter(Filter::Invert)?;
//! pipeline.add_filter(Filter::Gamma { gamma: 1.5 })?;
//! let output = pipeline.output();
//! # assert_eq!(output.dim(), (4, 4, 4));
//! # Ok::<(), rasterkit::FilterError>(())
//! ```

pub mod codec;
pub mod diffusion;
pub mod error;
pub mod filters;
pub mod kernel;
pub mod pipeline;

pub use codec::{decode_kernel, encode_kernel, load_kernel_dir, read_kernel_file, write_kernel_file};
pub use diffusion::{DiffusionKernel, ALL_KERNELS, ATKINSON, BURKES, FLOYD_STEINBERG, SIERRA, STUCKI};
pub use error::{FilterError, KernelFormatError};
pub use filters::convolve::BorderPolicy;
pub use filters::morphology::MorphOp;
pub use kernel::Kernel;
pub use pipeline::{defaults, Filter, FilterPipeline};
