//! Filter dispatch and the replayable filter pipeline.
//!
//! [`Filter`] is a closed enum over every filter kind; applying one
//! dispatches through a single `match`. [`FilterPipeline`] owns the
//! original image and an ordered filter list and re-derives its output by
//! folding `apply` over the whole list from the original, so the output is
//! always a pure function of (original image, filter list), at the cost of
//! reprocessing on every addition.

use ndarray::{Array3, ArrayView3};
use tracing::debug;

use crate::diffusion::DiffusionKernel;
use crate::error::FilterError;
use crate::filters::color_adjust::{brightness_u8, contrast_u8, gamma_u8, invert_u8};
use crate::filters::convolve::{convolve_u8, BorderPolicy};
use crate::filters::dither::{error_diffusion_u8, luma_diffusion_u8};
use crate::filters::grayscale::grayscale_u8;
use crate::filters::morphology::{morph_u8, MorphOp};
use crate::filters::quantize::uniform_quantize_u8;
use crate::kernel::Kernel;

/// Default factor values from the original configuration surface. The
/// engines take factors explicitly; calling layers may start from these.
pub mod defaults {
    pub const BRIGHTNESS_FACTOR: f32 = 1.2;
    pub const CONTRAST_FACTOR: f32 = 0.2;
    pub const GAMMA: f32 = 1.5;
    pub const MORPHOLOGY_SIZE: usize = 3;
    pub const DITHER_LEVELS: u32 = 2;
}

/// One configured filter.
#[derive(Debug, Clone)]
pub enum Filter {
    Invert,
    Brightness { factor: f32 },
    Contrast { factor: f32 },
    Gamma { gamma: f32 },
    Grayscale,
    Convolution { kernel: Kernel, border: BorderPolicy },
    Morphology { size: usize, op: MorphOp },
    UniformQuantization { k_r: u32, k_g: u32, k_b: u32 },
    ErrorDiffusion { levels: u32, kernel: DiffusionKernel },
    LumaDiffusion { levels: u32, kernel: DiffusionKernel },
}

impl Filter {
    /// Apply this filter to an image, producing a fresh output buffer.
    ///
    /// Rejects empty input; configuration errors surface from the engine
    /// that detects them.
    pub fn apply(&self, input: ArrayView3<u8>) -> Result<Array3<u8>, FilterError> {
        let (height, width, _) = input.dim();
        if height == 0 || width == 0 {
            return Err(FilterError::EmptyImage);
        }
        match self {
            Filter::Invert => Ok(invert_u8(input)),
            Filter::Brightness { factor } => Ok(brightness_u8(input, *factor)),
            Filter::Contrast { factor } => Ok(contrast_u8(input, *factor)),
            Filter::Gamma { gamma } => Ok(gamma_u8(input, *gamma)),
            Filter::Grayscale => Ok(grayscale_u8(input)),
            Filter::Convolution { kernel, border } => Ok(convolve_u8(input, kernel, *border)),
            Filter::Morphology { size, op } => morph_u8(input, *size, *op),
            Filter::UniformQuantization { k_r, k_g, k_b } => {
                Ok(uniform_quantize_u8(input, *k_r, *k_g, *k_b))
            }
            Filter::ErrorDiffusion { levels, kernel } => {
                error_diffusion_u8(input, *levels, kernel)
            }
            Filter::LumaDiffusion { levels, kernel } => {
                luma_diffusion_u8(input, *levels, kernel)
            }
        }
    }

    /// Short name for logging.
    fn name(&self) -> &'static str {
        match self {
            Filter::Invert => "invert",
            Filter::Brightness { .. } => "brightness",
            Filter::Contrast { .. } => "contrast",
            Filter::Gamma { .. } => "gamma",
            Filter::Grayscale => "grayscale",
            Filter::Convolution { .. } => "convolution",
            Filter::Morphology { .. } => "morphology",
            Filter::UniformQuantization { .. } => "uniform-quantization",
            Filter::ErrorDiffusion { .. } => "error-diffusion",
            Filter::LumaDiffusion { .. } => "luma-diffusion",
        }
    }
}

/// An ordered, replayable sequence of filters over one original image.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    original: Array3<u8>,
    current: Array3<u8>,
    filters: Vec<Filter>,
}

impl FilterPipeline {
    /// Create a pipeline over an image; the output starts as a copy of it.
    pub fn new(original: Array3<u8>) -> Result<Self, FilterError> {
        let (height, width, _) = original.dim();
        if height == 0 || width == 0 {
            return Err(FilterError::EmptyImage);
        }
        let current = original.clone();
        Ok(Self {
            original,
            current,
            filters: Vec::new(),
        })
    }

    /// Append a filter and recompute the output by replaying the entire
    /// list from the original image.
    ///
    /// On failure nothing changes: the filter is not added and the
    /// previous output stays in place.
    pub fn add_filter(&mut self, filter: Filter) -> Result<&Array3<u8>, FilterError> {
        let mut image = self.original.clone();
        for f in self.filters.iter().chain(std::iter::once(&filter)) {
            image = f.apply(image.view())?;
        }
        debug!(filter = filter.name(), count = self.filters.len() + 1, "applied filter");
        self.filters.push(filter);
        self.current = image;
        Ok(&self.current)
    }

    /// Drop all filters and restore the output to the original image.
    pub fn reset(&mut self) {
        self.filters.clear();
        self.current = self.original.clone();
    }

    /// The current output image.
    pub fn output(&self) -> &Array3<u8> {
        &self.current
    }

    /// The untouched original image.
    pub fn original(&self) -> &Array3<u8> {
        &self.original
    }

    /// The filters applied so far, in order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}
