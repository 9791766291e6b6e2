//! Error types for filter configuration and kernel file parsing.
//!
//! All validation happens eagerly at the boundary of the operation that
//! first observes the invalid input. Nothing in this crate substitutes a
//! default for structurally invalid configuration.

use thiserror::Error;

/// Errors reported by filter construction and application.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Convolution kernels must be odd-sized in both axes.
    #[error("kernel dimensions must be odd, got {width}x{height}")]
    EvenKernelDimension { width: usize, height: usize },

    /// Kernel rows were empty or of unequal length.
    #[error("kernel rows must be non-empty and of equal length")]
    RaggedKernel,

    /// The kernel anchor must address a cell inside the kernel.
    #[error("anchor ({x}, {y}) lies outside the {width}x{height} kernel")]
    AnchorOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A convolution divisor of zero cannot normalize anything.
    #[error("convolution divisor must be non-zero")]
    ZeroDivisor,

    /// Morphological windows must be odd so they center on a pixel.
    #[error("morphological window size must be odd, got {0}")]
    EvenWindow(usize),

    /// Error diffusion needs at least two quantization levels.
    #[error("dithering requires at least 2 levels, got {0}")]
    TooFewLevels(u32),

    /// A filter was invoked on a zero-sized pixel buffer.
    #[error("input image is empty")]
    EmptyImage,

    /// A kernel file failed to decode.
    #[error(transparent)]
    Format(#[from] KernelFormatError),
}

/// Errors reported by the kernel text codec.
#[derive(Debug, Error)]
pub enum KernelFormatError {
    /// Fewer lines than the header and kernel rows require.
    #[error("kernel file truncated: expected at least {expected} lines, got {got}")]
    Truncated { expected: usize, got: usize },

    /// Line 1 was neither `width height` nor the legacy single `size`.
    #[error("invalid kernel size header {0:?}")]
    InvalidHeader(String),

    /// A field that must be numeric was not.
    #[error("invalid numeric field on line {line}: {value:?}")]
    InvalidNumber { line: usize, value: String },

    /// A kernel row did not match the declared width.
    #[error("kernel row {row} has {got} values, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Declared dimensions must be odd.
    #[error("kernel dimensions must be odd, got {width}x{height}")]
    EvenDimension { width: usize, height: usize },

    /// Reading or writing a kernel file failed.
    #[error("kernel file I/O failed")]
    Io(#[from] std::io::Error),
}
