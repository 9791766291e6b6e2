//! Error diffusion kernel definitions.
//!
//! Each kernel is a weight matrix centered on the pixel being quantized,
//! with half-extents `(fx, fy)` giving its reach. Cells at or before the
//! current raster position carry zero weight, so error only flows to
//! pixels that have not been visited yet.

/// An error diffusion kernel.
///
/// `weights` has `2 * fy + 1` rows of `2 * fx + 1` entries; the cell at
/// `(fy, fx)` is the pixel being quantized. Each neighbor at offset
/// `(dx, dy)` receives `error * weight(dx, dy)` of the quantization error.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionKernel {
    /// Name used by the configuration surface to select this kernel.
    pub name: &'static str,
    weights: &'static [&'static [f32]],
    /// Horizontal half-extent.
    pub fx: usize,
    /// Vertical half-extent.
    pub fy: usize,
}

impl DiffusionKernel {
    /// Weight for the neighbor at offset `(dx, dy)` from the current
    /// pixel, with `dx` in `[-fx, fx]` and `dy` in `[-fy, fy]`.
    #[inline]
    pub fn weight(&self, dx: isize, dy: isize) -> f32 {
        self.weights[(dy + self.fy as isize) as usize][(dx + self.fx as isize) as usize]
    }

    /// Look up a standard kernel by its configuration name.
    pub fn by_name(name: &str) -> Option<Self> {
        ALL_KERNELS.iter().copied().find(|k| k.name == name)
    }

    /// Sum of all weights (the fraction of error propagated).
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().flat_map(|row| row.iter()).sum()
    }
}

/// Floyd-Steinberg kernel.
///
/// ```text
///       X   7
///   3   5   1      (/ 16)
/// ```
pub const FLOYD_STEINBERG: DiffusionKernel = DiffusionKernel {
    name: "FloydSteinberg",
    weights: &[
        &[0.0, 0.0, 0.0],
        &[0.0, 0.0, 7.0 / 16.0],
        &[3.0 / 16.0, 5.0 / 16.0, 1.0 / 16.0],
    ],
    fx: 1,
    fy: 1,
};

/// Burkes kernel.
///
/// ```text
///           X   8   4
///   2   4   8   4   2      (/ 32)
/// ```
pub const BURKES: DiffusionKernel = DiffusionKernel {
    name: "Burkes",
    weights: &[
        &[0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 8.0 / 32.0, 4.0 / 32.0],
        &[2.0 / 32.0, 4.0 / 32.0, 8.0 / 32.0, 4.0 / 32.0, 2.0 / 32.0],
    ],
    fx: 2,
    fy: 1,
};

/// Stucki kernel.
///
/// ```text
///           X   8   4
///   2   4   8   4   2
///   1   2   4   2   1      (/ 42)
/// ```
pub const STUCKI: DiffusionKernel = DiffusionKernel {
    name: "Stucki",
    weights: &[
        &[0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 8.0 / 42.0, 4.0 / 42.0],
        &[2.0 / 42.0, 4.0 / 42.0, 8.0 / 42.0, 4.0 / 42.0, 2.0 / 42.0],
        &[1.0 / 42.0, 2.0 / 42.0, 4.0 / 42.0, 2.0 / 42.0, 1.0 / 42.0],
    ],
    fx: 2,
    fy: 2,
};

/// Sierra (three-row) kernel.
///
/// ```text
///           X   5   3
///   2   4   5   4   2
///       2   3   2          (/ 32)
/// ```
pub const SIERRA: DiffusionKernel = DiffusionKernel {
    name: "Sierra",
    weights: &[
        &[0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 5.0 / 32.0, 3.0 / 32.0],
        &[2.0 / 32.0, 4.0 / 32.0, 5.0 / 32.0, 4.0 / 32.0, 2.0 / 32.0],
        &[0.0, 2.0 / 32.0, 3.0 / 32.0, 2.0 / 32.0, 0.0],
    ],
    fx: 2,
    fy: 2,
};

/// Atkinson kernel.
///
/// Propagates only 6/8 of the error, which lightens shadows but reduces
/// bleeding at hard edges.
///
/// ```text
///       X   1   1
///   1   1   1
///       1                  (/ 8)
/// ```
pub const ATKINSON: DiffusionKernel = DiffusionKernel {
    name: "Atkinson",
    weights: &[
        &[0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 1.0 / 8.0, 1.0 / 8.0],
        &[0.0, 1.0 / 8.0, 1.0 / 8.0, 1.0 / 8.0, 0.0],
        &[0.0, 0.0, 1.0 / 8.0, 0.0, 0.0],
    ],
    fx: 2,
    fy: 2,
};

/// All standard kernels, in the order the configuration surface lists them.
pub const ALL_KERNELS: [DiffusionKernel; 5] =
    [FLOYD_STEINBERG, BURKES, STUCKI, SIERRA, ATKINSON];
