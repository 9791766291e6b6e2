//! Convolution kernel value type.
//!
//! A [`Kernel`] bundles the weight matrix with the anchor, divisor and
//! offset that the convolution engine applies after the weighted sum.
//! Construction validates every structural invariant up front, so a
//! `Kernel` in hand is always safe to convolve with.

use ndarray::Array2;

use crate::error::FilterError;

/// A validated convolution kernel.
///
/// Invariants enforced at construction:
/// - odd width and odd height,
/// - anchor inside the kernel bounds,
/// - non-zero divisor.
///
/// The divisor may be supplied explicitly or auto-computed as the sum of
/// all weights (falling back to 1 when that sum is 0, e.g. for edge
/// detection kernels).
#[derive(Debug, Clone)]
pub struct Kernel {
    weights: Array2<f32>,
    anchor_x: usize,
    anchor_y: usize,
    divisor: f32,
    offset: f32,
}

impl Kernel {
    /// Build a kernel from a weight matrix.
    ///
    /// # Arguments
    /// * `weights` - (height, width) weight matrix, both dimensions odd
    /// * `anchor_x`, `anchor_y` - kernel cell aligned with the output pixel
    /// * `divisor` - post-sum normalizer; `None` selects the auto divisor
    /// * `offset` - brightness bias added after division
    pub fn new(
        weights: Array2<f32>,
        anchor_x: usize,
        anchor_y: usize,
        divisor: Option<f32>,
        offset: f32,
    ) -> Result<Self, FilterError> {
        let (height, width) = weights.dim();
        if width == 0 || height == 0 {
            return Err(FilterError::RaggedKernel);
        }
        if width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::EvenKernelDimension { width, height });
        }
        if anchor_x >= width || anchor_y >= height {
            return Err(FilterError::AnchorOutOfBounds {
                x: anchor_x,
                y: anchor_y,
                width,
                height,
            });
        }
        let divisor = match divisor {
            Some(d) if d == 0.0 => return Err(FilterError::ZeroDivisor),
            Some(d) => d,
            None => Self::auto_divisor(&weights),
        };
        Ok(Self {
            weights,
            anchor_x,
            anchor_y,
            divisor,
            offset,
        })
    }

    /// Build a kernel from row slices, validating that all rows are
    /// non-empty and of equal length. This is the entry point for kernels
    /// arriving from a configuration surface (text fields, files).
    pub fn from_rows(
        rows: &[Vec<f32>],
        anchor_x: usize,
        anchor_y: usize,
        divisor: Option<f32>,
        offset: f32,
    ) -> Result<Self, FilterError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if height == 0 || width == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(FilterError::RaggedKernel);
        }
        let mut weights = Array2::<f32>::zeros((height, width));
        for (ky, row) in rows.iter().enumerate() {
            for (kx, &w) in row.iter().enumerate() {
                weights[[ky, kx]] = w;
            }
        }
        Self::new(weights, anchor_x, anchor_y, divisor, offset)
    }

    /// The 1x1 identity kernel: convolving with it reproduces the input.
    pub fn identity() -> Self {
        let mut weights = Array2::<f32>::zeros((1, 1));
        weights[[0, 0]] = 1.0;
        Self {
            weights,
            anchor_x: 0,
            anchor_y: 0,
            divisor: 1.0,
            offset: 0.0,
        }
    }

    /// Sum of all weights, or 1 when the sum is 0.
    pub fn auto_divisor(weights: &Array2<f32>) -> f32 {
        let sum: f32 = weights.iter().sum();
        if sum == 0.0 {
            1.0
        } else {
            sum
        }
    }

    pub fn width(&self) -> usize {
        self.weights.dim().1
    }

    pub fn height(&self) -> usize {
        self.weights.dim().0
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    pub fn anchor_x(&self) -> usize {
        self.anchor_x
    }

    pub fn anchor_y(&self) -> usize {
        self.anchor_y
    }

    pub fn divisor(&self) -> f32 {
        self.divisor
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_divisor_is_weight_sum() {
        let kernel = Kernel::from_rows(
            &[
                vec![1.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
            ],
            1,
            1,
            None,
            0.0,
        )
        .unwrap();

        assert_eq!(kernel.divisor(), 9.0);
    }

    #[test]
    fn test_auto_divisor_zero_sum_defaults_to_one() {
        let kernel = Kernel::from_rows(
            &[
                vec![-1.0, 0.0, 1.0],
                vec![-1.0, 0.0, 1.0],
                vec![-1.0, 0.0, 1.0],
            ],
            1,
            1,
            None,
            0.0,
        )
        .unwrap();

        assert_eq!(kernel.divisor(), 1.0);
    }

    #[test]
    fn test_even_dimension_rejected() {
        let result = Kernel::from_rows(
            &[vec![1.0, -1.0], vec![-1.0, 1.0]],
            0,
            0,
            None,
            0.0,
        );

        assert!(matches!(
            result,
            Err(FilterError::EvenKernelDimension { width: 2, height: 2 })
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Kernel::from_rows(&[vec![1.0, 2.0, 3.0], vec![1.0]], 0, 0, None, 0.0);

        assert!(matches!(result, Err(FilterError::RaggedKernel)));
    }

    #[test]
    fn test_anchor_outside_kernel_rejected() {
        let result = Kernel::from_rows(&[vec![1.0]], 1, 0, None, 0.0);

        assert!(matches!(
            result,
            Err(FilterError::AnchorOutOfBounds { x: 1, y: 0, .. })
        ));
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let result = Kernel::from_rows(&[vec![1.0]], 0, 0, Some(0.0), 0.0);

        assert!(matches!(result, Err(FilterError::ZeroDivisor)));
    }

    #[test]
    fn test_identity_kernel_shape() {
        let kernel = Kernel::identity();

        assert_eq!(kernel.width(), 1);
        assert_eq!(kernel.height(), 1);
        assert_eq!(kernel.weights()[[0, 0]], 1.0);
        assert_eq!(kernel.divisor(), 1.0);
        assert_eq!(kernel.offset(), 0.0);
    }
}
