/// Symmetric 1D kernel of length `2 * radius + 1`.
///
/// Conventions:
/// - `taps[radius]` is the center tap.
/// - Smoothing kernels are normalized such that `sum(taps) ~= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1D {
    pub radius: usize,
    pub taps: Vec<f32>,
}

impl Kernel1D {
    /// Normalized binomial kernel of the given `order`
    /// (`order + 1` taps, row `order` of Pascal's triangle).
    ///
    /// `binomial(4)` is `[1, 4, 6, 4, 1] / 16`, the classic pyramid
    /// reduce low-pass (a discrete Gaussian with sigma ~= 1).
    pub fn binomial(order: usize) -> Self {
        assert!(
            order.is_multiple_of(2),
            "binomial order must be even to have a center tap"
        );

        let mut taps = vec![1.0f64];
        for _ in 0..order {
            let mut next = vec![1.0f64; taps.len() + 1];
            for i in 1..taps.len() {
                next[i] = taps[i - 1] + taps[i];
            }
            taps = next;
        }

        let sum: f64 = taps.iter().sum();
        Self {
            radius: order / 2,
            taps: taps.into_iter().map(|t| (t / sum) as f32).collect(),
        }
    }

    /// The 5-tap pyramid reduce kernel.
    pub fn pyr_down() -> Self {
        Self::binomial(4)
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}
