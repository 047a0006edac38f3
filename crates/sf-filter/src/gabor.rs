//! Gabor quadrature filter banks.
//!
//! A kernel at angle `theta` and phase `psi` is sampled on the integer grid
//! `[-sz, sz]^2`. With `dy` the row offset and `dx` the column offset, the grid
//! is rotated into
//!
//! ```text
//! major =  dy * cos(theta) - dx * sin(theta)
//! minor = -dy * sin(theta) - dx * cos(theta)
//! ```
//!
//! and evaluated as
//!
//! ```text
//! cos(omega * major + psi) * exp(-major^2 / (2 sd_major^2) - minor^2 / (2 sd_minor^2))
//! ```
//!
//! with `omega = 2 pi / period` and `sd_minor = stddev * elongation`. Each
//! kernel is then shifted to zero mean and scaled to unit L2 norm.
//!
//! At `theta = 0` the carrier varies along rows, so the filter responds to
//! horizontal structure.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use sf_core::Image;
use thiserror::Error;

/// Requests automatic kernel sizing from the envelope width.
pub const AUTO_FILTER_SIZE: i32 = -1;

/// Largest kernel radius accepted; the side is `2 * MAX_RADIUS + 1`.
pub const MAX_RADIUS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaborError {
    #[error("gabor {name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("gabor filter size must be positive or -1 (automatic), got {0}")]
    InvalidSize(i32),
    #[error("gabor kernel radius {radius} exceeds the maximum of {max}")]
    TooLarge { radius: f64, max: usize },
    #[error("gabor angle must be finite, got {0}")]
    InvalidAngle(f64),
    #[error("gabor kernel at {angle_deg} deg, phase {phase:?} has zero energy")]
    ZeroNorm { angle_deg: f64, phase: Phase },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaborParams {
    /// Standard deviation along the carrier (major axis), in pixels.
    pub stddev: f64,
    /// Minor-axis standard deviation as a multiple of `stddev`.
    pub elongation: f64,
    /// Kernel side length, or [`AUTO_FILTER_SIZE`].
    pub filter_size: i32,
    /// Carrier wavelength, in pixels.
    pub period: f64,
}

impl Default for GaborParams {
    fn default() -> Self {
        Self {
            stddev: 2.0,
            elongation: 2.0,
            filter_size: AUTO_FILTER_SIZE,
            period: PI,
        }
    }
}

impl GaborParams {
    pub fn validate(&self) -> Result<(), GaborError> {
        for (name, value) in [
            ("stddev", self.stddev),
            ("elongation", self.elongation),
            ("period", self.period),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GaborError::NonPositive { name, value });
            }
        }

        let minor = self.stddev * self.elongation;
        if !minor.is_finite() {
            return Err(GaborError::NonPositive {
                name: "stddev * elongation",
                value: minor,
            });
        }

        if self.filter_size != AUTO_FILTER_SIZE && self.filter_size <= 0 {
            return Err(GaborError::InvalidSize(self.filter_size));
        }

        Ok(())
    }

    /// Kernel radius `sz`; the kernel side is `2 * sz + 1`.
    ///
    /// Automatic sizing uses `ceil(max(sd_major, sd_minor) * sqrt(10))`, an
    /// explicit size `s` gives `floor(s / 2)`. Radii above [`MAX_RADIUS`]
    /// are rejected.
    pub fn radius(&self) -> Result<usize, GaborError> {
        self.validate()?;

        let radius = if self.filter_size == AUTO_FILTER_SIZE {
            let max_sd = self.stddev.max(self.stddev * self.elongation);
            (max_sd * 10f64.sqrt()).ceil()
        } else {
            f64::from(self.filter_size / 2)
        };

        if !(radius.is_finite() && radius <= MAX_RADIUS as f64) {
            return Err(GaborError::TooLarge {
                radius,
                max: MAX_RADIUS,
            });
        }
        Ok(radius as usize)
    }
}

/// Quadrature phase of a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// 0 deg, cosine carrier, symmetric.
    Even,
    /// 90 deg, sine carrier, antisymmetric.
    Odd,
}

impl Phase {
    pub fn degrees(self) -> f64 {
        match self {
            Self::Even => 0.0,
            Self::Odd => 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaborKernel {
    pub angle_deg: f64,
    pub phase: Phase,
    pub radius: usize,
    /// `(2 * radius + 1)^2` taps, zero mean and unit L2 norm.
    pub taps: Image<f64>,
}

impl GaborKernel {
    pub fn side(&self) -> usize {
        2 * self.radius + 1
    }

    pub fn mean(&self) -> f64 {
        self.taps.data().iter().sum::<f64>() / self.taps.data().len() as f64
    }

    pub fn l2_norm(&self) -> f64 {
        self.taps.data().iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

pub fn gabor_kernel(
    params: &GaborParams,
    angle_deg: f64,
    phase: Phase,
) -> Result<GaborKernel, GaborError> {
    if !angle_deg.is_finite() {
        return Err(GaborError::InvalidAngle(angle_deg));
    }
    let radius = params.radius()?;

    let sd_major = params.stddev;
    let sd_minor = params.stddev * params.elongation;
    let major_sigq = 2.0 * sd_major * sd_major;
    let minor_sigq = 2.0 * sd_minor * sd_minor;
    let omega = 2.0 * PI / params.period;
    let psi = phase.degrees().to_radians();
    let (sin_t, cos_t) = angle_deg.to_radians().sin_cos();

    let side = 2 * radius + 1;
    let r = radius as f64;
    let mut taps = Image::from_fn(side, side, |x, y| {
        let dx = x as f64 - r;
        let dy = y as f64 - r;
        let major = dy * cos_t - dx * sin_t;
        let minor = -dy * sin_t - dx * cos_t;
        (omega * major + psi).cos()
            * (-(major * major) / major_sigq - (minor * minor) / minor_sigq).exp()
    });

    let n = taps.data().len() as f64;
    let mean = taps.data().iter().sum::<f64>() / n;
    for v in taps.data_mut() {
        *v -= mean;
    }

    let norm = taps.data().iter().map(|v| v * v).sum::<f64>().sqrt();
    if !(norm.is_finite() && norm > f64::EPSILON) {
        return Err(GaborError::ZeroNorm { angle_deg, phase });
    }
    for v in taps.data_mut() {
        *v /= norm;
    }

    Ok(GaborKernel {
        angle_deg,
        phase,
        radius,
        taps,
    })
}

/// Immutable bank of even/odd Gabor kernels, one pair per angle.
///
/// Built once per configuration and shared read-only across images and
/// threads.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBank {
    params: GaborParams,
    even: Vec<GaborKernel>,
    odd: Vec<GaborKernel>,
}

impl FilterBank {
    pub fn new(params: GaborParams, angles_deg: &[f64]) -> Result<Self, GaborError> {
        params.validate()?;

        let mut even = Vec::with_capacity(angles_deg.len());
        let mut odd = Vec::with_capacity(angles_deg.len());
        for &angle in angles_deg {
            even.push(gabor_kernel(&params, angle, Phase::Even)?);
            odd.push(gabor_kernel(&params, angle, Phase::Odd)?);
        }

        Ok(Self { params, even, odd })
    }

    pub fn params(&self) -> &GaborParams {
        &self.params
    }

    /// Number of angles (kernel pairs).
    pub fn len(&self) -> usize {
        self.even.len()
    }

    pub fn is_empty(&self) -> bool {
        self.even.is_empty()
    }

    pub fn angle_deg(&self, angle_idx: usize) -> Option<f64> {
        self.even.get(angle_idx).map(|k| k.angle_deg)
    }

    pub fn kernel(&self, phase: Phase, angle_idx: usize) -> Option<&GaborKernel> {
        match phase {
            Phase::Even => self.even.get(angle_idx),
            Phase::Odd => self.odd.get(angle_idx),
        }
    }

    /// `(even, odd)` quadrature pair for one angle.
    pub fn pair(&self, angle_idx: usize) -> Option<(&GaborKernel, &GaborKernel)> {
        Some((self.even.get(angle_idx)?, self.odd.get(angle_idx)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GaborKernel> {
        self.even.iter().chain(self.odd.iter())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use crate::gabor::{
        AUTO_FILTER_SIZE, FilterBank, GaborError, GaborParams, MAX_RADIUS, Phase, gabor_kernel,
    };

    #[test]
    fn default_params_give_radius_13() {
        // ceil(max(2, 4) * sqrt(10)) = ceil(12.649) = 13
        let params = GaborParams::default();
        assert_eq!(params.radius(), Ok(13));

        let explicit = GaborParams {
            filter_size: 9,
            ..GaborParams::default()
        };
        assert_eq!(explicit.radius(), Ok(4));
    }

    #[test]
    fn kernels_are_zero_mean_unit_norm() {
        let params = GaborParams::default();
        for angle in [0.0, 22.5, 45.0, 90.0, 135.0] {
            for phase in [Phase::Even, Phase::Odd] {
                let k = gabor_kernel(&params, angle, phase).expect("valid kernel");
                assert_eq!(k.side(), 27);
                assert!(k.mean().abs() < 1e-9, "mean {}", k.mean());
                assert!((k.l2_norm() - 1.0).abs() < 1e-6, "norm {}", k.l2_norm());
            }
        }
    }

    #[test]
    fn even_kernel_is_symmetric_odd_is_antisymmetric() {
        let params = GaborParams {
            filter_size: 11,
            ..GaborParams::default()
        };
        let even = gabor_kernel(&params, 30.0, Phase::Even).expect("even");
        let odd = gabor_kernel(&params, 30.0, Phase::Odd).expect("odd");
        let s = even.side();
        for y in 0..s {
            for x in 0..s {
                let (mx, my) = (s - 1 - x, s - 1 - y);
                let e = even.taps.get(x, y).copied().unwrap_or_default();
                let em = even.taps.get(mx, my).copied().unwrap_or_default();
                assert!((e - em).abs() < 1e-12);

                let o = odd.taps.get(x, y).copied().unwrap_or_default();
                let om = odd.taps.get(mx, my).copied().unwrap_or_default();
                assert!((o + om).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn zero_degree_carrier_varies_along_rows() {
        let params = GaborParams::default();
        let k = gabor_kernel(&params, 0.0, Phase::Even).expect("kernel");
        let c = k.radius;
        // Moving one column keeps the carrier phase; moving one row changes it.
        let center = k.taps.get(c, c).copied().unwrap_or_default();
        let right = k.taps.get(c + 1, c).copied().unwrap_or_default();
        let below = k.taps.get(c, c + 1).copied().unwrap_or_default();
        assert!((center - right).abs() < (center - below).abs());
    }

    #[test]
    fn ninety_degrees_is_transpose_of_zero() {
        let params = GaborParams::default();
        let k0 = gabor_kernel(&params, 0.0, Phase::Even).expect("0 deg");
        let k90 = gabor_kernel(&params, 90.0, Phase::Even).expect("90 deg");
        let s = k0.side();
        for y in 0..s {
            for x in 0..s {
                let a = k0.taps.get(x, y).copied().unwrap_or_default();
                let b = k90.taps.get(y, x).copied().unwrap_or_default();
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn non_positive_parameters_are_rejected() {
        let zero_sigma = GaborParams {
            stddev: 0.0,
            ..GaborParams::default()
        };
        assert_eq!(
            gabor_kernel(&zero_sigma, 0.0, Phase::Even).err(),
            Some(GaborError::NonPositive {
                name: "stddev",
                value: 0.0
            })
        );

        let bad_elongation = GaborParams {
            elongation: -1.0,
            ..GaborParams::default()
        };
        assert!(matches!(
            bad_elongation.validate(),
            Err(GaborError::NonPositive {
                name: "elongation",
                ..
            })
        ));

        let bad_period = GaborParams {
            period: f64::NAN,
            ..GaborParams::default()
        };
        assert!(bad_period.validate().is_err());

        let bad_size = GaborParams {
            filter_size: -3,
            ..GaborParams::default()
        };
        assert_eq!(bad_size.validate(), Err(GaborError::InvalidSize(-3)));
    }

    #[test]
    fn oversized_kernels_are_rejected() {
        let huge_size = GaborParams {
            filter_size: 2_000_000_000,
            ..GaborParams::default()
        };
        assert!(matches!(
            huge_size.radius(),
            Err(GaborError::TooLarge { max: MAX_RADIUS, .. })
        ));
        assert!(gabor_kernel(&huge_size, 0.0, Phase::Even).is_err());

        let wide_envelope = GaborParams {
            stddev: 1e6,
            ..GaborParams::default()
        };
        assert!(matches!(
            wide_envelope.radius(),
            Err(GaborError::TooLarge { .. })
        ));

        let overflowing = GaborParams {
            stddev: 1e300,
            elongation: 1e10,
            ..GaborParams::default()
        };
        assert!(matches!(
            overflowing.validate(),
            Err(GaborError::NonPositive { value, .. }) if value.is_infinite()
        ));

        let largest = GaborParams {
            filter_size: 2 * MAX_RADIUS as i32 + 1,
            ..GaborParams::default()
        };
        assert_eq!(largest.radius(), Ok(MAX_RADIUS));
    }

    #[test]
    fn single_tap_kernel_has_zero_norm() {
        let params = GaborParams {
            filter_size: 1,
            ..GaborParams::default()
        };
        assert!(matches!(
            gabor_kernel(&params, 45.0, Phase::Even),
            Err(GaborError::ZeroNorm { .. })
        ));
    }

    #[test]
    fn bank_holds_one_pair_per_angle() {
        let angles = [0.0, 45.0, 90.0, 135.0];
        let bank = FilterBank::new(GaborParams::default(), &angles).expect("bank");
        assert_eq!(bank.len(), 4);
        assert_eq!(bank.iter().count(), 8);
        assert_eq!(bank.angle_deg(2), Some(90.0));
        assert!(bank.angle_deg(4).is_none());

        let (even, odd) = bank.pair(1).expect("pair");
        assert_eq!(even.phase, Phase::Even);
        assert_eq!(odd.phase, Phase::Odd);
        assert_eq!(even.angle_deg, 45.0);
        assert_eq!(bank.kernel(Phase::Odd, 1), Some(odd));
        assert_eq!(bank.params().filter_size, AUTO_FILTER_SIZE);
        assert!((bank.params().period - PI).abs() < 1e-15);
    }
}
