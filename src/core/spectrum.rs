//! Radiance (the lighting simulation system) works with three color
//! channels. Radiance values of light sources and irradiance values
//! returned by probes are both stored as **RGBSpectrum**.

// std
use std::fmt;
use std::ops::{Add, AddAssign, Mul};
// others
use num::Zero;
// manysuns
use crate::core::manysuns::Float;
use crate::core::manysuns::IRRADIANCE_WEIGHTS;

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct RGBSpectrum {
    pub c: [Float; 3],
}

impl RGBSpectrum {
    pub fn new(v: Float) -> Self {
        RGBSpectrum { c: [v, v, v] }
    }
    pub fn rgb(r: Float, g: Float, b: Float) -> RGBSpectrum {
        RGBSpectrum { c: [r, g, b] }
    }
    /// Build a spectrum from the last three values of a slice (the
    /// layout of the real arguments of `light` and `glow`).
    pub fn from_tail(v: &[Float]) -> Option<RGBSpectrum> {
        if v.len() < 3 {
            None
        } else {
            let n: usize = v.len();
            Some(RGBSpectrum::rgb(v[n - 3], v[n - 2], v[n - 1]))
        }
    }
    /// Single irradiance value from three channels, weighted by
    /// 0.265, 0.670 and 0.065.
    pub fn weighted(&self) -> Float {
        IRRADIANCE_WEIGHTS[0] * self.c[0]
            + IRRADIANCE_WEIGHTS[1] * self.c[1]
            + IRRADIANCE_WEIGHTS[2] * self.c[2]
    }
    pub fn has_nans(&self) -> bool {
        for i in 0..3 {
            if self.c[i].is_nan() {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.c[0], self.c[1], self.c[2])
    }
}

impl Add for RGBSpectrum {
    type Output = RGBSpectrum;
    fn add(self, rhs: RGBSpectrum) -> RGBSpectrum {
        RGBSpectrum {
            c: [
                self.c[0] + rhs.c[0],
                self.c[1] + rhs.c[1],
                self.c[2] + rhs.c[2],
            ],
        }
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, rhs: RGBSpectrum) {
        self.c[0] += rhs.c[0];
        self.c[1] += rhs.c[1];
        self.c[2] += rhs.c[2];
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = RGBSpectrum;
    fn mul(self, rhs: Float) -> RGBSpectrum {
        RGBSpectrum {
            c: [self.c[0] * rhs, self.c[1] * rhs, self.c[2] * rhs],
        }
    }
}

impl Zero for RGBSpectrum {
    fn zero() -> RGBSpectrum {
        RGBSpectrum::new(0.0 as Float)
    }

    fn is_zero(&self) -> bool {
        self.c.iter().all(|v| *v == 0.0 as Float)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weights_sum_to_one() {
        assert_relative_eq!(RGBSpectrum::new(1.0).weighted(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            RGBSpectrum::rgb(2.0, 0.0, 4.0).weighted(),
            2.0 * 0.265 + 4.0 * 0.065
        );
    }

    #[test]
    fn tail_of_light_arguments() {
        let s = RGBSpectrum::from_tail(&[9.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s, RGBSpectrum::rgb(1.0, 2.0, 3.0));
        assert!(RGBSpectrum::from_tail(&[1.0, 2.0]).is_none());
    }

    #[test]
    fn zero_spectrum_accumulates() {
        let mut s: RGBSpectrum = RGBSpectrum::zero();
        assert!(s.is_zero());
        s += RGBSpectrum::rgb(0.0, 0.5, 0.0) * 2.0;
        assert!(!s.is_zero());
        assert_eq!(s.c, [0.0, 1.0, 0.0]);
    }
}
