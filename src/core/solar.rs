//! Solar altitude and azimuth from a direction vector (Z up).
//!
//! The altitude follows directly from `asin(z)`. The arcsine of
//! `x / cos(altitude)` alone cannot tell east from west, so the sign
//! of the direction's X and Y components picks one of three formulas.
//! Azimuth is measured from -Y, which makes the reconstruction
//!
//! ```text
//! x = -cos(alt) sin(az)
//! y = -cos(alt) cos(az)
//! z =  sin(alt)
//! ```

// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::geometry::Vector3f;
use crate::core::manysuns::{clamp_t, degrees, normalize_degrees, radians};
use crate::core::manysuns::{Float, ZENITH_EPSILON};

/// Sign combination of the horizontal direction components.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AzimuthQuadrant {
    /// x < 0, y < 0: azimuth = raw
    NegXNegY,
    /// x >= 0, y >= 0: azimuth = 180 - raw
    PosXPosY,
    /// x < 0, y >= 0: azimuth = 180 - raw
    NegXPosY,
    /// x >= 0, y < 0: azimuth = 360 + raw
    PosXNegY,
    /// no horizontal component, azimuth = 0
    Zenith,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolarPosition {
    /// Degrees in [-90, 90].
    pub altitude: Float,
    /// Degrees in [0, 360).
    pub azimuth: Float,
    pub quadrant: AzimuthQuadrant,
}

impl SolarPosition {
    /// Derive altitude and azimuth. The direction does not need to be
    /// normalized but must not be zero.
    pub fn from_direction(direction: &Vector3f) -> Result<SolarPosition> {
        let length: Float = direction.length();
        if !(length > 0.0 as Float) || !length.is_finite() {
            return Err(ManySunsError::Parse(format!(
                "cannot derive a solar position from ({})",
                direction
            )));
        }
        let d: Vector3f = *direction / length;
        let altitude: Float = degrees(clamp_t(d.z, -1.0, 1.0).asin());
        let horizontal: Float = (d.x * d.x + d.y * d.y).sqrt();
        if horizontal < ZENITH_EPSILON {
            log::debug!("sun at zenith or nadir, azimuth defined as 0");
            return Ok(SolarPosition {
                altitude,
                azimuth: 0.0 as Float,
                quadrant: AzimuthQuadrant::Zenith,
            });
        }
        let mut ratio: Float = d.x / radians(altitude).cos();
        if ratio.abs() > 1.0 as Float {
            log::warn!("clamping x / cos(altitude) = {} to [-1, 1]", ratio);
            ratio = clamp_t(ratio, -1.0, 1.0);
        }
        let raw: Float = -degrees(ratio.asin());
        let quadrant: AzimuthQuadrant = if d.x < 0.0 && d.y < 0.0 {
            AzimuthQuadrant::NegXNegY
        } else if d.y >= 0.0 {
            if d.x >= 0.0 {
                AzimuthQuadrant::PosXPosY
            } else {
                AzimuthQuadrant::NegXPosY
            }
        } else {
            AzimuthQuadrant::PosXNegY
        };
        let azimuth: Float = match quadrant {
            AzimuthQuadrant::NegXNegY => raw,
            AzimuthQuadrant::PosXPosY | AzimuthQuadrant::NegXPosY => 180.0 - raw,
            AzimuthQuadrant::PosXNegY => 360.0 + raw,
            AzimuthQuadrant::Zenith => 0.0,
        };
        Ok(SolarPosition {
            altitude,
            azimuth: normalize_degrees(azimuth),
            quadrant,
        })
    }
    /// Unit direction vector pointing to the sun.
    pub fn direction(&self) -> Vector3f {
        let alt: Float = radians(self.altitude);
        let az: Float = radians(self.azimuth);
        Vector3f {
            x: -alt.cos() * az.sin(),
            y: -alt.cos() * az.cos(),
            z: alt.sin(),
        }
    }
}
