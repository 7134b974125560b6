//! Type definitions of Float and Spectrum, otherwise constants and
//! functions which can be used almost everywhere else in the code.

// std
use std::f64::consts::PI;
// manysuns
use crate::core::spectrum::RGBSpectrum;

pub type Spectrum = RGBSpectrum;

pub type Float = f64;

/// Full angular opening of the solar disk in degrees.
pub const SOLAR_OPENING_ANGLE: Float = 0.533;

/// Channel weights turning an RGB irradiance into a single value.
pub const IRRADIANCE_WEIGHTS: [Float; 3] = [0.265, 0.670, 0.065];

/// The canonical sun points along +X while azimuth is counted from
/// -Y, hence the fixed offset between the two.
pub const AZIMUTH_OFFSET: Float = 90.0;

/// Largest square side accepted, about 13 million mini suns.
pub const MAX_SQUARE_SIDE: u32 = 4096;

/// Below this horizontal length a direction counts as the zenith (or
/// nadir) and the azimuth is defined as zero.
pub const ZENITH_EPSILON: Float = 1.0e-12;

/// Clamp the given value *val* to lie between the values *low* and *high*.
pub fn clamp_t<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    let r: T;
    if val < low {
        r = low;
    } else if val > high {
        r = high;
    } else {
        r = val;
    }
    r
}

/// Convert from angles expressed in degrees to radians.
pub fn radians(deg: Float) -> Float {
    (PI / 180.0) * deg
}

/// Convert from angles expressed in radians to degrees.
pub fn degrees(rad: Float) -> Float {
    (180.0 / PI) * rad
}

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_degrees(deg: Float) -> Float {
    let wrapped: Float = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0 as Float
    } else {
        wrapped
    }
}

/// Solid angle of a cone with the given full opening angle (degrees).
pub fn cone_solid_angle(opening_deg: Float) -> Float {
    2.0 as Float * PI * (1.0 as Float - radians(opening_deg * 0.5).cos())
}
