//! Mapping between geographic angles and positions on a sphere.
//!
//! Axis convention: Y is the polar axis, longitude 0 on the equator sits on
//! +Z and longitude grows toward +X. Markers and the camera both go through
//! [`to_cartesian`], so the two always agree.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use thiserror::Error;

use super::angle::normalize;

/// Positions shorter than this have no meaningful direction.
const MIN_RADIUS: f32 = 1e-6;

/// A point on the unit sphere, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoAngle {
    /// Within `[-π/2, π/2]`.
    pub latitude:  f32,
    /// Any finite value; canonicalized before comparison or interpolation.
    pub longitude: f32,
}

impl GeoAngle {
    /// Builds an angle from already validated radians.
    ///
    /// Out-of-range input here is a programming error: data is validated at
    /// ingestion (see `capitals`), so this only asserts.
    pub fn new(latitude: f32, longitude: f32) -> Self {
        debug_assert!(
            (-FRAC_PI_2..=FRAC_PI_2).contains(&latitude),
            "latitude {latitude} outside [-π/2, π/2]"
        );
        debug_assert!(longitude.is_finite(), "non-finite longitude {longitude}");
        Self {
            latitude,
            longitude,
        }
    }

    /// Same point with the longitude in `(-π, π]`.
    pub fn canonical(self) -> Self {
        Self {
            latitude:  self.latitude,
            longitude: normalize(self.longitude),
        }
    }
}

/// Camera placement measured in the frame of the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub angle:  GeoAngle,
    pub radius: f32,
}

impl OrbitState {
    pub const fn new(angle: GeoAngle, radius: f32) -> Self { Self { angle, radius } }

    /// Local position of this state.
    pub fn position(&self) -> Vec3 { to_cartesian(self.angle, self.radius) }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    #[error("position {0} is too close to the sphere center to have a direction")]
    DegenerateRadius(Vec3),
    #[error("position {0} is not finite")]
    NonFinite(Vec3),
}

/// Position at `radius` from the center in the direction of `angle`.
pub fn to_cartesian(angle: GeoAngle, radius: f32) -> Vec3 {
    let (sin_lat, cos_lat) = angle.latitude.sin_cos();
    let (sin_azimuth, cos_azimuth) = (FRAC_PI_2 - angle.longitude).sin_cos();
    Vec3::new(
        radius * cos_lat * cos_azimuth,
        radius * sin_lat,
        radius * cos_lat * sin_azimuth,
    )
}

/// Inverse of [`to_cartesian`] for a position already in the sphere's frame.
pub fn to_spherical(local: Vec3) -> Result<OrbitState, ProjectionError> {
    if !local.is_finite() {
        return Err(ProjectionError::NonFinite(local));
    }
    let radius = local.length();
    if radius < MIN_RADIUS {
        return Err(ProjectionError::DegenerateRadius(local));
    }

    // clamp guards asin against |y| creeping past radius through rounding
    let latitude = (local.y / radius).clamp(-1.0, 1.0).asin();
    let longitude = normalize(local.x.atan2(local.z));

    Ok(OrbitState::new(GeoAngle::new(latitude, longitude), radius))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn assert_vec_close(actual: Vec3, expected: Vec3) {
        assert!(
            actual.distance(expected) < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_prime_meridian_on_equator_is_positive_z() {
        let position = to_cartesian(GeoAngle::new(0.0, 0.0), 2.2);
        assert_vec_close(position, Vec3::new(0.0, 0.0, 2.2));
    }

    #[test]
    fn test_axis_convention() {
        assert_vec_close(to_cartesian(GeoAngle::new(0.0, FRAC_PI_2), 1.0), Vec3::X);
        assert_vec_close(to_cartesian(GeoAngle::new(0.0, PI), 1.0), Vec3::NEG_Z);
        assert_vec_close(to_cartesian(GeoAngle::new(FRAC_PI_2, 1.3), 3.0), Vec3::Y * 3.0);
        assert_vec_close(to_cartesian(GeoAngle::new(-FRAC_PI_2, 0.0), 1.0), Vec3::NEG_Y);
    }

    #[test]
    fn test_round_trip_reproduces_angle_and_radius() {
        for lat_step in -8_i8..=8 {
            for lon_step in -15_i8..=16 {
                let latitude = f32::from(lat_step) * 0.19;
                let longitude = f32::from(lon_step) * (PI / 16.0);
                let angle = GeoAngle::new(latitude, longitude);

                for radius in [0.5, 2.2, 5.0, 40.0] {
                    let Ok(state) = to_spherical(to_cartesian(angle, radius)) else {
                        panic!("round trip failed for {angle:?} at {radius}");
                    };
                    assert!((state.radius - radius).abs() < TOLERANCE * radius);
                    assert!((state.angle.latitude - latitude).abs() < TOLERANCE);
                    let lon_gap = normalize(state.angle.longitude - longitude).abs();
                    assert!(lon_gap < TOLERANCE, "{angle:?}: lon off by {lon_gap}");
                }
            }
        }
    }

    #[test]
    fn test_spherical_longitude_is_canonical() {
        let Ok(state) = to_spherical(to_cartesian(GeoAngle::new(0.2, 3.0 * PI), 1.0)) else {
            panic!("projection failed");
        };
        assert!(state.angle.longitude > -PI && state.angle.longitude <= PI);
        assert!(normalize(state.angle.longitude - PI).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_radius_is_an_error() {
        assert_eq!(
            to_spherical(Vec3::ZERO),
            Err(ProjectionError::DegenerateRadius(Vec3::ZERO))
        );
    }

    #[test]
    fn test_non_finite_position_is_an_error() {
        let position = Vec3::new(f32::NAN, 1.0, 0.0);
        assert!(matches!(
            to_spherical(position),
            Err(ProjectionError::NonFinite(_))
        ));
    }
}
