//! Keplerian orbit math as pure functions.
//!
//! Simulation space is f64 kilometres and radians; conversion to f32 happens
//! in the projector.

use glam::DVec2;
use std::f64::consts::TAU;

/// Gravitational constant in km³ · kg⁻¹ · s⁻².
pub const G: f64 = 6.6738480e-20;

/// One astronomical unit in kilometres.
pub const AU_IN_KM: f64 = 149_597_870.7;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Iteration count that is sufficient for e < 0.25.
pub const DEFAULT_KEPLER_ITERATIONS: u32 = 10;

#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg / 360.0 * TAU
}

/// Solve Kepler's equation `M = E − e·sin(E)` by fixed-point iteration
/// `E ← M + e·sin(E)`, starting at `E = M`.
///
/// Runs exactly `iterations` steps with no convergence check. Accuracy
/// degrades silently as `e` approaches 1.
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64, iterations: u32) -> f64 {
    let mut ea = mean_anomaly;
    for _ in 0..iterations {
        ea = mean_anomaly + eccentricity * ea.sin();
    }
    ea
}

/// Same fixed-point iteration as [`eccentric_anomaly`], but stops once two
/// successive iterates differ by less than `tolerance`.
pub fn eccentric_anomaly_converged(
    mean_anomaly: f64,
    eccentricity: f64,
    tolerance: f64,
    max_iterations: u32,
) -> f64 {
    let mut ea = mean_anomaly;
    for _ in 0..max_iterations {
        let next = mean_anomaly + eccentricity * ea.sin();
        let delta = (next - ea).abs();
        ea = next;
        if delta < tolerance {
            break;
        }
    }
    ea
}

/// Exact inverse of Kepler's equation.
#[inline]
pub fn mean_anomaly_from_eccentric(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
}

#[inline]
pub fn semi_minor_axis(semi_major_axis: f64, eccentricity: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt()
}

/// Orbital period in seconds for a semi-major axis (km) around a body with
/// gravitational parameter `mu` (km³/s²).
#[inline]
pub fn orbital_period(semi_major_axis: f64, mu: f64) -> f64 {
    TAU * (semi_major_axis.powi(3) / mu).sqrt()
}

/// A point on an orbital ellipse, in the parent-centered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsePoint {
    pub position: DVec2,
    /// Derivative of the parameterization with respect to `E`, rotated by ω.
    pub tangent: DVec2,
    /// Outward direction perpendicular to `tangent`, used to extrude orbit
    /// ribbons. Neither vector is normalized.
    pub normal: DVec2,
}

/// Position on the ellipse at eccentric anomaly `E`, rotated by the longitude
/// of periapsis `ω`. The focus (parent body) sits at the origin.
pub fn ellipse_position(
    eccentric_anomaly: f64,
    eccentricity: f64,
    semi_major_axis: f64,
    semi_minor_axis: f64,
    longitude_of_periapsis: f64,
) -> EllipsePoint {
    let rot = DVec2::from_angle(longitude_of_periapsis);
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();

    let canonical = DVec2::new(
        (cos_e - eccentricity) * semi_major_axis,
        sin_e * semi_minor_axis,
    );
    let tangent = DVec2::new(-sin_e * semi_major_axis, cos_e * semi_minor_axis);
    let normal = DVec2::new(cos_e * semi_minor_axis, sin_e * semi_major_axis);

    EllipsePoint {
        position: rot.rotate(canonical),
        tangent: rot.rotate(tangent),
        normal: rot.rotate(normal),
    }
}
