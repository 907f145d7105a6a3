use glam::{DVec2, Vec2};

use crate::api::types::BodyId;
use crate::core::kepler::KeplerSolver;
use crate::core::orbit;

/// Keplerian elements of a body relative to its parent.
/// Angles in radians, distances in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub longitude_of_periapsis: f64,
    pub mean_longitude_at_epoch: f64,
}

impl OrbitalElements {
    /// Derived, never stored.
    pub fn semi_minor_axis_km(&self) -> f64 {
        orbit::semi_minor_axis(self.semi_major_axis_km, self.eccentricity)
    }

    pub fn mean_anomaly_at_epoch(&self) -> f64 {
        self.mean_longitude_at_epoch - self.longitude_of_periapsis
    }

    /// Orbital period in seconds around a parent of mass `parent_mass_kg`.
    pub fn period(&self, parent_mass_kg: f64) -> f64 {
        orbit::orbital_period(self.semi_major_axis_km, orbit::G * parent_mass_kg)
    }

    /// Mean anomaly after `t` seconds since epoch.
    pub fn mean_anomaly(&self, parent_mass_kg: f64, t: f64) -> f64 {
        self.mean_anomaly_at_epoch() + (t / self.period(parent_mass_kg)) * std::f64::consts::TAU
    }

    /// Parent-relative position at eccentric anomaly `ea`.
    pub fn point_at(&self, ea: f64) -> orbit::EllipsePoint {
        orbit::ellipse_position(
            ea,
            self.eccentricity,
            self.semi_major_axis_km,
            self.semi_minor_axis_km(),
            self.longitude_of_periapsis,
        )
    }

    /// Parent-relative position after `t` seconds since epoch.
    pub fn position_at(&self, parent_mass_kg: f64, t: f64, solver: &KeplerSolver) -> DVec2 {
        let m = self.mean_anomaly(parent_mass_kg, t);
        let ea = solver.solve(m, self.eccentricity);
        self.point_at(ea).position
    }
}

/// Whether a body is the emissive root or an illuminated orbiting body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    Star,
    Orbiting(OrbitalElements),
}

/// Contiguous index range of a body's direct children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildRange {
    pub start: u32,
    pub count: u32,
}

impl ChildRange {
    pub const EMPTY: Self = Self { start: 0, count: 0 };

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// One past the last child.
    pub fn end(&self) -> u32 {
        self.start + self.count
    }

    pub fn as_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end() as usize
    }

    pub fn contains(&self, id: BodyId) -> bool {
        id.0 >= self.start && id.0 < self.end()
    }
}

/// Byte span of a body's name inside the catalog's name arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct NameSpan {
    pub start: u32,
    pub len: u32,
}

impl NameSpan {
    pub fn as_range(&self) -> std::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }
}

/// One star, planet or moon.
///
/// Owned by the [`BodyCatalog`](crate::core::catalog::BodyCatalog) array;
/// the hierarchy fields are index references into that same array.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub(crate) name: NameSpan,
    pub mass_kg: f64,
    pub radius_km: f64,
    /// Days. 0 means tidally locked to the parent, negative is retrograde.
    pub sidereal_rotation_period_days: f64,
    /// Minimum on-screen radius in pixels.
    pub display_min_radius: f32,
    pub color: [f32; 3],
    pub kind: BodyKind,
    pub(crate) parent: Option<BodyId>,
    pub(crate) children: ChildRange,

    // -- Derived per-frame state --
    /// Kilometres, relative to the star.
    pub absolute_position: DVec2,
    /// Radians, in simulation space.
    pub spin_angle: f64,
    /// Pixels, viewport-centered, y up.
    pub screen_position: Vec2,
    pub screen_radius: f32,
    /// Unit vector toward the star in screen space, zero when undefined.
    pub light_direction: Vec2,
}

impl CelestialBody {
    pub fn is_star(&self) -> bool {
        matches!(self.kind, BodyKind::Star)
    }

    pub fn orbit(&self) -> Option<&OrbitalElements> {
        match &self.kind {
            BodyKind::Star => None,
            BodyKind::Orbiting(elements) => Some(elements),
        }
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn children_range(&self) -> ChildRange {
        self.children
    }

    pub fn is_tidally_locked(&self) -> bool {
        self.sidereal_rotation_period_days == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::orbit::{AU_IN_KM, SECONDS_PER_DAY};

    const SUN_KG: f64 = 1.98855e30;

    fn earthlike() -> OrbitalElements {
        OrbitalElements {
            semi_major_axis_km: AU_IN_KM,
            eccentricity: 0.0167,
            longitude_of_periapsis: 1.8,
            mean_longitude_at_epoch: 1.75,
        }
    }

    #[test]
    fn mean_anomaly_advances_one_turn_per_period() {
        let el = earthlike();
        let period = el.period(SUN_KG);
        let m0 = el.mean_anomaly(SUN_KG, 0.0);
        let m1 = el.mean_anomaly(SUN_KG, period);
        assert!((m1 - m0 - std::f64::consts::TAU).abs() < 1e-9);
        assert!((period / SECONDS_PER_DAY - 365.25).abs() < 0.5);
    }

    #[test]
    fn position_stays_between_perihelion_and_aphelion() {
        let el = earthlike();
        for day in (0..400).step_by(7) {
            let r = el.position_at(SUN_KG, day as f64 * SECONDS_PER_DAY, &KeplerSolver::default()).length();
            assert!(r >= AU_IN_KM * (1.0 - 0.0167) * 0.999_999);
            assert!(r <= AU_IN_KM * (1.0 + 0.0167) * 1.000_001);
        }
    }

    #[test]
    fn child_range_bounds() {
        let r = ChildRange { start: 3, count: 2 };
        assert!(r.contains(BodyId(3)));
        assert!(r.contains(BodyId(4)));
        assert!(!r.contains(BodyId(5)));
        assert_eq!(r.as_range(), 3..5);
        assert!(ChildRange::EMPTY.is_empty());
    }
}
