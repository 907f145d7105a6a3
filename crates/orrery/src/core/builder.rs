//! Declarative two-pass catalog construction.
//!
//! A catalog script is a function that drives a `CatalogBuilder`:
//!
//! ```text
//!   b.begin_star("sol");
//!       b.mass_kg(1.98855e30);
//!       ...
//!       b.begin_planet("earth");
//!           ...
//!           b.begin_moon("luna");
//!           ...
//!           b.end();
//!       b.end();
//!   b.end();
//! ```
//!
//! The script runs twice. The first run only counts bodies and name bytes and
//! validates required attributes; the second writes into storage sized from the
//! first run, in declaration (depth-first) order. A stable sort on
//! (depth, declaration index) then lays the bodies out breadth-first so that
//! every parent's children form one contiguous slice.

use std::fmt;

use glam::{DVec2, Vec2};

use crate::api::types::BodyId;
use crate::core::body::{BodyKind, CelestialBody, ChildRange, NameSpan, OrbitalElements};
use crate::core::catalog::BodyCatalog;
use crate::core::orbit::{self, AU_IN_KM};
use crate::error::{CatalogError, CatalogResult};

/// Star → planet → moon.
pub const MAX_DEPTH: usize = 3;

/// Color a body gets until the script calls `rgb`.
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 0.0, 1.0];
/// Minimum on-screen radius (px) until the script calls `display_min_radius`.
pub const DEFAULT_DISPLAY_MIN_RADIUS: f32 = 16.0;

/// Settable body attributes, used for required-attribute bookkeeping and
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Mass,
    Radius,
    SiderealRotationPeriod,
    SemiMajorAxis,
    Eccentricity,
    LongitudeOfPeriapsis,
    MeanLongitude,
    Color,
    DisplayMinRadius,
}

impl Attribute {
    const fn bit(self) -> u16 {
        1 << self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Mass => "mass",
            Attribute::Radius => "radius",
            Attribute::SiderealRotationPeriod => "sidereal rotation period",
            Attribute::SemiMajorAxis => "semi-major axis",
            Attribute::Eccentricity => "eccentricity",
            Attribute::LongitudeOfPeriapsis => "longitude of periapsis",
            Attribute::MeanLongitude => "mean longitude",
            Attribute::Color => "color",
            Attribute::DisplayMinRadius => "display min radius",
        }
    }

    const ALL: [Attribute; 9] = [
        Attribute::Mass,
        Attribute::Radius,
        Attribute::SiderealRotationPeriod,
        Attribute::SemiMajorAxis,
        Attribute::Eccentricity,
        Attribute::LongitudeOfPeriapsis,
        Attribute::MeanLongitude,
        Attribute::Color,
        Attribute::DisplayMinRadius,
    ];
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AttributeSet(u16);

impl AttributeSet {
    const fn of(attrs: &[Attribute]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < attrs.len() {
            bits |= attrs[i].bit();
            i += 1;
        }
        Self(bits)
    }

    fn insert(&mut self, attr: Attribute) {
        self.0 |= attr.bit();
    }

    /// First attribute of `self` that `supplied` lacks.
    fn first_missing(self, supplied: AttributeSet) -> Option<Attribute> {
        Attribute::ALL
            .into_iter()
            .find(|a| self.0 & a.bit() != 0 && supplied.0 & a.bit() == 0)
    }
}

const STAR_REQUIRED: AttributeSet = AttributeSet::of(&[
    Attribute::Mass,
    Attribute::Radius,
    Attribute::SiderealRotationPeriod,
]);

const ORBITING_REQUIRED: AttributeSet = AttributeSet::of(&[
    Attribute::Mass,
    Attribute::Radius,
    Attribute::SiderealRotationPeriod,
    Attribute::SemiMajorAxis,
    Attribute::Eccentricity,
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Count,
    Materialize,
}

/// Totals gathered by a pass; both passes must agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    bodies: u32,
    name_bytes: usize,
}

/// Open body on the builder stack.
#[derive(Debug)]
struct Frame {
    name: String,
    decl: u32,
    required: AttributeSet,
    supplied: AttributeSet,
}

/// A body as written during the materializing pass, before reindexing.
#[derive(Debug, Clone, Copy)]
struct Draft {
    name: NameSpan,
    depth: u8,
    decl: u32,
    parent_decl: Option<u32>,
    first_child_decl: Option<u32>,
    child_count: u32,
    star: bool,
    mass_kg: f64,
    radius_km: f64,
    rotation_days: f64,
    semi_major_axis_km: f64,
    eccentricity: f64,
    longitude_of_periapsis: f64,
    mean_longitude: f64,
    color: [f32; 3],
    display_min_radius: f32,
}

impl Draft {
    fn into_body(self, parent: Option<BodyId>, children: ChildRange) -> CelestialBody {
        let kind = if self.star {
            BodyKind::Star
        } else {
            BodyKind::Orbiting(OrbitalElements {
                semi_major_axis_km: self.semi_major_axis_km,
                eccentricity: self.eccentricity,
                longitude_of_periapsis: self.longitude_of_periapsis,
                mean_longitude_at_epoch: self.mean_longitude,
            })
        };
        CelestialBody {
            name: self.name,
            mass_kg: self.mass_kg,
            radius_km: self.radius_km,
            sidereal_rotation_period_days: self.rotation_days,
            display_min_radius: self.display_min_radius,
            color: self.color,
            kind,
            parent,
            children,
            absolute_position: DVec2::ZERO,
            spin_angle: 0.0,
            screen_position: Vec2::ZERO,
            screen_radius: self.display_min_radius,
            light_direction: Vec2::ZERO,
        }
    }
}

/// Stack-based builder driven by a catalog script.
///
/// Methods never fail directly: the first defect is recorded and every later
/// call becomes a no-op, so a script reads as a flat list of declarations.
/// The defect surfaces from [`build_catalog`].
pub struct CatalogBuilder {
    mode: Mode,
    stack: Vec<Frame>,
    tally: Tally,
    roots: u32,
    drafts: Vec<Draft>,
    names: String,
    error: Option<CatalogError>,
}

impl CatalogBuilder {
    fn counting() -> Self {
        Self {
            mode: Mode::Count,
            stack: Vec::with_capacity(MAX_DEPTH),
            tally: Tally::default(),
            roots: 0,
            drafts: Vec::new(),
            names: String::new(),
            error: None,
        }
    }

    fn materializing(sized_from: Tally) -> Self {
        Self {
            mode: Mode::Materialize,
            drafts: Vec::with_capacity(sized_from.bodies as usize),
            names: String::with_capacity(sized_from.name_bytes),
            ..Self::counting()
        }
    }

    fn fail(&mut self, err: CatalogError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn begin(&mut self, name: &str, star: bool) {
        if self.error.is_some() {
            return;
        }
        let depth = self.stack.len();
        if depth >= MAX_DEPTH {
            return self.fail(CatalogError::TooDeep {
                body: name.to_string(),
                depth: depth + 1,
                max: MAX_DEPTH,
            });
        }
        if star && depth > 0 {
            return self.fail(CatalogError::StarNotRoot { body: name.to_string() });
        }
        if !star && depth == 0 {
            return self.fail(CatalogError::OrbitingRoot { body: name.to_string() });
        }
        if depth == 0 {
            if self.roots > 0 {
                return self.fail(CatalogError::MultipleRoots { body: name.to_string() });
            }
            self.roots += 1;
        }

        let decl = self.tally.bodies;
        let parent_decl = self.stack.last().map(|f| f.decl);

        if self.mode == Mode::Materialize {
            if let Some(p) = parent_decl {
                let parent = &mut self.drafts[p as usize];
                parent.first_child_decl.get_or_insert(decl);
                parent.child_count += 1;
            }
            let start = self.names.len() as u32;
            self.names.push_str(name);
            self.drafts.push(Draft {
                name: NameSpan { start, len: name.len() as u32 },
                depth: depth as u8,
                decl,
                parent_decl,
                first_child_decl: None,
                child_count: 0,
                star,
                mass_kg: 0.0,
                radius_km: 0.0,
                rotation_days: 0.0,
                semi_major_axis_km: 0.0,
                eccentricity: 0.0,
                longitude_of_periapsis: 0.0,
                mean_longitude: 0.0,
                color: DEFAULT_COLOR,
                display_min_radius: DEFAULT_DISPLAY_MIN_RADIUS,
            });
        }

        self.tally.bodies += 1;
        self.tally.name_bytes += name.len();
        self.stack.push(Frame {
            name: name.to_string(),
            decl,
            required: if star { STAR_REQUIRED } else { ORBITING_REQUIRED },
            supplied: AttributeSet::default(),
        });
    }

    /// Open the root star.
    pub fn begin_star(&mut self, name: &str) {
        self.begin(name, true);
    }

    /// Open a body orbiting the star.
    pub fn begin_planet(&mut self, name: &str) {
        self.begin(name, false);
    }

    /// Open a body orbiting a planet.
    pub fn begin_moon(&mut self, name: &str) {
        self.begin(name, false);
    }

    /// Close the innermost open body, checking its required attributes.
    pub fn end(&mut self) {
        if self.error.is_some() {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return self.fail(CatalogError::UnbalancedEnd);
        };
        if let Some(attribute) = frame.required.first_missing(frame.supplied) {
            self.fail(CatalogError::MissingAttribute {
                body: frame.name,
                attribute,
            });
        }
    }

    /// Mark `attr` as supplied on the open body after checking `valid`.
    /// Returns the draft to write into during the materializing pass.
    fn set(&mut self, attr: Attribute, value: f64, valid: bool) -> Option<&mut Draft> {
        if self.error.is_some() {
            return None;
        }
        let Some(frame) = self.stack.last_mut() else {
            self.fail(CatalogError::OutsideBody { attribute: attr });
            return None;
        };
        if !valid {
            let body = frame.name.clone();
            self.fail(CatalogError::InvalidAttribute { body, attribute: attr, value });
            return None;
        }
        frame.supplied.insert(attr);
        let decl = frame.decl as usize;
        match self.mode {
            Mode::Count => None,
            Mode::Materialize => self.drafts.get_mut(decl),
        }
    }

    /// Must be positive.
    pub fn mass_kg(&mut self, kg: f64) {
        if let Some(d) = self.set(Attribute::Mass, kg, kg.is_finite() && kg > 0.0) {
            d.mass_kg = kg;
        }
    }

    /// Physical radius. Zero is allowed for point-like bodies.
    pub fn radius_km(&mut self, km: f64) {
        if let Some(d) = self.set(Attribute::Radius, km, km.is_finite() && km >= 0.0) {
            d.radius_km = km;
        }
    }

    /// Negative periods describe retrograde rotation.
    pub fn sidereal_rotation_period_days(&mut self, days: f64) {
        if let Some(d) = self.set(Attribute::SiderealRotationPeriod, days, days.is_finite()) {
            d.rotation_days = days;
        }
    }

    /// Tidally locked: the same face always points at the parent.
    pub fn synchronous_rotation(&mut self) {
        self.sidereal_rotation_period_days(0.0);
    }

    /// Must be positive.
    pub fn semi_major_axis_km(&mut self, km: f64) {
        if let Some(d) = self.set(Attribute::SemiMajorAxis, km, km.is_finite() && km > 0.0) {
            d.semi_major_axis_km = km;
        }
    }

    /// Same as [`semi_major_axis_km`](Self::semi_major_axis_km), in AU.
    pub fn semi_major_axis_au(&mut self, au: f64) {
        self.semi_major_axis_km(au * AU_IN_KM);
    }

    /// Closed orbits only: `0 <= e < 1`.
    pub fn eccentricity(&mut self, e: f64) {
        if let Some(d) = self.set(Attribute::Eccentricity, e, (0.0..1.0).contains(&e)) {
            d.eccentricity = e;
        }
    }

    /// Angle of periapsis from the parent's +x axis.
    pub fn longitude_of_periapsis_deg(&mut self, deg: f64) {
        let valid = deg.is_finite();
        if let Some(d) = self.set(Attribute::LongitudeOfPeriapsis, deg, valid) {
            d.longitude_of_periapsis = orbit::deg_to_rad(deg);
        }
    }

    /// Mean longitude at the epoch (t = 0).
    pub fn mean_longitude_deg(&mut self, deg: f64) {
        if let Some(d) = self.set(Attribute::MeanLongitude, deg, deg.is_finite()) {
            d.mean_longitude = orbit::deg_to_rad(deg);
        }
    }

    /// Linear color, each channel in `[0, 1]`.
    pub fn rgb(&mut self, r: f32, g: f32, b: f32) {
        let unit = |c: f32| (0.0..=1.0).contains(&c);
        let valid = unit(r) && unit(g) && unit(b);
        let worst = [r, g, b].into_iter().find(|&c| !unit(c)).unwrap_or(r);
        if let Some(d) = self.set(Attribute::Color, worst as f64, valid) {
            d.color = [r, g, b];
        }
    }

    /// Minimum on-screen radius in pixels, regardless of zoom.
    pub fn display_min_radius(&mut self, px: f32) {
        let valid = px.is_finite() && px >= 0.0;
        if let Some(d) = self.set(Attribute::DisplayMinRadius, px as f64, valid) {
            d.display_min_radius = px;
        }
    }

    fn finish(&mut self) -> CatalogResult<Tally> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        if let Some(open) = self.stack.last() {
            return Err(CatalogError::Unclosed { body: open.name.clone() });
        }
        if self.tally.bodies == 0 {
            return Err(CatalogError::Empty);
        }
        Ok(self.tally)
    }
}

/// Run `script` through both passes and lay the result out breadth-first.
///
/// Any error is a defect in the script; callers treat it as fatal.
pub fn build_catalog<F>(script: F) -> CatalogResult<BodyCatalog>
where
    F: Fn(&mut CatalogBuilder),
{
    // Pass 1: count and validate
    let mut counter = CatalogBuilder::counting();
    script(&mut counter);
    let counted = counter.finish()?;

    // Pass 2: materialize in declaration order
    let mut maker = CatalogBuilder::materializing(counted);
    script(&mut maker);
    let built = maker.finish()?;
    if built != counted {
        return Err(CatalogError::PassMismatch {
            counted_bodies: counted.bodies,
            counted_name_bytes: counted.name_bytes,
            built_bodies: built.bodies,
            built_name_bytes: built.name_bytes,
        });
    }

    let catalog = reindex_breadth_first(&maker.drafts, maker.names);
    debug_assert!(catalog.is_well_formed());

    log::info!(
        "catalog built: {} bodies, {} name bytes",
        catalog.len(),
        built.name_bytes
    );
    log::debug!("catalog layout:\n{}", catalog.dump());
    Ok(catalog)
}

/// Stable sort on (depth, declaration index), then remap hierarchy links.
fn reindex_breadth_first(drafts: &[Draft], names: String) -> BodyCatalog {
    let mut order: Vec<(u8, u32)> = drafts.iter().map(|d| (d.depth, d.decl)).collect();
    order.sort_by_key(|&(depth, decl)| (depth, decl));

    let mut new_index = vec![0u32; drafts.len()];
    for (new, &(_, decl)) in order.iter().enumerate() {
        new_index[decl as usize] = new as u32;
    }

    let bodies = order
        .iter()
        .map(|&(_, decl)| {
            let d = drafts[decl as usize];
            let parent = d.parent_decl.map(|p| BodyId(new_index[p as usize]));
            let children = match d.first_child_decl {
                Some(first) => ChildRange {
                    start: new_index[first as usize],
                    count: d.child_count,
                },
                None => ChildRange::EMPTY,
            };
            d.into_body(parent, children)
        })
        .collect();

    BodyCatalog::from_parts(bodies, names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn star(b: &mut CatalogBuilder, name: &str) {
        b.begin_star(name);
        b.mass_kg(1.0e30);
        b.radius_km(700_000.0);
        b.sidereal_rotation_period_days(25.0);
    }

    fn body(b: &mut CatalogBuilder, name: &str, a_km: f64) {
        b.begin_planet(name);
        b.mass_kg(1.0e24);
        b.radius_km(6000.0);
        b.sidereal_rotation_period_days(1.0);
        b.semi_major_axis_km(a_km);
        b.eccentricity(0.01);
    }

    /// star
    ///   a (a1, a2)
    ///   b (b1)
    ///   c
    fn nested(b: &mut CatalogBuilder) {
        star(b, "star");
        body(b, "a", 1.0e8);
        body(b, "a1", 1.0e5);
        b.end();
        body(b, "a2", 2.0e5);
        b.end();
        b.end();
        body(b, "b", 2.0e8);
        body(b, "b1", 1.0e5);
        b.end();
        b.end();
        body(b, "c", 3.0e8);
        b.end();
        b.end();
    }

    fn names(cat: &BodyCatalog) -> Vec<&str> {
        (0..cat.len() as u32).map(|i| cat.name(BodyId(i))).collect()
    }

    #[test]
    fn layout_is_breadth_first() {
        let cat = build_catalog(nested).unwrap();
        assert_eq!(names(&cat), ["star", "a", "b", "c", "a1", "a2", "b1"]);
        assert!(cat.is_well_formed());
    }

    #[test]
    fn child_ranges_are_remapped() {
        let cat = build_catalog(nested).unwrap();
        assert_eq!(cat[BodyId(0)].children, ChildRange { start: 1, count: 3 });
        assert_eq!(cat[BodyId(1)].children, ChildRange { start: 4, count: 2 });
        assert_eq!(cat[BodyId(2)].children, ChildRange { start: 6, count: 1 });
        assert!(cat[BodyId(3)].children.is_empty());
        assert_eq!(cat.parent(BodyId(6)), Some(BodyId(2)));
        assert_eq!(cat.parent(BodyId(5)), Some(BodyId(1)));
    }

    #[test]
    fn every_index_covered_exactly_once() {
        let cat = build_catalog(nested).unwrap();
        let mut covered = vec![0; cat.len()];
        covered[0] += 1;
        for b in cat.bodies() {
            for c in b.children.as_range() {
                covered[c] += 1;
            }
        }
        assert!(covered.iter().all(|&n| n == 1), "{covered:?}");
    }

    #[test]
    fn subtrees_are_after_their_root() {
        let cat = build_catalog(nested).unwrap();
        for (id, body) in cat.iter() {
            if !body.children.is_empty() {
                assert!(body.children.start > id.0);
            }
        }
    }

    #[test]
    fn build_is_deterministic() {
        let first = build_catalog(nested).unwrap();
        let second = build_catalog(nested).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn values_are_written_in_materializing_pass() {
        let cat = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s");
            b.rgb(1.0, 0.9, 0.5);
            b.display_min_radius(64.0);
            body(b, "p", 5.0e7);
            b.longitude_of_periapsis_deg(90.0);
            b.mean_longitude_deg(180.0);
            b.end();
            b.end();
        })
        .unwrap();
        let s = &cat[BodyId(0)];
        assert!(s.is_star());
        assert_eq!(s.color, [1.0, 0.9, 0.5]);
        assert_eq!(s.display_min_radius, 64.0);
        let p = &cat[BodyId(1)];
        let el = p.orbit().unwrap();
        assert_eq!(el.semi_major_axis_km, 5.0e7);
        assert!((el.longitude_of_periapsis - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((el.mean_longitude_at_epoch - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(p.color, DEFAULT_COLOR);
        assert_eq!(p.display_min_radius, DEFAULT_DISPLAY_MIN_RADIUS);
    }

    #[test]
    fn au_is_converted_to_km() {
        let cat = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s");
            body(b, "p", 1.0);
            b.semi_major_axis_au(2.0);
            b.end();
            b.end();
        })
        .unwrap();
        let a = cat[BodyId(1)].orbit().unwrap().semi_major_axis_km;
        assert!((a - 2.0 * AU_IN_KM).abs() < 1e-3);
    }

    #[test]
    fn missing_attribute_names_body_and_attribute() {
        let err = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s");
            b.begin_planet("nomad");
            b.mass_kg(1.0e24);
            b.radius_km(10.0);
            b.sidereal_rotation_period_days(1.0);
            b.eccentricity(0.1);
            b.end();
            b.end();
        })
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingAttribute {
                body: "nomad".into(),
                attribute: Attribute::SemiMajorAxis
            }
        );
        assert!(err.to_string().contains("nomad"));
        assert!(err.to_string().contains("semi-major axis"));
    }

    #[test]
    fn star_does_not_need_orbital_elements() {
        let cat = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "lonely");
            b.end();
        })
        .unwrap();
        assert_eq!(cat.len(), 1);
        assert!(cat[cat.root()].children.is_empty());
    }

    #[test]
    fn star_missing_rotation_is_rejected() {
        let err = build_catalog(|b: &mut CatalogBuilder| {
            b.begin_star("s");
            b.mass_kg(1.0);
            b.radius_km(1.0);
            b.end();
        })
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingAttribute { attribute: Attribute::SiderealRotationPeriod, .. }
        ));
    }

    #[test]
    fn nondeterministic_script_is_a_pass_mismatch() {
        let runs = Cell::new(0);
        let err = build_catalog(|b: &mut CatalogBuilder| {
            runs.set(runs.get() + 1);
            star(b, "s");
            if runs.get() > 1 {
                body(b, "ghost", 1.0e6);
                b.end();
            }
            b.end();
        })
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::PassMismatch { counted_bodies: 1, built_bodies: 2, .. }
        ));
    }

    #[test]
    fn structural_defects() {
        let too_deep = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s");
            body(b, "p", 1.0e8);
            body(b, "m", 1.0e5);
            body(b, "mm", 1.0e3);
        });
        assert!(matches!(too_deep, Err(CatalogError::TooDeep { depth: 4, .. })));

        let unclosed = build_catalog(|b: &mut CatalogBuilder| star(b, "s"));
        assert_eq!(unclosed, Err(CatalogError::Unclosed { body: "s".into() }));

        let extra_end = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s");
            b.end();
            b.end();
        });
        assert_eq!(extra_end, Err(CatalogError::UnbalancedEnd));

        let outside = build_catalog(|b: &mut CatalogBuilder| b.mass_kg(1.0));
        assert_eq!(
            outside,
            Err(CatalogError::OutsideBody { attribute: Attribute::Mass })
        );

        let empty = build_catalog(|_: &mut CatalogBuilder| {});
        assert_eq!(empty, Err(CatalogError::Empty));
    }

    #[test]
    fn root_must_be_the_only_star() {
        let nested_star = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s");
            star(b, "binary");
        });
        assert!(matches!(nested_star, Err(CatalogError::StarNotRoot { .. })));

        let planet_root = build_catalog(|b: &mut CatalogBuilder| body(b, "rogue", 1.0));
        assert!(matches!(planet_root, Err(CatalogError::OrbitingRoot { .. })));

        let two_roots = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s1");
            b.end();
            star(b, "s2");
            b.end();
        });
        assert_eq!(two_roots, Err(CatalogError::MultipleRoots { body: "s2".into() }));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let hyperbolic = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s");
            body(b, "comet", 1.0e8);
            b.eccentricity(1.2);
            b.end();
            b.end();
        });
        assert!(matches!(
            hyperbolic,
            Err(CatalogError::InvalidAttribute { attribute: Attribute::Eccentricity, .. })
        ));

        let zero_axis = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s");
            body(b, "p", 0.0);
            b.end();
            b.end();
        });
        assert!(matches!(
            zero_axis,
            Err(CatalogError::InvalidAttribute { attribute: Attribute::SemiMajorAxis, .. })
        ));

        let massless = build_catalog(|b: &mut CatalogBuilder| {
            b.begin_star("s");
            b.mass_kg(0.0);
        });
        assert!(matches!(
            massless,
            Err(CatalogError::InvalidAttribute { attribute: Attribute::Mass, .. })
        ));

        let bad_color = build_catalog(|b: &mut CatalogBuilder| {
            star(b, "s");
            b.rgb(0.5, 2.0, 0.5);
            b.end();
        });
        assert_eq!(
            bad_color,
            Err(CatalogError::InvalidAttribute {
                body: "s".into(),
                attribute: Attribute::Color,
                value: 2.0
            })
        );
    }

    #[test]
    fn first_error_wins() {
        let err = build_catalog(|b: &mut CatalogBuilder| {
            b.end();
            b.mass_kg(1.0);
        })
        .unwrap_err();
        assert_eq!(err, CatalogError::UnbalancedEnd);
    }
}
