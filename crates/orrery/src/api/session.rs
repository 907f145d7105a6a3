use glam::Vec2;

use crate::api::types::BodyId;
use crate::config::OrreryConfig;
use crate::core::body::CelestialBody;
use crate::core::catalog::{BodyCatalog, Children};
use crate::core::kepler::{self, KeplerSolver};
use crate::core::time::SimClock;
use crate::error::CatalogResult;
use crate::sol;
use crate::view::{picker, projector, Observer, Viewport};

/// One running orrery: the catalog plus the clock and view that drive it.
///
/// Each [`step`](Self::step) positions every body for the current time,
/// eases the zoom, then projects into screen space. Queries like
/// [`pick`](Self::pick) read the last projection.
pub struct Session {
    catalog: BodyCatalog,
    clock: SimClock,
    observer: Observer,
    viewport: Viewport,
    solver: KeplerSolver,
    config: OrreryConfig,
    scale: f64,
}

impl Session {
    /// Positions and projects once, so queries work before the first step.
    /// An invalid config is logged and replaced by the defaults.
    pub fn new(catalog: BodyCatalog, config: OrreryConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{e}, using default config");
                OrreryConfig::default()
            }
        };
        let observer = Observer::new(catalog.root(), config.initial_visible_height_km)
            .with_damping(config.zoom_damping)
            .with_limits(config.min_visible_height_km, config.max_visible_height_km);
        let mut session = Self {
            clock: SimClock::new(config.time_step_per_tick),
            viewport: Viewport::new(config.viewport_width, config.viewport_height),
            solver: config.solver(),
            observer,
            catalog,
            config,
            scale: 0.0,
        };
        session.refresh();
        session
    }

    /// A session over the bundled Sol catalog.
    pub fn with_sol(config: OrreryConfig) -> CatalogResult<Self> {
        Ok(Self::new(sol::build()?, config))
    }

    // -- Hierarchy --

    /// The star.
    pub fn root(&self) -> BodyId {
        self.catalog.root()
    }

    /// Direct children of `id`. Panics on an id from another catalog.
    pub fn children(&self, id: BodyId) -> Children {
        self.catalog.children(id)
    }

    /// Panics on an id from another catalog; see [`BodyCatalog::get`].
    pub fn body(&self, id: BodyId) -> &CelestialBody {
        &self.catalog[id]
    }

    /// Panics on an id from another catalog; see [`BodyCatalog::get_name`].
    pub fn name(&self, id: BodyId) -> &str {
        self.catalog.name(id)
    }

    /// Look up a body by exact name.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.catalog.find(name)
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    // -- Time --

    /// Move simulated time forward by `delta` seconds.
    pub fn advance_time(&mut self, delta: f64) {
        if !self.clock.advance(delta) {
            log::warn!("ignoring time delta {delta}");
        }
    }

    /// One frame-loop tick of simulated time, then a step.
    pub fn tick(&mut self) {
        self.clock.tick();
        self.step();
    }

    /// Simulated seconds since epoch.
    pub fn time(&self) -> f64 {
        self.clock.seconds()
    }

    /// Rate and pause state alongside the time.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Simulated seconds added per [`tick`](Self::tick).
    pub fn set_time_step(&mut self, seconds_per_tick: f64) {
        if !self.clock.set_rate(seconds_per_tick) {
            log::warn!("ignoring time step {seconds_per_tick}");
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    // -- View --

    /// Center on `focus` and ease toward `target_visible_height` km.
    pub fn set_observer(&mut self, focus: BodyId, target_visible_height: f64) {
        if self.catalog.get(focus).is_none() {
            log::warn!("ignoring focus on unknown body {}", focus.0);
            return;
        }
        self.observer.set_focus(focus);
        self.observer.set_target(target_visible_height);
    }

    /// Scale the zoom target; below 1 zooms in.
    pub fn zoom_by(&mut self, factor: f64) {
        self.observer.zoom_by(factor);
    }

    /// Non-finite or non-positive sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("ignoring viewport {width}x{height}");
            return;
        }
        self.viewport = Viewport::new(width, height);
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pixels per kilometre of the last projection.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The config in effect, after any fallback to defaults.
    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    // -- Frame --

    /// Simulate, ease the zoom, project. Always in that order.
    pub fn step(&mut self) {
        kepler::update_positions(&mut self.catalog, self.clock.seconds(), &self.solver);
        self.observer.smooth();
        self.scale = projector::project(&mut self.catalog, &self.observer, &self.viewport);
    }

    /// `advance_time(delta)` followed by `step()`.
    pub fn frame(&mut self, delta: f64) {
        self.advance_time(delta);
        self.step();
    }

    /// Body under centered screen point `(x, y)`, satellites first.
    pub fn pick(&self, x: f32, y: f32) -> Option<BodyId> {
        picker::pick(&self.catalog, Vec2::new(x, y))
    }

    /// [`pick`](Self::pick) with window pixel coordinates.
    pub fn pick_window(&self, px: f32, py: f32) -> Option<BodyId> {
        let p = self.viewport.to_screen(px, py);
        self.pick(p.x, p.y)
    }

    fn refresh(&mut self) {
        kepler::update_positions(&mut self.catalog, self.clock.seconds(), &self.solver);
        self.scale = projector::project(&mut self.catalog, &self.observer, &self.viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build_catalog;

    fn sol_session() -> Session {
        Session::with_sol(OrreryConfig::default()).unwrap()
    }

    #[test]
    fn hierarchy_queries() {
        let s = sol_session();
        assert_eq!(s.name(s.root()), "sol");
        assert_eq!(s.children(s.root()).count(), 9);
        let mars = s.find("mars").unwrap();
        let moons: Vec<&str> = s.children(mars).map(|c| s.name(c)).collect();
        assert_eq!(moons, ["phobos", "deimos"]);
        assert!(s.body(s.root()).is_star());
        assert_eq!(s.find("vulcan"), None);
    }

    #[test]
    fn two_body_lands_at_a_times_scale() {
        let a = 1.0e8;
        let catalog = build_catalog(|b| {
            b.begin_star("star");
            b.mass_kg(2.0e30);
            b.radius_km(1.0);
            b.sidereal_rotation_period_days(1.0);
            b.begin_planet("p");
            b.mass_kg(1.0);
            b.radius_km(1.0);
            b.sidereal_rotation_period_days(1.0);
            b.semi_major_axis_km(a);
            b.eccentricity(0.0);
            b.end();
            b.end();
        })
        .unwrap();
        let mut s = Session::new(catalog, OrreryConfig::default());
        s.step();
        let p = s.body(BodyId(1)).screen_position;
        let expected = (a * s.scale()) as f32;
        assert!((p.x - expected).abs() < 1e-3, "{p:?} vs {expected}");
        assert!(p.y.abs() < 1e-3);
        assert_eq!(s.scale(), 600.0 / 2.0e8);
    }

    #[test]
    fn full_orbit_returns_to_start() {
        let mut s = sol_session();
        let earth = s.find("earth").unwrap();
        let period = s.body(earth).orbit().unwrap().period(s.body(s.root()).mass_kg);
        s.step();
        let start = s.body(earth).absolute_position;
        s.frame(period);
        let end = s.body(earth).absolute_position;
        assert!((start - end).length() < 1.0);
    }

    #[test]
    fn click_at_center_picks_focus() {
        let mut s = sol_session();
        s.step();
        assert_eq!(s.pick(0.0, 0.0), Some(s.root()));
        assert_eq!(s.pick_window(400.0, 300.0), Some(s.root()));

        let jupiter = s.find("jupiter").unwrap();
        s.set_observer(jupiter, 2.0e8);
        s.step();
        assert_eq!(s.pick(0.0, 0.0), Some(jupiter));
    }

    #[test]
    fn negative_and_nan_deltas_are_ignored() {
        let mut s = sol_session();
        s.advance_time(100.0);
        s.advance_time(-50.0);
        s.advance_time(f64::NAN);
        assert_eq!(s.time(), 100.0);
    }

    #[test]
    fn zoom_eases_in_over_steps() {
        let mut s = sol_session();
        s.zoom_by(0.5);
        assert_eq!(s.observer().target_visible_height(), 1.0e8);
        s.step();
        let h1 = s.observer().visible_height();
        assert!((h1 - 1.9e8).abs() < 1.0);
        assert!((s.scale() - 600.0 / h1).abs() < 1e-15);
        for _ in 0..300 {
            s.step();
        }
        assert!(s.observer().is_settled(1e-6));
    }

    #[test]
    fn unknown_focus_is_ignored() {
        let mut s = sol_session();
        s.set_observer(BodyId(999), 1.0);
        assert_eq!(s.observer().focus, s.root());
        assert_eq!(s.observer().target_visible_height(), 2.0e8);
    }

    #[test]
    fn viewport_resize_changes_scale() {
        let mut s = sol_session();
        s.set_viewport(1920.0, 1080.0);
        s.set_viewport(0.0, 100.0);
        s.step();
        assert_eq!(s.viewport(), Viewport::new(1920.0, 1080.0));
        assert_eq!(s.scale(), 1080.0 / 2.0e8);
    }

    #[test]
    fn degenerate_zoom_config_still_projects() {
        for height in [0.0, -1.0, f64::NAN] {
            let config = OrreryConfig { initial_visible_height_km: height, ..OrreryConfig::default() };
            let mut s = Session::with_sol(config).unwrap();
            assert!(s.scale().is_finite() && s.scale() > 0.0);
            s.step();
            for body in s.catalog().bodies() {
                assert!(body.screen_position.is_finite(), "{height}: {:?}", body.screen_position);
            }
            assert_eq!(s.pick(0.0, 0.0), Some(s.root()));
        }

        let config = OrreryConfig { min_visible_height_km: 0.0, ..OrreryConfig::default() };
        let s = Session::with_sol(config).unwrap();
        assert_eq!(s.config().min_visible_height_km, OrreryConfig::default().min_visible_height_km);
    }

    #[test]
    fn tick_uses_configured_time_step() {
        let mut s = sol_session();
        s.tick();
        s.tick();
        assert_eq!(s.time(), 20_000.0);
        s.set_paused(true);
        s.tick();
        assert_eq!(s.time(), 20_000.0);
    }
}
