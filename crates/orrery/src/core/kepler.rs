//! Per-frame Kepler update: every body placed relative to its parent for the
//! current simulated time, parents first.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::api::types::BodyId;
use crate::core::catalog::BodyCatalog;
use crate::core::orbit::{self, SECONDS_PER_DAY};

/// How the eccentric anomaly is solved each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    /// Fixed iteration count, or the cap when `tolerance` is set.
    pub iterations: u32,
    /// Stop early once successive iterates differ by less than this.
    pub tolerance: Option<f64>,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            iterations: orbit::DEFAULT_KEPLER_ITERATIONS,
            tolerance: None,
        }
    }
}

impl KeplerSolver {
    /// Eccentric anomaly for `mean_anomaly`.
    pub fn solve(&self, mean_anomaly: f64, eccentricity: f64) -> f64 {
        match self.tolerance {
            None => orbit::eccentric_anomaly(mean_anomaly, eccentricity, self.iterations),
            Some(tol) => {
                orbit::eccentric_anomaly_converged(mean_anomaly, eccentricity, tol, self.iterations)
            }
        }
    }
}

/// Recompute every body's absolute position (and spin) for time `t`,
/// in seconds since epoch.
pub fn update_positions(catalog: &mut BodyCatalog, t: f64, solver: &KeplerSolver) {
    update_positions_with(catalog, t, solver, |_| {});
}

/// [`update_positions`] that reports each body as it is visited.
///
/// The walk is pre-order from the root, so a body's parent has always been
/// updated before the body itself reads the parent's position.
pub fn update_positions_with<F>(catalog: &mut BodyCatalog, t: f64, solver: &KeplerSolver, mut visit: F)
where
    F: FnMut(BodyId),
{
    if catalog.is_empty() {
        return;
    }
    let mut stack = Vec::with_capacity(16);
    stack.push(catalog.root());

    while let Some(id) = stack.pop() {
        visit(id);
        let parent = catalog.parent(id).map(|p| {
            let p = &catalog[p];
            (p.absolute_position, p.mass_kg)
        });

        let body = &mut catalog.bodies_mut()[id.index()];
        match (parent, body.orbit().copied()) {
            (Some((parent_pos, parent_mass)), Some(elements)) => {
                let relative = elements.position_at(parent_mass, t, solver);
                body.absolute_position = parent_pos + relative;
                body.spin_angle = spin_angle(body.sidereal_rotation_period_days, t, relative);
            }
            _ => {
                body.absolute_position = DVec2::ZERO;
                body.spin_angle = spin_angle(body.sidereal_rotation_period_days, t, DVec2::ZERO);
            }
        }

        stack.extend(catalog.children(id).rev());
    }
}

/// Rotation about the body's axis at time `t`.
///
/// A zero period means tidal lock: the body turns to face its parent, which
/// sits at `-relative` from it.
fn spin_angle(period_days: f64, t: f64, relative: DVec2) -> f64 {
    if period_days == 0.0 {
        let to_parent = -relative;
        if to_parent == DVec2::ZERO {
            return 0.0;
        }
        return to_parent.y.atan2(to_parent.x).rem_euclid(TAU);
    }
    (TAU * t / (period_days * SECONDS_PER_DAY)).rem_euclid(TAU)
}
