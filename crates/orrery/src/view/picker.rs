use glam::Vec2;

use crate::api::types::BodyId;
use crate::core::catalog::BodyCatalog;

/// Body under `point` (centered screen space), preferring satellites over
/// the body they orbit.
pub fn pick(catalog: &BodyCatalog, point: Vec2) -> Option<BodyId> {
    if catalog.is_empty() {
        return None;
    }
    pick_from(catalog, catalog.root(), point)
}

fn pick_from(catalog: &BodyCatalog, id: BodyId, point: Vec2) -> Option<BodyId> {
    for child in catalog.children(id) {
        if let Some(hit) = pick_from(catalog, child, point) {
            return Some(hit);
        }
    }
    let body = &catalog[id];
    (body.screen_position.distance(point) < body.screen_radius).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kepler::{update_positions, KeplerSolver};
    use crate::sol;
    use crate::view::observer::{Observer, Viewport};
    use crate::view::projector::project;

    fn projected(focus: &str, height: f64) -> BodyCatalog {
        let mut cat = sol::build().unwrap();
        update_positions(&mut cat, 0.0, &KeplerSolver::default());
        let obs = Observer::new(cat.find(focus).unwrap(), height);
        project(&mut cat, &obs, &Viewport::new(800.0, 600.0));
        cat
    }

    #[test]
    fn center_hits_focus() {
        let cat = projected("sol", 2.0e8);
        assert_eq!(pick(&cat, Vec2::ZERO), Some(BodyId::ROOT));
        let cat = projected("jupiter", 2.0e8);
        assert_eq!(pick(&cat, Vec2::ZERO), cat.find("jupiter"));
    }

    #[test]
    fn moon_wins_over_overlapping_planet() {
        // Luna sits about a pixel from earth at this zoom, inside both discs.
        let cat = projected("earth", 2.0e8);
        let earth = cat.find("earth").unwrap();
        let luna = cat.find("luna").unwrap();
        assert!(cat[luna].screen_position.distance(Vec2::ZERO) < cat[luna].screen_radius);
        assert!(cat[earth].screen_radius > 0.0);
        assert_eq!(pick(&cat, Vec2::ZERO), Some(luna));
    }

    #[test]
    fn planet_still_hit_outside_moon_disc() {
        let cat = projected("earth", 2.0e8);
        let earth = cat.find("earth").unwrap();
        let luna = cat.find("luna").unwrap();
        // Opposite side of earth from luna, within earth's disc only.
        let away = -cat[luna].screen_position.normalize_or_zero() * (cat[earth].screen_radius - 1.0);
        assert!(away.distance(cat[luna].screen_position) >= cat[luna].screen_radius);
        assert_eq!(pick(&cat, away), Some(earth));
    }

    #[test]
    fn empty_space_misses() {
        let cat = projected("sol", 2.0e8);
        assert_eq!(pick(&cat, Vec2::new(1.0e6, 1.0e6)), None);
    }

    #[test]
    fn boundary_is_exclusive() {
        let cat = projected("jupiter", 2.0e8);
        let jupiter = cat.find("jupiter").unwrap();
        let r = cat[jupiter].screen_radius;
        assert_eq!(pick(&cat, Vec2::new(r, 0.0)), None);
        assert_eq!(pick(&cat, Vec2::new(r - 0.5, 0.0)), Some(jupiter));
    }
}
