use glam::Vec2;

use crate::core::catalog::BodyCatalog;
use crate::view::observer::{Observer, Viewport};

/// Pixels per kilometre for this observer and viewport.
pub fn scale(observer: &Observer, viewport: &Viewport) -> f64 {
    viewport.height as f64 / observer.visible_height()
}

/// Map every body into screen space around the observer's focus.
///
/// Writes screen position, radius (never below the body's display floor) and
/// the unit direction toward the star. Returns the scale used.
pub fn project(catalog: &mut BodyCatalog, observer: &Observer, viewport: &Viewport) -> f64 {
    if catalog.is_empty() {
        return 0.0;
    }
    let scale = scale(observer, viewport);
    let focus = catalog
        .get(observer.focus)
        .map(|b| b.absolute_position)
        .unwrap_or_default();

    for body in catalog.bodies_mut() {
        body.screen_position = ((body.absolute_position - focus) * scale).as_vec2();
        body.screen_radius = ((body.radius_km * scale) as f32).max(body.display_min_radius);
    }

    let star = catalog[catalog.root()].screen_position;
    for body in catalog.bodies_mut() {
        body.light_direction = light_direction(star, body.screen_position);
    }
    scale
}

/// Unit vector from `body` toward `star`; zero when they coincide.
pub fn light_direction(star: Vec2, body: Vec2) -> Vec2 {
    (star - body).normalize_or_zero()
}
