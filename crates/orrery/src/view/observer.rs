use glam::Vec2;

use crate::api::types::BodyId;

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Window pixel coordinates (top-left origin, y down) to the centered,
    /// y-up space the projector writes screen positions in.
    pub fn to_screen(&self, px: f32, py: f32) -> Vec2 {
        Vec2::new(px - self.width * 0.5, self.height * 0.5 - py)
    }

    /// Inverse of [`to_screen`](Self::to_screen).
    pub fn to_window(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x + self.width * 0.5, self.height * 0.5 - p.y)
    }

}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// What the view is centered on and how much of space it shows.
///
/// The visible height chases its target a fixed fraction per step, so wheel
/// zooms glide instead of jumping.
#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    pub focus: BodyId,
    visible_height: f64,
    target_visible_height: f64,
    /// Fraction of the remaining distance covered per step, in (0, 1].
    damping: f64,
    min_visible_height: f64,
    max_visible_height: f64,
}

impl Observer {
    pub const DEFAULT_DAMPING: f64 = 0.1;
    pub const DEFAULT_VISIBLE_HEIGHT: f64 = 2.0e8;
    /// Lower bound on any visible height, in km. Keeps the projection scale
    /// finite.
    pub const MIN_VISIBLE_HEIGHT: f64 = 1.0e-3;

    /// Non-finite or non-positive heights fall back to
    /// [`DEFAULT_VISIBLE_HEIGHT`](Self::DEFAULT_VISIBLE_HEIGHT).
    pub fn new(focus: BodyId, visible_height: f64) -> Self {
        let visible_height = if visible_height.is_finite() && visible_height > 0.0 {
            visible_height.max(Self::MIN_VISIBLE_HEIGHT)
        } else {
            log::warn!("ignoring visible height {visible_height}");
            Self::DEFAULT_VISIBLE_HEIGHT
        };
        Self {
            focus,
            visible_height,
            target_visible_height: visible_height,
            damping: Self::DEFAULT_DAMPING,
            min_visible_height: Self::MIN_VISIBLE_HEIGHT,
            max_visible_height: f64::MAX,
        }
    }

    /// Fraction of the remaining zoom covered per step, clamped to (0, 1].
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping.clamp(f64::EPSILON, 1.0);
        self
    }

    /// Bound both the current and target visible height. Limits that are
    /// not finite and positive are left at their defaults.
    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        if min.is_finite() && min > 0.0 {
            self.min_visible_height = min.max(Self::MIN_VISIBLE_HEIGHT);
        }
        if max.is_finite() && max > 0.0 {
            self.max_visible_height = max;
        }
        self.max_visible_height = self.max_visible_height.max(self.min_visible_height);
        self.visible_height = self.clamp(self.visible_height);
        self.target_visible_height = self.clamp(self.target_visible_height);
        self
    }

    /// Kilometres of space spanned by the viewport height right now.
    pub fn visible_height(&self) -> f64 {
        self.visible_height
    }

    /// Height the view is easing toward.
    pub fn target_visible_height(&self) -> f64 {
        self.target_visible_height
    }

    /// `(min, max)` visible height in km.
    pub fn limits(&self) -> (f64, f64) {
        (self.min_visible_height, self.max_visible_height)
    }

    /// Recenter without touching the zoom.
    pub fn set_focus(&mut self, focus: BodyId) {
        self.focus = focus;
    }

    /// Non-finite or non-positive targets are ignored.
    pub fn set_target(&mut self, height: f64) {
        if height.is_finite() && height > 0.0 {
            self.target_visible_height = self.clamp(height);
        } else {
            log::warn!("ignoring visible height target {height}");
        }
    }

    /// Multiply the zoom target, e.g. by `0.9^ticks` for a wheel.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.target_visible_height = self.clamp(self.target_visible_height * factor);
        } else {
            log::warn!("ignoring zoom factor {factor}");
        }
    }

    /// Advance the visible height one step toward the target.
    pub fn smooth(&mut self) {
        self.visible_height += (self.target_visible_height - self.visible_height) * self.damping;
    }

    /// Whether the current height is within `relative_epsilon` of the target.
    pub fn is_settled(&self, relative_epsilon: f64) -> bool {
        (self.target_visible_height - self.visible_height).abs()
            <= self.target_visible_height * relative_epsilon
    }

    fn clamp(&self, height: f64) -> f64 {
        height.clamp(self.min_visible_height, self.max_visible_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_screen_centers_and_flips_y() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_screen(400.0, 300.0), Vec2::ZERO);
        assert_eq!(vp.to_screen(0.0, 0.0), Vec2::new(-400.0, 300.0));
        assert_eq!(vp.to_screen(800.0, 600.0), Vec2::new(400.0, -300.0));
        let p = Vec2::new(12.0, -34.0);
        assert_eq!(vp.to_screen(vp.to_window(p).x, vp.to_window(p).y), p);
    }

    #[test]
    fn degenerate_heights_stay_positive() {
        assert_eq!(Observer::new(BodyId::ROOT, 0.0).visible_height(), Observer::DEFAULT_VISIBLE_HEIGHT);
        assert_eq!(Observer::new(BodyId::ROOT, -5.0).visible_height(), Observer::DEFAULT_VISIBLE_HEIGHT);
        assert_eq!(Observer::new(BodyId::ROOT, f64::NAN).visible_height(), Observer::DEFAULT_VISIBLE_HEIGHT);

        let obs = Observer::new(BodyId::ROOT, 10.0).with_limits(1.0e3, 1.0e6);
        assert_eq!(obs.visible_height(), 1.0e3);
        assert_eq!(obs.target_visible_height(), 1.0e3);

        let obs = Observer::new(BodyId::ROOT, 10.0).with_limits(0.0, -1.0);
        assert_eq!(obs.limits(), (Observer::MIN_VISIBLE_HEIGHT, f64::MAX));
        assert_eq!(obs.visible_height(), 10.0);
    }

    #[test]
    fn smoothing_converges_monotonically() {
        let mut obs = Observer::new(BodyId::ROOT, 100.0);
        obs.set_target(10.0);
        let mut prev = obs.visible_height();
        for _ in 0..200 {
            obs.smooth();
            let h = obs.visible_height();
            assert!(h <= prev && h >= 10.0);
            prev = h;
        }
        assert!(obs.is_settled(1e-6));
    }

    #[test]
    fn first_step_covers_damping_fraction() {
        let mut obs = Observer::new(BodyId::ROOT, 200.0).with_damping(0.1);
        obs.set_target(100.0);
        obs.smooth();
        assert!((obs.visible_height() - 190.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_multiplies_target_within_limits() {
        let mut obs = Observer::new(BodyId::ROOT, 2.0e8).with_limits(1.0e3, 1.0e10);
        obs.zoom_by(0.9_f64.powi(2));
        assert!((obs.target_visible_height() - 2.0e8 * 0.81).abs() < 1e-3);
        obs.zoom_by(1.0e9);
        assert_eq!(obs.target_visible_height(), 1.0e10);
        obs.zoom_by(1.0e-20);
        assert_eq!(obs.target_visible_height(), 1.0e3);
        // Current height is untouched until smoothing runs
        assert_eq!(obs.visible_height(), 2.0e8);
    }

    #[test]
    fn bad_inputs_leave_target_alone() {
        let mut obs = Observer::new(BodyId::ROOT, 50.0);
        obs.zoom_by(f64::NAN);
        obs.zoom_by(0.0);
        obs.set_target(-1.0);
        obs.set_target(f64::INFINITY);
        assert_eq!(obs.target_visible_height(), 50.0);
    }
}
