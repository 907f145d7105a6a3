use serde::{Deserialize, Serialize};

use crate::core::kepler::KeplerSolver;
use crate::core::orbit::DEFAULT_KEPLER_ITERATIONS;
use crate::error::ConfigError;
use crate::renderer::ribbon::RibbonStyle;

/// Runtime settings for a session and its frame loop.
/// Any field missing from JSON takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Wall-clock seconds per tick (default: 1/60).
    pub fixed_dt: f32,
    /// Simulated seconds added per tick (default: 10 000).
    pub time_step_per_tick: f64,
    /// Kilometres spanned by the viewport height at start (default: 2e8).
    pub initial_visible_height_km: f64,
    pub min_visible_height_km: f64,
    pub max_visible_height_km: f64,
    /// Fraction of the remaining zoom covered per tick (default: 0.1).
    pub zoom_damping: f64,
    /// Target multiplier per wheel notch (default: 0.9).
    pub wheel_zoom_factor: f64,
    pub kepler_iterations: u32,
    /// When set, stop iterating early once the solve is this close.
    pub kepler_tolerance: Option<f64>,
    pub ribbon_samples: u32,
    /// Pixels either side of the orbit path.
    pub ribbon_half_width: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Pointer travel in pixels beyond which a press is a drag, not a click.
    pub click_slop_px: f32,
    /// Maximum body instances per frame (default: 64).
    pub max_bodies: usize,
    /// Maximum events per frame (default: 32).
    pub max_events: usize,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            time_step_per_tick: 10_000.0,
            initial_visible_height_km: 2.0e8,
            min_visible_height_km: 1.0e3,
            max_visible_height_km: 1.0e11,
            zoom_damping: 0.1,
            wheel_zoom_factor: 0.9,
            kepler_iterations: DEFAULT_KEPLER_ITERATIONS,
            kepler_tolerance: None,
            ribbon_samples: 256,
            ribbon_half_width: 6.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            click_slop_px: 4.0,
            max_bodies: 64,
            max_events: 32,
        }
    }
}

impl OrreryConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, value })
            }
        }

        positive("fixed_dt", self.fixed_dt as f64)?;
        if !self.time_step_per_tick.is_finite() || self.time_step_per_tick < 0.0 {
            return Err(ConfigError::Invalid {
                field: "time_step_per_tick",
                value: self.time_step_per_tick,
            });
        }
        positive("initial_visible_height_km", self.initial_visible_height_km)?;
        positive("min_visible_height_km", self.min_visible_height_km)?;
        positive("max_visible_height_km", self.max_visible_height_km)?;
        if self.max_visible_height_km < self.min_visible_height_km {
            return Err(ConfigError::Invalid {
                field: "max_visible_height_km",
                value: self.max_visible_height_km,
            });
        }
        positive("zoom_damping", self.zoom_damping)?;
        if self.zoom_damping > 1.0 {
            return Err(ConfigError::Invalid { field: "zoom_damping", value: self.zoom_damping });
        }
        positive("wheel_zoom_factor", self.wheel_zoom_factor)?;
        positive("kepler_iterations", self.kepler_iterations as f64)?;
        if let Some(tol) = self.kepler_tolerance {
            positive("kepler_tolerance", tol)?;
        }
        positive("ribbon_half_width", self.ribbon_half_width as f64)?;
        positive("viewport_width", self.viewport_width as f64)?;
        positive("viewport_height", self.viewport_height as f64)?;
        if !self.click_slop_px.is_finite() || self.click_slop_px < 0.0 {
            return Err(ConfigError::Invalid {
                field: "click_slop_px",
                value: self.click_slop_px as f64,
            });
        }
        positive("max_bodies", self.max_bodies as f64)?;
        Ok(())
    }

    /// Kepler solver for these iteration settings.
    pub fn solver(&self) -> KeplerSolver {
        KeplerSolver {
            iterations: self.kepler_iterations,
            tolerance: self.kepler_tolerance,
        }
    }

    /// Ribbon style with the configured samples and width.
    pub fn ribbon_style(&self) -> RibbonStyle {
        RibbonStyle {
            samples: self.ribbon_samples,
            half_width: self.ribbon_half_width,
            ..RibbonStyle::default()
        }
    }
}
