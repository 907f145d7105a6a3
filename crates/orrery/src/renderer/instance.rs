use bytemuck::{Pod, Zeroable};

use crate::api::types::BodyId;
use crate::core::body::CelestialBody;
use crate::core::catalog::BodyCatalog;

/// Per-body render data for the disc shader.
/// Written to the shared buffer for the TypeScript renderer.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Centered screen space, y up.
    pub x: f32,
    pub y: f32,
    /// Pixels.
    pub radius: f32,
    /// Radians.
    pub spin: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 1.0 for the star, which is drawn unlit.
    pub emissive: f32,
    /// Unit direction toward the star, zero for the star itself.
    pub light_x: f32,
    pub light_y: f32,
    /// Catalog index of the body, as used by pick and focus events.
    pub body: f32,
    pub _pad: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_body(id: BodyId, body: &CelestialBody) -> Self {
        Self {
            x: body.screen_position.x,
            y: body.screen_position.y,
            radius: body.screen_radius,
            spin: body.spin_angle as f32,
            r: body.color[0],
            g: body.color[1],
            b: body.color[2],
            emissive: if body.is_star() { 1.0 } else { 0.0 },
            light_x: body.light_direction.x,
            light_y: body.light_direction.y,
            body: id.0 as f32,
            _pad: 0.0,
        }
    }
}

/// One instance per body in catalog order, so instance `i` is `BodyId(i)`.
/// Satellites always sit after their parents and draw on top.
pub struct BodyBuffer {
    instances: Vec<BodyInstance>,
    max: usize,
}

impl BodyBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Refill from the catalog's last projection. Bodies past capacity are
    /// dropped.
    pub fn fill(&mut self, catalog: &BodyCatalog) {
        self.clear();
        self.instances.extend(
            catalog
                .iter()
                .take(self.max)
                .map(|(id, body)| BodyInstance::from_body(id, body)),
        );
        if catalog.len() > self.max {
            log::warn!("body buffer holds {} of {} bodies", self.max, catalog.len());
        }
    }

    /// Filled instances, indexed by `BodyId`.
    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for BodyBuffer {
    fn default() -> Self {
        Self::new()
    }
}
