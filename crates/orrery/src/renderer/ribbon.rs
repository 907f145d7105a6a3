//! Orbit ribbons: a strip of quads along each orbit, offset either side of
//! the path by a fixed pixel width.
//!
//! `u` runs 0 → 1 with time of flight (mean anomaly over a full turn) rather
//! than arc length, so a fragment shader can fade the trail behind the body.

use std::f64::consts::TAU;

use bytemuck::{Pod, Zeroable};

use crate::api::types::BodyId;
use crate::core::catalog::BodyCatalog;
use crate::core::orbit;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RibbonVertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    /// -1 inside edge, +1 outside edge.
    pub v: f32,
}

impl RibbonVertex {
    pub const FLOATS: usize = 4;
}

/// Where one body's ribbon sits in the shared index list, and how to tint it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RibbonSpan {
    pub first_index: f32,
    pub index_count: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha_start: f32,
    pub alpha_end: f32,
    pub body: f32,
}

impl RibbonSpan {
    pub const FLOATS: usize = 8;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonStyle {
    /// Samples around the orbit.
    pub samples: u32,
    /// Pixels either side of the path.
    pub half_width: f32,
    pub alpha_start: f32,
    pub alpha_end: f32,
}

impl Default for RibbonStyle {
    fn default() -> Self {
        Self {
            samples: 256,
            half_width: 6.0,
            alpha_start: 0.5,
            alpha_end: 0.2,
        }
    }
}

impl RibbonStyle {
    /// Two per sample, with the closing sample repeated.
    pub fn vertices_per_ribbon(&self) -> usize {
        2 * (self.samples as usize + 1)
    }

    /// Two triangles per segment.
    pub fn indices_per_ribbon(&self) -> usize {
        6 * self.samples as usize
    }
}

/// Triangle-list geometry for every orbiting body.
#[derive(Debug, Default)]
pub struct RibbonMesh {
    vertices: Vec<RibbonVertex>,
    indices: Vec<u32>,
    spans: Vec<RibbonSpan>,
}

impl RibbonMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.spans.clear();
    }

    /// Rebuild from the catalog's last projection at `scale` pixels per km.
    pub fn rebuild(&mut self, catalog: &BodyCatalog, scale: f64, style: &RibbonStyle) {
        self.clear();
        if style.samples == 0 {
            return;
        }
        for (id, _) in catalog.iter() {
            self.push_ribbon(catalog, id, scale, style);
        }
    }

    fn push_ribbon(&mut self, catalog: &BodyCatalog, id: BodyId, scale: f64, style: &RibbonStyle) {
        let body = &catalog[id];
        let (Some(elements), Some(parent)) = (body.orbit(), body.parent()) else {
            return;
        };
        let center = catalog[parent].screen_position;
        let n = style.samples;
        let base = self.vertices.len() as u32;
        let first_index = self.indices.len();

        for i in 0..=n {
            // Wrap the last sample onto the first so the loop closes exactly.
            let ea = f64::from(i % n) / f64::from(n) * TAU;
            let p = elements.point_at(ea);
            let at = center + (p.position * scale).as_vec2();
            let offset = p.normal.normalize_or_zero().as_vec2() * style.half_width;

            let unwrapped = f64::from(i) / f64::from(n) * TAU;
            let u = (orbit::mean_anomaly_from_eccentric(unwrapped, elements.eccentricity) / TAU) as f32;

            self.vertices.push(RibbonVertex { x: at.x - offset.x, y: at.y - offset.y, u, v: -1.0 });
            self.vertices.push(RibbonVertex { x: at.x + offset.x, y: at.y + offset.y, u, v: 1.0 });

            if i < n {
                let a = base + 2 * i;
                let (inner, outer, next_inner, next_outer) = (a, a + 1, a + 2, a + 3);
                self.indices
                    .extend_from_slice(&[inner, outer, next_outer, inner, next_outer, next_inner]);
            }
        }

        self.spans.push(RibbonSpan {
            first_index: first_index as f32,
            index_count: (self.indices.len() - first_index) as f32,
            r: body.color[0],
            g: body.color[1],
            b: body.color[2],
            alpha_start: style.alpha_start,
            alpha_end: style.alpha_end,
            body: id.0 as f32,
        });
    }

    pub fn vertices(&self) -> &[RibbonVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn spans(&self) -> &[RibbonSpan] {
        &self.spans
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    pub fn indices_ptr(&self) -> *const u32 {
        self.indices.as_ptr()
    }

    pub fn spans_ptr(&self) -> *const f32 {
        self.spans.as_ptr() as *const f32
    }
}
