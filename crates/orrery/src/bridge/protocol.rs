//! Shared buffer layout for the TypeScript renderer.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values 4 bytes; ribbon indices are u32, everything else f32):
//! ```text
//! [Header: 16 floats]
//! [Bodies: max_bodies × 12 floats]
//! [Ribbon vertices: max_ribbon_vertices × 4 floats]
//! [Ribbon indices: max_ribbon_indices × 1 u32]
//! [Ribbon spans: max_bodies × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame alongside the counts.

use crate::api::types::OrreryEvent;
use crate::config::OrreryConfig;
use crate::renderer::instance::BodyInstance;
use crate::renderer::ribbon::{RibbonSpan, RibbonStyle, RibbonVertex};

pub const HEADER_FLOATS: usize = 16;

// Slot 0 is reserved.
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_BODIES: usize = 3;
pub const HEADER_BODY_COUNT: usize = 4;
pub const HEADER_MAX_RIBBON_VERTICES: usize = 5;
pub const HEADER_RIBBON_VERTEX_COUNT: usize = 6;
pub const HEADER_MAX_RIBBON_INDICES: usize = 7;
pub const HEADER_RIBBON_INDEX_COUNT: usize = 8;
pub const HEADER_RIBBON_SPAN_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_VIEWPORT_WIDTH: usize = 12;
pub const HEADER_VIEWPORT_HEIGHT: usize = 13;
/// Pixels per 1000 km.
pub const HEADER_SCALE_PER_MM: usize = 14;
pub const HEADER_SIM_DAYS: usize = 15;

pub const PROTOCOL_VERSION: f32 = 1.0;

pub const BODY_FLOATS: usize = BodyInstance::FLOATS;
pub const RIBBON_VERTEX_FLOATS: usize = RibbonVertex::FLOATS;
pub const RIBBON_SPAN_FLOATS: usize = RibbonSpan::FLOATS;
pub const EVENT_FLOATS: usize = OrreryEvent::FLOATS;

/// Section sizes and offsets, in 4-byte words.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_ribbon_vertices: usize,
    pub max_ribbon_indices: usize,
    pub max_events: usize,

    pub body_data_floats: usize,
    pub ribbon_vertex_data_floats: usize,
    pub ribbon_index_data_words: usize,
    pub ribbon_span_data_floats: usize,
    pub event_data_floats: usize,

    pub body_data_offset: usize,
    pub ribbon_vertex_data_offset: usize,
    pub ribbon_index_data_offset: usize,
    pub ribbon_span_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Ribbon capacities follow from `max_bodies` and the sample count.
    pub fn new(max_bodies: usize, ribbon_samples: u32, max_events: usize) -> Self {
        let style = RibbonStyle {
            samples: ribbon_samples,
            ..RibbonStyle::default()
        };
        let max_ribbon_vertices = max_bodies * style.vertices_per_ribbon();
        let max_ribbon_indices = max_bodies * style.indices_per_ribbon();

        let body_data_floats = max_bodies * BODY_FLOATS;
        let ribbon_vertex_data_floats = max_ribbon_vertices * RIBBON_VERTEX_FLOATS;
        let ribbon_index_data_words = max_ribbon_indices;
        let ribbon_span_data_floats = max_bodies * RIBBON_SPAN_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let body_data_offset = HEADER_FLOATS;
        let ribbon_vertex_data_offset = body_data_offset + body_data_floats;
        let ribbon_index_data_offset = ribbon_vertex_data_offset + ribbon_vertex_data_floats;
        let ribbon_span_data_offset = ribbon_index_data_offset + ribbon_index_data_words;
        let event_data_offset = ribbon_span_data_offset + ribbon_span_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_bodies,
            max_ribbon_vertices,
            max_ribbon_indices,
            max_events,
            body_data_floats,
            ribbon_vertex_data_floats,
            ribbon_index_data_words,
            ribbon_span_data_floats,
            event_data_floats,
            body_data_offset,
            ribbon_vertex_data_offset,
            ribbon_index_data_offset,
            ribbon_span_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &OrreryConfig) -> Self {
        Self::new(config.max_bodies, config.ribbon_samples, config.max_events)
    }

    /// Header with capacities filled in and every count zero.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_BODIES] = self.max_bodies as f32;
        header[HEADER_MAX_RIBBON_VERTICES] = self.max_ribbon_vertices as f32;
        header[HEADER_MAX_RIBBON_INDICES] = self.max_ribbon_indices as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&OrreryConfig::default());

        assert_eq!(layout.max_bodies, 64);
        assert_eq!(layout.max_ribbon_vertices, 64 * 2 * 257);
        assert_eq!(layout.max_ribbon_indices, 64 * 6 * 256);
        assert_eq!(layout.max_events, 32);

        assert_eq!(layout.body_data_floats, 64 * 12);
        assert_eq!(layout.ribbon_vertex_data_floats, 64 * 2 * 257 * 4);
        assert_eq!(layout.ribbon_span_data_floats, 64 * 8);
        assert_eq!(layout.event_data_floats, 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 16, 20);

        assert_eq!(layout.body_data_offset, HEADER_FLOATS);
        assert_eq!(layout.ribbon_vertex_data_offset, layout.body_data_offset + layout.body_data_floats);
        assert_eq!(
            layout.ribbon_index_data_offset,
            layout.ribbon_vertex_data_offset + layout.ribbon_vertex_data_floats
        );
        assert_eq!(
            layout.ribbon_span_data_offset,
            layout.ribbon_index_data_offset + layout.ribbon_index_data_words
        );
        assert_eq!(layout.event_data_offset, layout.ribbon_span_data_offset + layout.ribbon_span_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_carries_capacities() {
        let layout = ProtocolLayout::new(8, 4, 2);
        let header = layout.header();
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_BODIES], 8.0);
        assert_eq!(header[HEADER_MAX_RIBBON_VERTICES], (8 * 2 * 5) as f32);
        assert_eq!(header[HEADER_MAX_RIBBON_INDICES], (8 * 6 * 4) as f32);
        assert_eq!(header[HEADER_MAX_EVENTS], 2.0);
        assert_eq!(header[HEADER_BODY_COUNT], 0.0);
    }
}
