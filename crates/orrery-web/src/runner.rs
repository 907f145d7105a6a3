use orrery::bridge::protocol::{
    ProtocolLayout, HEADER_BODY_COUNT, HEADER_EVENT_COUNT, HEADER_FLOATS,
    HEADER_FRAME_COUNTER, HEADER_RIBBON_INDEX_COUNT, HEADER_RIBBON_SPAN_COUNT,
    HEADER_RIBBON_VERTEX_COUNT, HEADER_SCALE_PER_MM, HEADER_SIM_DAYS, HEADER_VIEWPORT_HEIGHT,
    HEADER_VIEWPORT_WIDTH,
};
use orrery::core::orbit::SECONDS_PER_DAY;
use orrery::{
    BodyBuffer, BodyId, CatalogError, ClickTracker, CustomKind, FixedTimestep, InputEvent,
    InputQueue, OrreryConfig, OrreryEvent, RibbonMesh, RibbonStyle, Session,
};

/// Drives a [`Session`] from the browser frame loop.
///
/// Lives in a `thread_local!` in `lib.rs`; JS pushes input and calls `tick`
/// once per animation frame, then reads the buffers through raw pointers.
pub struct OrreryRunner {
    session: Session,
    input: InputQueue,
    clicks: ClickTracker,
    timestep: FixedTimestep,
    bodies: BodyBuffer,
    ribbons: RibbonMesh,
    ribbon_style: RibbonStyle,
    events: Vec<OrreryEvent>,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
}

impl OrreryRunner {
    /// Build the Sol session and fill every buffer once.
    pub fn new(config: OrreryConfig) -> Result<Self, CatalogError> {
        let session = Session::with_sol(config)?;
        // The session falls back to defaults on an invalid config.
        let config = session.config().clone();
        let layout = ProtocolLayout::from_config(&config);
        if session.catalog().len() > layout.max_bodies {
            log::warn!(
                "catalog has {} bodies, buffers hold {}",
                session.catalog().len(),
                layout.max_bodies
            );
        }

        let mut runner = Self {
            input: InputQueue::new(),
            clicks: ClickTracker::new(config.click_slop_px),
            timestep: FixedTimestep::new(config.fixed_dt),
            bodies: BodyBuffer::with_capacity(layout.max_bodies),
            ribbons: RibbonMesh::new(),
            ribbon_style: config.ribbon_style(),
            events: Vec::with_capacity(layout.max_events),
            header: layout.header(),
            layout,
            session,
            frame: 0,
        };
        runner.rebuild_buffers();
        Ok(runner)
    }

    /// Queue input for the next fixed tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run however many fixed ticks `dt` wall-clock seconds cover, then
    /// refresh every buffer the renderer reads.
    pub fn tick(&mut self, dt: f32) {
        self.events.clear();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            for event in self.input.drain() {
                self.handle(event);
            }
            self.session.tick();
        }

        if steps > 0 {
            self.rebuild_buffers();
            let clock = self.session.clock();
            let event = OrreryEvent {
                kind: OrreryEvent::TIME_INFO,
                a: (clock.seconds() / SECONDS_PER_DAY) as f32,
                b: clock.rate() as f32,
                c: if clock.is_paused() { 1.0 } else { 0.0 },
            };
            self.emit(event);
        }
        self.frame = self.frame.wrapping_add(1);
        self.write_header();
    }

    fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Wheel { ticks } => {
                let factor = self.session.config().wheel_zoom_factor.powf(ticks as f64);
                self.session.zoom_by(factor);
                self.emit_zoom();
            }
            InputEvent::Resize { width, height } => self.session.set_viewport(width, height),
            InputEvent::PointerDown { .. }
            | InputEvent::PointerMove { .. }
            | InputEvent::PointerUp { .. } => {
                if let Some((px, py)) = self.clicks.feed(&event) {
                    self.click(px, py);
                }
            }
            InputEvent::Custom { kind, a, .. } => self.custom(kind, a),
        }
    }

    /// A click refocuses on whatever is under it, keeping the zoom target.
    fn click(&mut self, px: f32, py: f32) {
        let hit = self.session.pick_window(px, py);
        self.emit(OrreryEvent {
            kind: OrreryEvent::PICK,
            a: hit.map_or(-1.0, |id| id.0 as f32),
            b: px,
            c: py,
        });
        if let Some(id) = hit {
            self.focus(id);
        }
    }

    fn focus(&mut self, id: BodyId) {
        let target = self.session.observer().target_visible_height();
        self.session.set_observer(id, target);
        if self.session.observer().focus == id {
            log::info!("focus: {}", self.session.name(id));
            self.emit(OrreryEvent { kind: OrreryEvent::FOCUS, a: id.0 as f32, b: 0.0, c: 0.0 });
        }
    }

    fn custom(&mut self, kind: u32, a: f32) {
        match kind {
            CustomKind::SET_SPEED => self.session.set_time_step(a as f64),
            CustomKind::SET_PAUSED => self.session.set_paused(a != 0.0),
            CustomKind::FOCUS_BODY if a >= 0.0 => self.focus(BodyId(a as u32)),
            CustomKind::SET_ZOOM => {
                let focus = self.session.observer().focus;
                self.session.set_observer(focus, a as f64);
                self.emit_zoom();
            }
            _ => log::debug!("unhandled custom event {kind} ({a})"),
        }
    }

    fn emit_zoom(&mut self) {
        let observer = self.session.observer();
        let event = OrreryEvent {
            kind: OrreryEvent::ZOOM,
            a: observer.visible_height() as f32,
            b: observer.target_visible_height() as f32,
            c: 0.0,
        };
        self.emit(event);
    }

    fn emit(&mut self, event: OrreryEvent) {
        if self.events.len() < self.layout.max_events {
            self.events.push(event);
        }
    }

    fn rebuild_buffers(&mut self) {
        self.bodies.fill(self.session.catalog());
        self.ribbons
            .rebuild(self.session.catalog(), self.session.scale(), &self.ribbon_style);
    }

    fn write_header(&mut self) {
        let viewport = self.session.viewport();
        let h = &mut self.header;
        h[HEADER_FRAME_COUNTER] = self.frame as f32;
        h[HEADER_BODY_COUNT] = self.bodies.instance_count().min(self.layout.max_bodies) as f32;
        h[HEADER_RIBBON_VERTEX_COUNT] =
            self.ribbons.vertices().len().min(self.layout.max_ribbon_vertices) as f32;
        h[HEADER_RIBBON_INDEX_COUNT] =
            self.ribbons.indices().len().min(self.layout.max_ribbon_indices) as f32;
        h[HEADER_RIBBON_SPAN_COUNT] = self.ribbons.spans().len().min(self.layout.max_bodies) as f32;
        h[HEADER_EVENT_COUNT] = self.events.len().min(self.layout.max_events) as f32;
        h[HEADER_VIEWPORT_WIDTH] = viewport.width;
        h[HEADER_VIEWPORT_HEIGHT] = viewport.height;
        h[HEADER_SCALE_PER_MM] = (self.session.scale() * 1000.0) as f32;
        h[HEADER_SIM_DAYS] = (self.session.time() / SECONDS_PER_DAY) as f32;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Body names in instance order: the n-th name is `BodyId(n)`.
    pub fn body_names(&self) -> impl Iterator<Item = &str> {
        self.session.catalog().names()
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn bodies_ptr(&self) -> *const f32 {
        self.bodies.instances_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.bodies.instance_count() as u32
    }

    pub fn ribbon_vertices_ptr(&self) -> *const f32 {
        self.ribbons.vertices_ptr()
    }

    pub fn ribbon_vertex_count(&self) -> u32 {
        self.ribbons.vertices().len().min(self.layout.max_ribbon_vertices) as u32
    }

    pub fn ribbon_indices_ptr(&self) -> *const u32 {
        self.ribbons.indices_ptr()
    }

    pub fn ribbon_index_count(&self) -> u32 {
        self.ribbons.indices().len().min(self.layout.max_ribbon_indices) as u32
    }

    pub fn ribbon_spans_ptr(&self) -> *const f32 {
        self.ribbons.spans_ptr()
    }

    pub fn ribbon_span_count(&self) -> u32 {
        self.ribbons.spans().len().min(self.layout.max_bodies) as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    // ---- Capacity accessors ----

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_ribbon_vertices(&self) -> u32 {
        self.layout.max_ribbon_vertices as u32
    }

    pub fn max_ribbon_indices(&self) -> u32 {
        self.layout.max_ribbon_indices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
