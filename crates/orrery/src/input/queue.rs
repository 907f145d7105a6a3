/// Input events the orrery understands.
/// Pointer coordinates are window pixels, top-left origin, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Wheel notches; positive zooms in.
    Wheel { ticks: f32 },
    /// The canvas changed size.
    Resize { width: f32, height: f32 },
    /// A custom event from the UI layer; see [`CustomKind`].
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// `kind` values for [`InputEvent::Custom`].
pub struct CustomKind;

impl CustomKind {
    /// a = simulated seconds per tick.
    pub const SET_SPEED: u32 = 1;
    /// a = 1.0 pauses, 0.0 resumes.
    pub const SET_PAUSED: u32 = 2;
    /// a = body index.
    pub const FOCUS_BODY: u32 = 3;
    /// a = target visible height in km.
    pub const SET_ZOOM: u32 = 4;
}

/// Events pushed from JS, drained once per tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Queue an event for the next drain.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Tells a click from a drag.
///
/// A press that ends within `slop` pixels of where it started is a click.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    slop: f32,
    pressed_at: Option<(f32, f32)>,
    dragged: bool,
}

impl ClickTracker {
    /// `slop` is the largest press-to-release distance, in pixels, that still
    /// counts as a click.
    pub fn new(slop: f32) -> Self {
        Self {
            slop,
            pressed_at: None,
            dragged: false,
        }
    }

    /// Feed one event. Returns the window position of a completed click.
    pub fn feed(&mut self, event: &InputEvent) -> Option<(f32, f32)> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.pressed_at = Some((x, y));
                self.dragged = false;
                None
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(start) = self.pressed_at {
                    if self.exceeds_slop(start, (x, y)) {
                        self.dragged = true;
                    }
                }
                None
            }
            InputEvent::PointerUp { x, y } => {
                let start = self.pressed_at.take()?;
                let dragged = self.dragged || self.exceeds_slop(start, (x, y));
                self.dragged = false;
                (!dragged).then_some((x, y))
            }
            _ => None,
        }
    }

    fn exceeds_slop(&self, (x0, y0): (f32, f32), (x1, y1): (f32, f32)) -> bool {
        let (dx, dy) = (x1 - x0, y1 - y0);
        dx * dx + dy * dy > self.slop * self.slop
    }
}
