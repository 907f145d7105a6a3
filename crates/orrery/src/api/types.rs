use bytemuck::{Pod, Zeroable};

/// Handle to a body in a [`BodyCatalog`](crate::core::catalog::BodyCatalog).
/// Indices are breadth-first positions; the root is always `BodyId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    pub const ROOT: Self = Self(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An event communicated from the session to the UI layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OrreryEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl OrreryEvent {
    pub const FLOATS: usize = 4;

    /// Simulated time: a = days since epoch, b = seconds per tick, c = paused.
    pub const TIME_INFO: f32 = 1.0;
    /// Focus changed: a = body index.
    pub const FOCUS: f32 = 2.0;
    /// Pick result: a = body index or -1, b/c = query point.
    pub const PICK: f32 = 3.0;
    /// Zoom: a = visible height (km), b = target visible height (km).
    pub const ZOOM: f32 = 4.0;
}
