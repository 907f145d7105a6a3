use std::fmt::Write as _;
use std::ops::Index;

use crate::api::types::BodyId;
use crate::core::body::CelestialBody;

/// Flat, breadth-first array of bodies with one shared name arena.
///
/// Lookups taking a [`BodyId`] index directly and panic on an id that did not
/// come from this catalog; [`get`](Self::get) and
/// [`get_name`](Self::get_name) are the checked forms.
///
/// Every subtree is an index-contiguous block after its root, and each body's
/// direct children form one [`ChildRange`](crate::core::body::ChildRange), so
/// `satellites()` is a plain slice. Built once by the two-pass builder; the
/// shape never changes afterwards, only per-frame state does.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCatalog {
    bodies: Vec<CelestialBody>,
    names: String,
}

impl BodyCatalog {
    pub(crate) fn from_parts(bodies: Vec<CelestialBody>, names: String) -> Self {
        Self { bodies, names }
    }

    /// The star. Always index 0.
    pub fn root(&self) -> BodyId {
        BodyId::ROOT
    }

    /// Number of bodies, star included.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Checked lookup for ids from outside the catalog.
    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [CelestialBody] {
        &mut self.bodies
    }

    /// # Panics
    /// If `id` is out of range.
    pub fn name(&self, id: BodyId) -> &str {
        &self.names[self.bodies[id.index()].name.as_range()]
    }

    /// Checked form of [`name`](Self::name).
    pub fn get_name(&self, id: BodyId) -> Option<&str> {
        self.get(id).map(|body| &self.names[body.name.as_range()])
    }

    /// Names in catalog order, so the n-th name belongs to `BodyId(n)`.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|body| &self.names[body.name.as_range()])
    }

    /// Look up a body by exact name.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        (0..self.bodies.len() as u32)
            .map(BodyId)
            .find(|&id| self.name(id) == name)
    }

    /// `None` for the star.
    ///
    /// # Panics
    /// If `id` is out of range.
    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.bodies[id.index()].parent
    }

    /// Direct children in declaration order. Restartable by cloning.
    ///
    /// # Panics
    /// If `id` is out of range.
    pub fn children(&self, id: BodyId) -> Children {
        let range = self.bodies[id.index()].children;
        Children {
            next: range.start,
            end: range.end(),
        }
    }

    /// Direct children as a slice of the backing array.
    pub fn satellites(&self, id: BodyId) -> &[CelestialBody] {
        &self.bodies[self.bodies[id.index()].children.as_range()]
    }

    /// Number of ancestors (root is 0).
    pub fn depth(&self, id: BodyId) -> usize {
        let mut depth = 0;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            depth += 1;
            cur = self.parent(p);
        }
        depth
    }

    /// Depth-first, parents before children, siblings in declaration order.
    pub fn preorder(&self) -> PreOrder<'_> {
        let mut stack = Vec::with_capacity(16);
        if !self.bodies.is_empty() {
            stack.push(self.root());
        }
        PreOrder {
            catalog: self,
            stack,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (BodyId(i as u32), b))
    }

    /// Verify the breadth-first layout: one parentless root at index 0, each
    /// child range lies strictly after its owner, points back at it, and the
    /// ranges plus the root cover every index exactly once.
    pub fn is_well_formed(&self) -> bool {
        if self.bodies.is_empty() || self.bodies[0].parent.is_some() {
            return false;
        }
        let mut seen = vec![0u8; self.bodies.len()];
        seen[0] = 1;
        for (i, body) in self.bodies.iter().enumerate() {
            if i > 0 && body.parent.is_none() {
                return false;
            }
            let range = body.children;
            if range.is_empty() {
                continue;
            }
            if (range.start as usize) <= i || range.end() as usize > self.bodies.len() {
                return false;
            }
            for c in range.as_range() {
                if self.bodies[c].parent != Some(BodyId(i as u32)) {
                    return false;
                }
                seen[c] += 1;
            }
        }
        seen.iter().all(|&n| n == 1)
    }

    /// Indented tree listing, one body per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for id in self.preorder() {
            let body = &self[id];
            let _ = writeln!(
                out,
                "{:indent$}{} : {:e} kg ({})",
                "",
                self.name(id),
                body.mass_kg,
                body.children.count,
                indent = self.depth(id) * 2,
            );
        }
        out
    }
}

/// Panics if `id` is out of range.
impl Index<BodyId> for BodyCatalog {
    type Output = CelestialBody;

    fn index(&self, id: BodyId) -> &CelestialBody {
        &self.bodies[id.index()]
    }
}

/// Iterator over a body's direct children.
#[derive(Debug, Clone)]
pub struct Children {
    next: u32,
    end: u32,
}

impl Iterator for Children {
    type Item = BodyId;

    fn next(&mut self) -> Option<BodyId> {
        if self.next < self.end {
            let id = BodyId(self.next);
            self.next += 1;
            Some(id)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end - self.next) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Children {}

/// Pre-order walk over the catalog.
pub struct PreOrder<'a> {
    catalog: &'a BodyCatalog,
    stack: Vec<BodyId>,
}

impl Iterator for PreOrder<'_> {
    type Item = BodyId;

    fn next(&mut self) -> Option<BodyId> {
        let id = self.stack.pop()?;
        // Reversed so the first child is visited first
        self.stack.extend(self.catalog.children(id).rev());
        Some(id)
    }
}

impl DoubleEndedIterator for Children {
    fn next_back(&mut self) -> Option<BodyId> {
        if self.next < self.end {
            self.end -= 1;
            Some(BodyId(self.end))
        } else {
            None
        }
    }
}
