use bitflags::bitflags;

bitflags! {
    /// Invalidation bits, one per relation kind plus a bit for the
    /// constraint set itself.
    ///
    /// The host sets bits whenever geometry or constraints change (or all
    /// of them on an edit-session switch); each suggestion session clears
    /// its own bit after recomputing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        const HV_EDGES = 1 << 0;
        const XY_EDGES = 1 << 1;
        const COINCIDENT_POINTS = 1 << 2;
        const CONSTRAINTS = 1 << 3;
        const EQUAL_EDGES = 1 << 4;
        const RADIUS_CIRCLES = 1 << 5;
        const PARALLEL_EDGES = 1 << 6;
    }
}

/// Bitset-based invalidation gate shared by all suggestion sessions,
/// scoped to one open sketch-edit session.
#[derive(Debug, Clone)]
pub struct DirtyCache {
    flags: DirtyFlags,
}

impl DirtyCache {
    /// A fresh edit session starts with everything stale.
    pub fn new() -> Self {
        Self { flags: DirtyFlags::all() }
    }

    pub fn mark(&mut self, flags: DirtyFlags) {
        self.flags |= flags;
    }

    pub fn mark_all(&mut self) {
        self.flags = DirtyFlags::all();
    }

    pub fn clear(&mut self, flags: DirtyFlags) {
        self.flags &= !flags;
    }

    /// True if any of the given bits is set.
    pub fn is_set(&self, flags: DirtyFlags) -> bool {
        self.flags.intersects(flags)
    }
}

impl Default for DirtyCache {
    fn default() -> Self {
        Self::new()
    }
}
