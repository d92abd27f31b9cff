/// Index into a [`crate::RenderContext`]'s element arena.
///
/// The arena never reuses slots within a single document's lifetime, so
/// this index is stable for as long as the `RenderContext` that produced
/// it is alive. Matches the original element table's position — element
/// `0` is always the root when `has_app` is set (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const ROOT: ElementId = ElementId(0);
}

impl From<u32> for ElementId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
