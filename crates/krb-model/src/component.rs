use crate::id::ElementId;

/// Bookkeeping for one expanded component instance (spec §4.5).
///
/// `placeholder` is the original element that declared `_componentName`;
/// it stays in the arena (marked `is_placeholder`) purely so custom
/// property overrides and handler lookups can still find it by id, but
/// the tree linker attaches `root` as the effective child in its place.
#[derive(Debug, Clone, Copy)]
pub struct ComponentInstance {
    pub definition_index: u16,
    pub placeholder: ElementId,
    pub root: ElementId,
}
