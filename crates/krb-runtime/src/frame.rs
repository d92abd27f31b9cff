use krb_interaction::CursorIcon;
use krb_model::ElementId;
use krb_types::{Point, Size};

/// One frame's worth of host input (spec §4.8 step 1, §6.2's `step` seam).
/// `resized` carries the new logical size exactly once, the same way
/// [`krb_backend::GraphicsBackend::poll_resize`] reports it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub pointer: Option<Point>,
    pub left_just_pressed: bool,
    pub resized: Option<Size>,
}

/// What `step` computed (spec §4.8 steps 2-4): useful both to a real host
/// loop driving the cursor and to tests asserting on hover/click without
/// opening a window.
#[derive(Debug, Clone, Default)]
pub struct FrameOutcome {
    pub hovered: Option<ElementId>,
    pub cursor: CursorIcon,
    pub dispatched_handler: Option<String>,
}
