//! Hit testing, hover tracking, and cursor arbitration for KRB frames
//! (spec §4.8).
//!
//! This is deliberately a plain, synchronous set of functions rather than
//! the concurrent, callback-registry interaction machinery a general
//! GUI framework needs: the runtime this crate serves is single-threaded
//! and cooperative, with no parallel input devices and no async event
//! loop to route through (spec §5) — there is exactly one pointer, one
//! frame, one hit test.

mod cursor;
mod frame;
mod hit_test;

pub use cursor::CursorIcon;
pub use frame::{hover_brightened, resolve_frame_interaction, FrameInteraction};
pub use hit_test::hit_test_interactive;
