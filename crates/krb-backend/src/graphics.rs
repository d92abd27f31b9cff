use krb_interaction::CursorIcon;
use krb_types::{Color, EdgeInsets, Point, Rect, Size};

/// Opaque handle to a texture the backend has loaded. Never constructed
/// by callers outside the backend implementation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// The pixel-level drawing backend (spec §4.1 component I): rectangle
/// fills, text measurement/draw, texture load/draw, scissor clipping,
/// window lifecycle, and mouse state. Everything the runtime needs from
/// a real window and renderer is behind this one trait, so `krb-runtime`
/// never names a concrete graphics crate.
pub trait GraphicsBackend {
    /// Current window size in logical pixels.
    fn window_size(&self) -> Size;

    /// If the window was resized since the last call, returns the new
    /// size once (spec §4.8 step 1). Returns `None` otherwise, and always
    /// `None` when the window isn't resizable.
    fn poll_resize(&mut self) -> Option<Size>;

    /// Current mouse position in window-local logical pixels, or `None`
    /// if the pointer is outside the window or unavailable.
    fn mouse_position(&self) -> Option<Point>;

    /// True exactly on the frame the left mouse button transitions from
    /// up to down (spec §4.8 step 4's "just been pressed").
    fn mouse_left_just_pressed(&self) -> bool;

    /// True when the backend has signaled the window should close (spec
    /// §5's "the frame loop exits when the backend signals
    /// window-close").
    fn should_close(&self) -> bool;

    /// Requests a cursor shape for this frame (spec §4.8 cursor
    /// arbitration); called at most once per frame by the runtime with
    /// the already-arbitrated winner.
    fn set_cursor(&mut self, icon: CursorIcon);

    /// Measures `text` set at `font_size` logical pixels (spec §4.7
    /// step 1's "measured text width").
    fn measure_text(&self, text: &str, font_size: f32) -> Size;

    /// Loads (or returns a cached) texture for `path`. Returns `None` on
    /// a load failure (spec §7: "missing resource" is a warning, not a
    /// fatal error).
    fn load_texture(&mut self, path: &str) -> Option<TextureHandle>;

    /// Natural pixel dimensions of an already-loaded texture.
    fn texture_size(&self, handle: TextureHandle) -> Size;

    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draws top/bottom full-width borders and left/right borders inset
    /// between them (spec §4.8), skipping any edge whose width is zero.
    fn draw_border(&mut self, rect: Rect, widths: EdgeInsets, color: Color);

    fn draw_text(&mut self, text: &str, origin: Point, font_size: f32, color: Color);

    fn draw_texture(&mut self, handle: TextureHandle, rect: Rect);

    /// Clips subsequent draw calls to `rect` until the matching
    /// [`GraphicsBackend::pop_scissor`] (spec §4.8's "within a scissor
    /// rectangle equal to the content area").
    fn push_scissor(&mut self, rect: Rect);

    fn pop_scissor(&mut self);

    fn begin_frame(&mut self);

    fn end_frame(&mut self);
}
