use krb_types::Size;

/// The narrow slice of the Graphics Backend (spec §4.1 component I) that
/// layout needs: text extents and loaded-texture dimensions. Keeping this
/// as its own trait rather than depending on `krb-backend` directly avoids
/// a layering cycle — `krb-backend`'s `GraphicsBackend` is expected to
/// satisfy this trait, and `krb-runtime` passes the backend straight
/// through to [`crate::layout_frame`].
pub trait Metrics {
    /// Measures `text` set in `font_size` logical pixels, unscaled.
    fn measure_text(&self, text: &str, font_size: f32) -> Size;

    /// Returns the natural pixel dimensions of a loaded texture, or
    /// `None` if the resource hasn't been loaded yet (spec §4.7 step 1:
    /// "Image (texture loaded)" is conditional on this).
    fn image_size(&self, resource_index: u16) -> Option<Size>;
}

/// A [`Metrics`] impl with no backend behind it: every text measurement
/// is a fixed stand-in size and no texture is ever considered loaded.
/// Used by tests that exercise layout without a real rendering backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetrics;

impl Metrics for NullMetrics {
    fn measure_text(&self, text: &str, font_size: f32) -> Size {
        let width = text.chars().count() as f32 * font_size * 0.6;
        Size::new(width, font_size)
    }

    fn image_size(&self, _resource_index: u16) -> Option<Size> {
        None
    }
}
