use std::collections::HashMap;

use krb_backend::GraphicsBackend;
use krb_layout::Metrics;
use krb_types::Size;

/// Bridges a [`GraphicsBackend`] to [`krb_layout::Metrics`]. Text
/// measurement delegates straight through; image sizing can't, since
/// loading a texture needs `&mut backend` but `Metrics::image_size` is
/// `&self`-only — so the runtime loads textures up front each frame
/// (see `Runtime::ensure_textures_loaded`) and this adapter only reads
/// the resulting cache.
pub struct FrameMetrics<'a, B: GraphicsBackend> {
    backend: &'a B,
    texture_sizes: &'a HashMap<u16, Size>,
}

impl<'a, B: GraphicsBackend> FrameMetrics<'a, B> {
    pub fn new(backend: &'a B, texture_sizes: &'a HashMap<u16, Size>) -> Self {
        Self {
            backend,
            texture_sizes,
        }
    }
}

impl<B: GraphicsBackend> Metrics for FrameMetrics<'_, B> {
    fn measure_text(&self, text: &str, font_size: f32) -> Size {
        self.backend.measure_text(text, font_size)
    }

    fn image_size(&self, resource_index: u16) -> Option<Size> {
        self.texture_sizes.get(&resource_index).copied()
    }
}
