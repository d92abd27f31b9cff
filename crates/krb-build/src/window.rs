/// Window-level defaults collected off the App element's properties
/// (spec §4.3's window property group). These never apply to any other
/// element kind; a window property on a non-App element is accepted but
/// ignored, matching the format's general "ignore what you don't
/// recognize" stance.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: u16,
    pub height: u16,
    pub title: String,
    pub resizable: bool,
    pub scale_factor: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: String::new(),
            resizable: true,
            scale_factor: 1.0,
        }
    }
}
