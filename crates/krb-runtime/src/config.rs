use krb_types::Color;

/// Knobs the parser and build pipeline hardcoded as fixed constants
/// become configurable here instead (spec §4.10). `max_elements_hint`
/// is a capacity hint only: the arena is a growable `Vec`, so there is
/// no fixed element ceiling to exceed the way the original runtime's
/// `MAX_ELEMENTS` array had one.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub max_elements_hint: usize,

    pub default_bg: Color,
    pub default_fg: Color,
    pub default_border: Color,

    /// Used only when the document has no `App` element (spec §4.10):
    /// there is then no window property group to resolve fallbacks
    /// from, so the host's configured defaults apply instead.
    pub fallback_width: u16,
    pub fallback_height: u16,
    pub fallback_title: String,
    pub fallback_resizable: bool,
    pub fallback_scale_factor: f32,

    /// Turns `Warning`-class issues (spec §7) into hard errors. Off by
    /// default; test harnesses that want to fail fast on malformed
    /// fixtures can set it.
    pub strict: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_elements_hint: 256,
            default_bg: Color::WHITE,
            default_fg: Color::BLACK,
            default_border: Color::TRANSPARENT,
            fallback_width: 800,
            fallback_height: 600,
            fallback_title: String::new(),
            fallback_resizable: true,
            fallback_scale_factor: 1.0,
            strict: false,
        }
    }
}
