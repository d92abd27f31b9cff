/// A 2D extent in logical pixels. Never negative in practice, but not
/// enforced at the type level since intermediate layout arithmetic
/// (e.g. space-between gap clamping) passes through zero and back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamps both dimensions to be at least `min`.
    #[must_use]
    pub fn clamp_min(self, min: f32) -> Self {
        Self::new(self.width.max(min), self.height.max(min))
    }
}
