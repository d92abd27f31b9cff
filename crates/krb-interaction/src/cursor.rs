/// The small set of cursor shapes this runtime ever requests (spec §4.8).
/// A real Graphics Backend maps this onto whatever platform cursor type
/// it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    PointingHand,
}
