use krb_model::{ElementId, RenderContext};
use krb_types::{Color, Point};

use crate::cursor::CursorIcon;
use crate::hit_test::hit_test_interactive;

/// Per-frame interaction result (spec §4.8 steps 2-3): which element, if
/// any, the pointer hovers, and the cursor that choice implies. Computed
/// fresh every frame — there is no persisted hover state to reset, since
/// a single topmost-first hit test already produces "at most one cursor
/// is set" for free.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInteraction {
    pub hovered: Option<ElementId>,
    pub cursor: CursorIcon,
}

/// Computes hover and cursor for one frame. `pointer` is `None` when the
/// mouse is outside the window or the platform reports no pointer.
pub fn resolve_frame_interaction(
    ctx: &RenderContext,
    roots: &[ElementId],
    pointer: Option<Point>,
) -> FrameInteraction {
    let hovered = pointer.and_then(|point| hit_test_interactive(ctx, roots, point));
    let cursor = if hovered.is_some() {
        CursorIcon::PointingHand
    } else {
        CursorIcon::Default
    };
    FrameInteraction { hovered, cursor }
}

/// Brightens a button's background and border colors for a hovered draw
/// (spec §4.8: "For buttons: on hover, brighten bg_color and border_color
/// channel-wise, clamped at 255"). A transient draw-time computation, not
/// written back onto the element — the render tree isn't mutated outside
/// `begin_frame`/`end_frame` (spec §5).
pub fn hover_brightened(
    background: Option<Color>,
    border: Option<Color>,
) -> (Option<Color>, Option<Color>) {
    (background.map(|c| c.brightened()), border.map(|c| c.brightened()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use krb_model::{ElementKind, RenderElement};
    use krb_types::Rect;

    #[test]
    fn hovering_an_interactive_element_requests_the_pointing_hand() {
        let mut ctx = RenderContext::default();
        let mut element = RenderElement::new(ElementKind::Button, 0);
        element.is_interactive = true;
        element.render_rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let id = ctx.push(element);

        let result = resolve_frame_interaction(&ctx, &[id], Some(Point::new(5.0, 5.0)));
        assert_eq!(result.hovered, Some(id));
        assert_eq!(result.cursor, CursorIcon::PointingHand);
    }

    #[test]
    fn no_pointer_resets_to_the_default_cursor() {
        let ctx = RenderContext::default();
        let result = resolve_frame_interaction(&ctx, &[], None);
        assert_eq!(result.hovered, None);
        assert_eq!(result.cursor, CursorIcon::Default);
    }

    #[test]
    fn brighten_clamps_each_channel_independently() {
        let (bg, border) = hover_brightened(
            Some(Color::rgba(250, 0, 0, 255)),
            Some(Color::rgba(0, 250, 0, 255)),
        );
        assert_eq!(bg, Some(Color::rgba(255, 55, 55, 255)));
        assert_eq!(border, Some(Color::rgba(55, 255, 55, 255)));
    }
}
