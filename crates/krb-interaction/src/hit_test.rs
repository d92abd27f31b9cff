use krb_model::{ElementId, RenderContext};
use krb_types::Point;

/// Finds the topmost interactive element whose render rect contains
/// `point` (spec §4.8 "Cursor arbitration": "the first interactive
/// element in draw order, reverse Z for topmost-first test, wins").
/// Children are checked before their parent — anything drawn after its
/// parent sits visually on top of it — so the first hit found in this
/// traversal order is already the topmost one; there's no separate
/// arbitration pass needed once traversal order is right.
pub fn hit_test_interactive(
    ctx: &RenderContext,
    roots: &[ElementId],
    point: Point,
) -> Option<ElementId> {
    roots.iter().rev().find_map(|&root| hit_test_node(ctx, root, point))
}

fn hit_test_node(ctx: &RenderContext, id: ElementId, point: Point) -> Option<ElementId> {
    let element = ctx.get(id)?;
    if element.is_placeholder || !element.is_visible {
        return None;
    }

    if let Some(hit) = element
        .children
        .iter()
        .rev()
        .find_map(|&child| hit_test_node(ctx, child, point))
    {
        return Some(hit);
    }

    if element.is_interactive && element.render_rect.contains(point) {
        Some(id)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krb_model::{ElementKind, RenderElement};
    use krb_types::Rect;

    #[test]
    fn topmost_child_wins_over_an_overlapping_parent() {
        let mut ctx = RenderContext::default();
        let mut parent = RenderElement::new(ElementKind::Container, 0);
        parent.is_interactive = true;
        parent.render_rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let parent_id = ctx.push(parent);

        let mut child = RenderElement::new(ElementKind::Button, 1);
        child.is_interactive = true;
        child.render_rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        let child_id = ctx.push(child);
        ctx.attach(parent_id, child_id).unwrap();

        let hit = hit_test_interactive(&ctx, &[parent_id], Point::new(15.0, 15.0));
        assert_eq!(hit, Some(child_id));
    }

    #[test]
    fn non_interactive_elements_are_never_hit() {
        let mut ctx = RenderContext::default();
        let mut element = RenderElement::new(ElementKind::Container, 0);
        element.render_rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let id = ctx.push(element);

        assert_eq!(hit_test_interactive(&ctx, &[id], Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn invisible_elements_are_skipped() {
        let mut ctx = RenderContext::default();
        let mut element = RenderElement::new(ElementKind::Button, 0);
        element.is_interactive = true;
        element.is_visible = false;
        element.render_rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let id = ctx.push(element);

        assert_eq!(hit_test_interactive(&ctx, &[id], Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn point_outside_every_rect_misses() {
        let mut ctx = RenderContext::default();
        let mut element = RenderElement::new(ElementKind::Button, 0);
        element.is_interactive = true;
        element.render_rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let id = ctx.push(element);

        assert_eq!(hit_test_interactive(&ctx, &[id], Point::new(50.0, 50.0)), None);
    }
}
