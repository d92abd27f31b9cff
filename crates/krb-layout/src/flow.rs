use krb_model::{Alignment, ElementId, LayoutDirection, PositionMode, RenderContext};
use krb_types::{EdgeInsets, Point, Rect, Size};

use crate::intrinsic::intrinsic_size;
use crate::measure::Metrics;

/// Lays out every root and its subtree against `viewport` (spec §4.7,
/// invoked once per frame per root). `scale` is the document's
/// `scale_factor`; every declared unit is multiplied by it before it
/// reaches a render rect.
pub fn layout_frame(
    ctx: &mut RenderContext,
    roots: &[ElementId],
    viewport: Rect,
    scale: f32,
    metrics: &dyn Metrics,
) {
    for &root in roots {
        layout_element(ctx, root, viewport, None, scale, metrics);
    }
}

fn is_absolute(position_mode: PositionMode, declared_position: (i16, i16)) -> bool {
    position_mode == PositionMode::Absolute || declared_position != (0, 0)
}

fn resolve_position(
    position_mode: PositionMode,
    declared_position: (i16, i16),
    parent_content: Rect,
    flow_position: Option<Point>,
    scale: f32,
) -> Point {
    if is_absolute(position_mode, declared_position) {
        let (dx, dy) = declared_position;
        Point::new(
            parent_content.x + f32::from(dx) * scale,
            parent_content.y + f32::from(dy) * scale,
        )
    } else if let Some(position) = flow_position {
        position
    } else {
        parent_content.origin()
    }
}

fn layout_element(
    ctx: &mut RenderContext,
    id: ElementId,
    parent_content: Rect,
    flow_position: Option<Point>,
    scale: f32,
    metrics: &dyn Metrics,
) {
    let Some(element) = ctx.get(id) else {
        return;
    };
    if element.is_placeholder || !element.is_visible {
        return;
    }

    let render_rect = if element.render_preset {
        element.render_rect
    } else {
        let has_parent = element.parent.is_some();
        let size = intrinsic_size(element, parent_content.size(), has_parent, scale, metrics);
        let origin = resolve_position(
            element.position_mode,
            element.declared_position,
            parent_content,
            flow_position,
            scale,
        );
        Rect::from_origin_size(origin, size)
    };

    let borders = EdgeInsets::new(
        element.border_widths[0],
        element.border_widths[1],
        element.border_widths[2],
        element.border_widths[3],
    )
    .clamped_for(scale, render_rect.width, render_rect.height);
    let content = render_rect.inset(borders);

    let children = element.children.clone();
    let direction = element.layout_direction;
    let alignment = element.alignment;

    if let Some(element) = ctx.get_mut(id) {
        element.render_rect = render_rect;
    }

    if children.is_empty() || content.width <= 0.0 || content.height <= 0.0 {
        return;
    }

    layout_children(ctx, &children, content, direction, alignment, scale, metrics);
}

fn layout_children(
    ctx: &mut RenderContext,
    children: &[ElementId],
    content: Rect,
    direction: LayoutDirection,
    alignment: Alignment,
    scale: f32,
    metrics: &dyn Metrics,
) {
    let mut flow_ids = Vec::new();
    let mut absolute_ids = Vec::new();
    for &child in children {
        let Some(element) = ctx.get(child) else {
            continue;
        };
        if element.is_placeholder || !element.is_visible {
            continue;
        }
        if is_absolute(element.position_mode, element.declared_position) {
            absolute_ids.push(child);
        } else {
            flow_ids.push(child);
        }
    }

    for &child in &absolute_ids {
        layout_element(ctx, child, content, None, scale, metrics);
    }

    if flow_ids.is_empty() {
        return;
    }

    let is_row = matches!(direction, LayoutDirection::Row | LayoutDirection::RowReverse);
    let reversed = matches!(
        direction,
        LayoutDirection::RowReverse | LayoutDirection::ColumnReverse
    );

    let sizes: Vec<Size> = flow_ids
        .iter()
        .map(|&id| {
            ctx.get(id)
                .map(|e| intrinsic_size(e, content.size(), true, scale, metrics))
                .unwrap_or(Size::ZERO)
        })
        .collect();

    let content_main = if is_row { content.width } else { content.height };
    let content_cross = if is_row { content.height } else { content.width };
    let main_origin = if is_row { content.x } else { content.y };
    let cross_origin = if is_row { content.y } else { content.x };

    let total_main: f32 = sizes
        .iter()
        .map(|s| if is_row { s.width } else { s.height })
        .sum();
    let flow_count = flow_ids.len();

    let (start_offset, gap) = match alignment {
        Alignment::Start => (0.0, 0.0),
        Alignment::Center => ((content_main - total_main) / 2.0, 0.0),
        Alignment::End => (content_main - total_main, 0.0),
        Alignment::SpaceBetween => {
            let gap = if flow_count > 1 {
                (content_main - total_main) / (flow_count as f32 - 1.0)
            } else {
                0.0
            };
            (0.0, gap.max(0.0))
        }
    };

    let mut ordered: Vec<(ElementId, Size)> = flow_ids.into_iter().zip(sizes).collect();
    if reversed {
        ordered.reverse();
    }

    let mut cursor = main_origin + start_offset;
    let last = ordered.len().saturating_sub(1);
    for (index, (child_id, size)) in ordered.iter().enumerate() {
        let main_extent = if is_row { size.width } else { size.height };
        let cross_extent = if is_row { size.height } else { size.width };
        let cross_pos = match alignment {
            Alignment::Start | Alignment::SpaceBetween => cross_origin,
            Alignment::Center => cross_origin + (content_cross - cross_extent) / 2.0,
            Alignment::End => cross_origin + content_cross - cross_extent,
        };
        let (x, y) = if is_row {
            (cursor, cross_pos)
        } else {
            (cross_pos, cursor)
        };

        layout_element(ctx, *child_id, content, Some(Point::new(x, y)), scale, metrics);

        cursor += main_extent;
        if alignment == Alignment::SpaceBetween && index != last {
            cursor += gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krb_model::{ElementKind, RenderElement};

    use crate::measure::NullMetrics;

    fn container(ctx: &mut RenderContext) -> ElementId {
        ctx.push(RenderElement::new(ElementKind::Container, 0))
    }

    #[test]
    fn explicit_dimensions_win_over_fallback() {
        let mut ctx = RenderContext::default();
        let root = container(&mut ctx);
        ctx.get_mut(root).unwrap().declared_size = (50, 60);

        layout_frame(&mut ctx, &[root], Rect::new(0.0, 0.0, 800.0, 600.0), 1.0, &NullMetrics);

        let rect = ctx.get(root).unwrap().render_rect;
        assert_eq!(rect.width, 50.0);
        assert_eq!(rect.height, 60.0);
    }

    #[test]
    fn sizeless_root_container_falls_back_to_fixed_minimum() {
        let mut ctx = RenderContext::default();
        let root = container(&mut ctx);

        layout_frame(&mut ctx, &[root], Rect::new(0.0, 0.0, 800.0, 600.0), 1.0, &NullMetrics);

        let rect = ctx.get(root).unwrap().render_rect;
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 100.0);
    }

    #[test]
    fn growing_child_inherits_parent_content_dimensions() {
        let mut ctx = RenderContext::default();
        let root = container(&mut ctx);
        ctx.get_mut(root).unwrap().declared_size = (400, 300);
        let child = container(&mut ctx);
        ctx.get_mut(child).unwrap().grow = true;
        ctx.attach(root, child).unwrap();

        layout_frame(&mut ctx, &[root], Rect::ZERO, 1.0, &NullMetrics);

        let child_rect = ctx.get(child).unwrap().render_rect;
        assert_eq!(child_rect.width, 400.0);
        assert_eq!(child_rect.height, 300.0);
    }

    #[test]
    fn row_children_are_placed_left_to_right_in_order() {
        let mut ctx = RenderContext::default();
        let root = container(&mut ctx);
        ctx.get_mut(root).unwrap().declared_size = (200, 100);
        let a = container(&mut ctx);
        ctx.get_mut(a).unwrap().declared_size = (30, 10);
        let b = container(&mut ctx);
        ctx.get_mut(b).unwrap().declared_size = (40, 10);
        ctx.attach(root, a).unwrap();
        ctx.attach(root, b).unwrap();

        layout_frame(&mut ctx, &[root], Rect::ZERO, 1.0, &NullMetrics);

        assert_eq!(ctx.get(a).unwrap().render_rect.x, 0.0);
        assert_eq!(ctx.get(b).unwrap().render_rect.x, 30.0);
    }

    #[test]
    fn space_between_alignment_spreads_children_with_a_clamped_gap() {
        let mut ctx = RenderContext::default();
        let root = container(&mut ctx);
        ctx.get_mut(root).unwrap().declared_size = (100, 10);
        ctx.get_mut(root).unwrap().alignment = Alignment::SpaceBetween;
        let a = container(&mut ctx);
        ctx.get_mut(a).unwrap().declared_size = (10, 10);
        let b = container(&mut ctx);
        ctx.get_mut(b).unwrap().declared_size = (10, 10);
        ctx.attach(root, a).unwrap();
        ctx.attach(root, b).unwrap();

        layout_frame(&mut ctx, &[root], Rect::ZERO, 1.0, &NullMetrics);

        assert_eq!(ctx.get(a).unwrap().render_rect.x, 0.0);
        assert_eq!(ctx.get(b).unwrap().render_rect.x, 90.0);
    }

    #[test]
    fn absolute_child_ignores_flow_and_uses_declared_offset() {
        let mut ctx = RenderContext::default();
        let root = container(&mut ctx);
        ctx.get_mut(root).unwrap().declared_size = (200, 200);
        let child = container(&mut ctx);
        ctx.get_mut(child).unwrap().position_mode = PositionMode::Absolute;
        ctx.get_mut(child).unwrap().declared_position = (5, 6);
        ctx.get_mut(child).unwrap().declared_size = (20, 20);
        ctx.attach(root, child).unwrap();

        layout_frame(&mut ctx, &[root], Rect::ZERO, 1.0, &NullMetrics);

        let rect = ctx.get(child).unwrap().render_rect;
        assert_eq!((rect.x, rect.y), (5.0, 6.0));
    }

    #[test]
    fn invisible_children_are_skipped_and_keep_no_space_in_flow() {
        let mut ctx = RenderContext::default();
        let root = container(&mut ctx);
        ctx.get_mut(root).unwrap().declared_size = (100, 10);
        let hidden = container(&mut ctx);
        ctx.get_mut(hidden).unwrap().declared_size = (40, 10);
        ctx.get_mut(hidden).unwrap().is_visible = false;
        let visible = container(&mut ctx);
        ctx.get_mut(visible).unwrap().declared_size = (40, 10);
        ctx.attach(root, hidden).unwrap();
        ctx.attach(root, visible).unwrap();

        layout_frame(&mut ctx, &[root], Rect::ZERO, 1.0, &NullMetrics);

        assert_eq!(ctx.get(visible).unwrap().render_rect.x, 0.0);
        assert_eq!(ctx.get(hidden).unwrap().render_rect, Rect::ZERO);
    }

    #[test]
    fn preset_render_rect_from_a_custom_component_hook_is_honored_as_is() {
        let mut ctx = RenderContext::default();
        let root = container(&mut ctx);
        ctx.get_mut(root).unwrap().render_preset = true;
        ctx.get_mut(root).unwrap().render_rect = Rect::new(1.0, 2.0, 3.0, 4.0);

        layout_frame(&mut ctx, &[root], Rect::new(0.0, 0.0, 800.0, 600.0), 1.0, &NullMetrics);

        assert_eq!(ctx.get(root).unwrap().render_rect, Rect::new(1.0, 2.0, 3.0, 4.0));
    }
}
