use krb_model::{ElementId, ElementKind, RenderContext, TextAlignment};
use krb_types::Color;

/// Global foreground color used when no ancestor (including the element
/// itself) ever set one (spec §4.4 step 5: "if no ancestor has a color,
/// the global default is used").
pub const DEFAULT_FOREGROUND_COLOR: Color = Color::BLACK;

/// Base font size substituted in for a resolved size under the 8pt floor
/// (spec §4.4 step 5's text clamp).
pub const BASE_FONT_SIZE: f32 = 14.0;

/// Propagates foreground color, font size, and text alignment down from
/// parent to child wherever the child left them unset (spec §4.4
/// "Inheritance"). Runs after component expansion and
/// style/direct/contextual-default resolution, so it only ever fills in
/// genuine gaps, never overwrites an explicit value. Text elements get an
/// extra clamp pass: a resolved color too faint to read snaps to opaque,
/// and a resolved size below the readable floor snaps to the base size.
pub fn apply_inheritance(ctx: &mut RenderContext, roots: &[ElementId]) {
    for &root in roots {
        inherit_from(ctx, root, None, 0.0, None);
    }
}

fn inherit_from(
    ctx: &mut RenderContext,
    id: ElementId,
    inherited_color: Option<Color>,
    inherited_font_size: f32,
    inherited_alignment: Option<TextAlignment>,
) {
    let children = {
        let Some(element) = ctx.get_mut(id) else {
            return;
        };
        let resolved_color = element
            .foreground_color
            .or(inherited_color)
            .unwrap_or(DEFAULT_FOREGROUND_COLOR);
        element.foreground_color = Some(resolved_color);

        if element.font_size == 0.0 {
            element.font_size = inherited_font_size;
        }
        if element.text_alignment.is_none() {
            element.text_alignment = inherited_alignment;
        }

        if element.kind == ElementKind::Text {
            if resolved_color.a < 50 {
                element.foreground_color = Some(Color {
                    a: 255,
                    ..resolved_color
                });
            }
            if element.font_size < 8.0 {
                element.font_size = BASE_FONT_SIZE;
            }
            if element.text_alignment.is_none() {
                element.text_alignment = Some(TextAlignment::Center);
            }
        }

        element.children.clone()
    };

    let Some(element) = ctx.get(id) else {
        return;
    };
    let color = element.foreground_color;
    let font_size = element.font_size;
    let alignment = element.text_alignment;

    for child in children {
        inherit_from(ctx, child, color, font_size, alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krb_model::{ElementKind, RenderElement};
    use krb_types::Color;

    #[test]
    fn child_inherits_unset_foreground_color() {
        let mut ctx = RenderContext::default();
        let parent = ctx.push(RenderElement::new(ElementKind::Container, 0));
        let child = ctx.push(RenderElement::new(ElementKind::Text, 1));
        ctx.attach(parent, child).unwrap();
        ctx.get_mut(parent).unwrap().foreground_color = Some(Color::rgba(10, 20, 30, 255));

        apply_inheritance(&mut ctx, &[parent]);

        assert_eq!(
            ctx.get(child).unwrap().foreground_color,
            Some(Color::rgba(10, 20, 30, 255))
        );
    }

    #[test]
    fn explicit_child_color_is_not_overwritten() {
        let mut ctx = RenderContext::default();
        let parent = ctx.push(RenderElement::new(ElementKind::Container, 0));
        let child = ctx.push(RenderElement::new(ElementKind::Text, 1));
        ctx.attach(parent, child).unwrap();
        ctx.get_mut(parent).unwrap().foreground_color = Some(Color::rgba(10, 20, 30, 255));
        ctx.get_mut(child).unwrap().foreground_color = Some(Color::rgba(1, 1, 1, 255));

        apply_inheritance(&mut ctx, &[parent]);

        assert_eq!(
            ctx.get(child).unwrap().foreground_color,
            Some(Color::rgba(1, 1, 1, 255))
        );
    }

    #[test]
    fn no_ancestor_color_falls_back_to_the_global_default() {
        let mut ctx = RenderContext::default();
        let root = ctx.push(RenderElement::new(ElementKind::Container, 0));

        apply_inheritance(&mut ctx, &[root]);

        assert_eq!(
            ctx.get(root).unwrap().foreground_color,
            Some(DEFAULT_FOREGROUND_COLOR)
        );
    }

    #[test]
    fn text_element_with_no_override_defaults_to_centered_alignment() {
        let mut ctx = RenderContext::default();
        let text = ctx.push(RenderElement::new(ElementKind::Text, 0));

        apply_inheritance(&mut ctx, &[text]);

        assert_eq!(ctx.get(text).unwrap().text_alignment, Some(TextAlignment::Center));
    }

    #[test]
    fn text_element_clamps_faint_color_and_tiny_font() {
        let mut ctx = RenderContext::default();
        let text = ctx.push(RenderElement::new(ElementKind::Text, 0));
        ctx.get_mut(text).unwrap().foreground_color = Some(Color::rgba(10, 10, 10, 20));
        ctx.get_mut(text).unwrap().font_size = 3.0;

        apply_inheritance(&mut ctx, &[text]);

        let resolved = ctx.get(text).unwrap();
        assert_eq!(resolved.foreground_color, Some(Color::rgba(10, 10, 10, 255)));
        assert_eq!(resolved.font_size, BASE_FONT_SIZE);
    }
}
