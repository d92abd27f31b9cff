use krb_model::{ElementKind, RenderElement};
use krb_types::Size;

use crate::measure::Metrics;

const TEXT_PADDING: f32 = 8.0;
const BUTTON_PADDING: f32 = 16.0;
const CONTAINER_FALLBACK: f32 = 100.0;

/// Computes an element's intrinsic size (spec §4.7 step 1): explicit
/// declared dimensions win per axis when set; otherwise the element's
/// kind drives a fallback rule. `parent_content` is the parent's content
/// area, used for the "inherit parent dimensions" container rule.
pub fn intrinsic_size(
    element: &RenderElement,
    parent_content: Size,
    has_parent: bool,
    scale: f32,
    metrics: &dyn Metrics,
) -> Size {
    let (declared_w, declared_h) = element.declared_size;
    let explicit_w = declared_w > 0;
    let explicit_h = declared_h > 0;

    let fallback = fallback_size(element, parent_content, has_parent, scale, metrics);

    let mut size = Size::new(
        if explicit_w {
            f32::from(declared_w) * scale
        } else {
            fallback.width
        },
        if explicit_h {
            f32::from(declared_h) * scale
        } else {
            fallback.height
        },
    );

    if explicit_w || explicit_h {
        size = size.clamp_min(1.0);
    }
    size
}

fn fallback_size(
    element: &RenderElement,
    parent_content: Size,
    has_parent: bool,
    scale: f32,
    metrics: &dyn Metrics,
) -> Size {
    match element.kind {
        ElementKind::Text | ElementKind::Button => {
            let padding = if element.kind == ElementKind::Button {
                BUTTON_PADDING
            } else {
                TEXT_PADDING
            };
            let text = element.text.as_deref().unwrap_or_default();
            let measured = metrics.measure_text(text, element.font_size);
            Size::new(
                measured.width + padding * scale,
                element.font_size * scale + padding * scale,
            )
        }
        ElementKind::Image => element
            .image_resource
            .and_then(|index| metrics.image_size(index))
            .map(|size| Size::new(size.width * scale, size.height * scale))
            .unwrap_or_else(|| Size::new(CONTAINER_FALLBACK * scale, CONTAINER_FALLBACK * scale)),
        ElementKind::App | ElementKind::Container => {
            if element.grow || has_parent {
                parent_content
            } else {
                Size::new(CONTAINER_FALLBACK * scale, CONTAINER_FALLBACK * scale)
            }
        }
        _ => {
            if has_parent {
                parent_content
            } else {
                Size::new(CONTAINER_FALLBACK * scale, CONTAINER_FALLBACK * scale)
            }
        }
    }
}
