use krb_format::{Property, PropertyId, PropertyValue, Style, StringTable};
use krb_types::{Color, EdgeInsets};
use krb_model::{RenderElement, TextAlignment};

use crate::window::WindowConfig;

fn lookup_string(strings: &StringTable, index: u8) -> String {
    strings.get(u16::from(index)).unwrap_or_default().to_owned()
}

/// Renders a custom property's raw wire value as a string, for storage in
/// [`RenderElement::custom_properties`]. Custom properties have no fixed
/// schema (spec §4.3), so callers that need a typed value parse this
/// string themselves.
pub fn property_value_as_string(value: &PropertyValue, strings: &StringTable) -> String {
    match value {
        PropertyValue::Byte(b) => b.to_string(),
        PropertyValue::Short(s) => s.to_string(),
        PropertyValue::Color(bytes) => format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            bytes[0], bytes[1], bytes[2], bytes[3]
        ),
        PropertyValue::EdgeInsets(bytes) => {
            format!("{},{},{},{}", bytes[0], bytes[1], bytes[2], bytes[3])
        }
        PropertyValue::StringRef(index) => lookup_string(strings, *index),
        PropertyValue::ResourceRef(index) => index.to_string(),
        PropertyValue::Raw(bytes) => format!("{bytes:?}"),
    }
}

/// Applies one property's value onto an already-created [`RenderElement`].
/// Window properties are diverted into `window` instead; every other kind
/// of property lands directly on the element's typed fields so later
/// layout and rendering code never has to re-interpret raw property
/// bytes (spec §4.3).
pub fn apply_property(
    element: &mut RenderElement,
    property: &Property,
    strings: &StringTable,
    window: &mut WindowConfig,
) {
    match (property.id, &property.value) {
        (PropertyId::BackgroundColor, PropertyValue::Color(bytes)) => {
            element.background_color = Some(Color::from_bytes(*bytes));
        }
        (PropertyId::ForegroundColor, PropertyValue::Color(bytes)) => {
            element.foreground_color = Some(Color::from_bytes(*bytes));
        }
        (PropertyId::BorderColor, PropertyValue::Color(bytes)) => {
            element.border_color = Some(Color::from_bytes(*bytes));
        }
        (PropertyId::BorderWidth, PropertyValue::Byte(w)) => {
            element.border_widths = [f32::from(*w); 4];
        }
        (PropertyId::BorderWidth, PropertyValue::EdgeInsets(bytes)) => {
            let insets = EdgeInsets::new(
                f32::from(bytes[0]),
                f32::from(bytes[1]),
                f32::from(bytes[2]),
                f32::from(bytes[3]),
            );
            element.border_widths = [insets.top, insets.right, insets.bottom, insets.left];
        }
        (PropertyId::TextContent, PropertyValue::StringRef(index)) => {
            element.text = Some(lookup_string(strings, *index));
        }
        (PropertyId::TextAlignment, PropertyValue::Byte(0)) => {
            // 0 means "inherit" (spec §4.4 step 5); leave unset.
        }
        (PropertyId::TextAlignment, PropertyValue::Byte(b)) => {
            element.text_alignment = Some(TextAlignment::from_byte(*b));
        }
        (PropertyId::ImageSource, PropertyValue::ResourceRef(index)) => {
            element.image_resource = Some(u16::from(*index));
        }
        (PropertyId::Visibility, PropertyValue::Byte(b)) => {
            element.is_visible = *b != 0;
        }
        (PropertyId::FontSize, PropertyValue::Byte(b)) => {
            element.font_size = f32::from(*b);
        }
        (PropertyId::FontSize, PropertyValue::Short(s)) => {
            element.font_size = f32::from(*s);
        }
        (PropertyId::WindowWidth, PropertyValue::Short(s)) => window.width = *s,
        (PropertyId::WindowHeight, PropertyValue::Short(s)) => window.height = *s,
        (PropertyId::WindowTitle, PropertyValue::StringRef(index)) => {
            window.title = lookup_string(strings, *index);
        }
        (PropertyId::Resizable, PropertyValue::Byte(b)) => window.resizable = *b != 0,
        (PropertyId::ScaleFactor, PropertyValue::Short(s)) => {
            window.scale_factor = f32::from(*s) / 256.0;
        }
        (PropertyId::Unknown(id), _) => {
            tracing::trace!(property_id = id, "skipping unrecognized property");
        }
        _ => {
            tracing::trace!(?property, "property value type did not match its id, skipping");
        }
    }
}

/// Applies a style's properties, then a direct-override list on top,
/// implementing "direct properties override style properties" (spec
/// §4.4). Contextual defaults and inheritance are separate passes that
/// run after this one.
pub fn apply_style_and_direct(
    element: &mut RenderElement,
    style: Option<&Style>,
    direct: &[Property],
    strings: &StringTable,
    window: &mut WindowConfig,
) {
    if let Some(style) = style {
        for property in &style.properties {
            apply_property(element, property, strings, window);
        }
    }
    for property in direct {
        apply_property(element, property, strings, window);
    }
}

/// Border color and width imply each other when only one was set (spec
/// §4.4 step 4), run after direct properties and before inheritance:
/// a colored border with no declared width becomes a 1px border; a
/// declared width with no colored border picks up the context default
/// border color instead of staying invisible.
pub fn apply_contextual_defaults(element: &mut RenderElement, default_border_color: Color) {
    let border_color_set = element
        .border_color
        .is_some_and(|c| c.a > 0);
    let any_width_set = element.border_widths.iter().any(|w| *w > 0.0);

    if border_color_set && !any_width_set {
        element.border_widths = [1.0; 4];
    }
    if any_width_set && !border_color_set {
        element.border_color = Some(default_border_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krb_model::ElementKind;

    #[test]
    fn direct_property_overrides_style() {
        let strings = StringTable::default();
        let mut window = WindowConfig::default();
        let style = Style {
            id: 1,
            name_index: 0,
            properties: vec![Property {
                id: PropertyId::BackgroundColor,
                value: PropertyValue::Color([255, 0, 0, 255]),
            }],
        };
        let direct = vec![Property {
            id: PropertyId::BackgroundColor,
            value: PropertyValue::Color([0, 255, 0, 255]),
        }];
        let mut element = RenderElement::new(ElementKind::Container, 0);
        apply_style_and_direct(&mut element, Some(&style), &direct, &strings, &mut window);
        assert_eq!(element.background_color, Some(Color::rgba(0, 255, 0, 255)));
    }

    #[test]
    fn colored_border_with_no_width_gets_a_default_width() {
        let mut element = RenderElement::new(ElementKind::Container, 0);
        element.border_color = Some(Color::rgba(10, 20, 30, 255));
        apply_contextual_defaults(&mut element, Color::rgba(1, 1, 1, 255));
        assert_eq!(element.border_widths, [1.0; 4]);
    }

    #[test]
    fn nonzero_width_with_no_border_color_gets_the_context_default() {
        let mut element = RenderElement::new(ElementKind::Container, 0);
        element.border_widths = [2.0; 4];
        apply_contextual_defaults(&mut element, Color::rgba(9, 9, 9, 255));
        assert_eq!(element.border_color, Some(Color::rgba(9, 9, 9, 255)));
    }

    #[test]
    fn fully_unset_border_stays_unset() {
        let mut element = RenderElement::new(ElementKind::Container, 0);
        apply_contextual_defaults(&mut element, Color::rgba(9, 9, 9, 255));
        assert_eq!(element.border_color, None);
        assert_eq!(element.border_widths, [0.0; 4]);
    }
}
