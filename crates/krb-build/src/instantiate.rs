use krb_format::{ElementRecord, EventType, StringTable, Style};
use krb_model::{ElementId, ElementKind, RenderContext, RenderElement};
use krb_types::Color;

use crate::resolve::{apply_contextual_defaults, apply_style_and_direct};
use crate::window::WindowConfig;

/// Fallback border color applied when a border width was set without a
/// matching color (spec §4.4 step 4).
pub const DEFAULT_BORDER_COLOR: Color = Color::rgba(128, 128, 128, 255);

/// Converts a flat slice of parsed element records into [`RenderElement`]s
/// appended to `ctx`, resolving each one's style/direct/contextual-default
/// properties in the same pass (spec §4.4). Tree structure is not built
/// here; callers run [`crate::link::link_tree`] afterward. Returns the
/// ids assigned, in the same order as `records`.
fn lookup_handler_name(strings: &StringTable, index: u8) -> String {
    strings.get(u16::from(index)).unwrap_or_default().to_owned()
}

pub fn instantiate_records(
    ctx: &mut RenderContext,
    records: &[ElementRecord],
    styles: &[Style],
    strings: &StringTable,
    window: &mut WindowConfig,
) -> Vec<ElementId> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut element = RenderElement::new(record.header.kind.into(), index as u32);
            element.layout_direction = record.header.layout_direction;
            element.alignment = record.header.alignment;
            element.grow = record.header.grow;
            element.position_mode = record.header.position_mode;
            element.click_handler = record
                .events
                .iter()
                .find(|event| event.event_type == EventType::Click)
                .map(|event| lookup_handler_name(strings, event.handler_name_index));
            element.declared_position = (record.header.pos_x, record.header.pos_y);
            element.declared_size = (record.header.width, record.header.height);
            element.is_interactive = matches!(element.kind, ElementKind::Button | ElementKind::Input);

            let style = if record.header.style_id == 0 {
                None
            } else {
                styles.iter().find(|s| s.id == record.header.style_id)
            };
            apply_style_and_direct(&mut element, style, &record.properties, strings, window);
            apply_contextual_defaults(&mut element, DEFAULT_BORDER_COLOR);

            for custom in &record.custom_properties {
                let key = strings
                    .get(u16::from(custom.key_index))
                    .unwrap_or_default()
                    .to_owned();
                let value = crate::resolve::property_value_as_string(&custom.value, strings);
                element.custom_properties.insert(key, value);
            }

            ctx.push(element)
        })
        .collect()
}
