//! Turns a parsed [`krb_format::Document`] into a linked, style-resolved
//! [`krb_model::RenderContext`].
//!
//! The pipeline runs in a fixed order (spec §4.4-§4.6): instantiate every
//! flat element record with its style/direct/contextual-default
//! properties resolved, link parent/child structure from `child_count`,
//! expand component placeholders into their template bodies, then push
//! inherited foreground color and font size down the final tree. Each
//! stage lives in its own module so layout and rendering code can be
//! tested against a hand-built [`krb_model::RenderContext`] without going
//! through a real document at all.

mod error;
mod expand;
mod inherit;
mod instantiate;
mod link;
mod resolve;
mod window;

pub use error::{BuildError, Result};
pub use window::WindowConfig;

use krb_format::Document;
use krb_model::RenderContext;

/// Output of [`build`]: the linked render tree plus the App element's
/// resolved window defaults.
#[derive(Debug)]
pub struct BuildOutput {
    pub context: RenderContext,
    pub window: WindowConfig,
}

/// Runs the full build pipeline over a parsed document.
pub fn build(document: &Document) -> Result<BuildOutput> {
    let mut window = WindowConfig::default();
    let mut ctx = RenderContext::with_capacity(
        document.elements.len(),
        document.component_definitions.len(),
    );

    let ids = instantiate::instantiate_records(
        &mut ctx,
        &document.elements,
        &document.styles,
        &document.strings,
        &mut window,
    );

    let roots = link::link_tree(
        &mut ctx,
        &document.elements,
        &ids,
        document.header.has_app(),
    )?;
    ctx.set_roots(roots.clone());

    expand::expand_components(
        &mut ctx,
        &document.component_definitions,
        &document.styles,
        &document.strings,
        &mut window,
    );

    inherit::apply_inheritance(&mut ctx, &roots);

    Ok(BuildOutput { context: ctx, window })
}

#[cfg(test)]
mod tests {
    use super::*;
    use krb_format::{
        Alignment, ElementHeader, ElementKind, ElementRecord, LayoutDirection, PositionMode,
        Property, PropertyId, PropertyValue, Style,
    };
    use krb_model::ElementKind as ModelElementKind;

    fn leaf(kind: ElementKind, child_count: u8) -> ElementRecord {
        ElementRecord {
            header: ElementHeader {
                kind,
                id_index: 0,
                pos_x: 0,
                pos_y: 0,
                width: 100,
                height: 50,
                layout_direction: LayoutDirection::Row,
                alignment: Alignment::Start,
                grow: false,
                position_mode: PositionMode::Flow,
                style_id: 0,
                property_count: 0,
                custom_property_count: 0,
                state_property_set_count: 0,
                event_count: 0,
                animation_count: 0,
                child_count,
            },
            properties: Vec::new(),
            custom_properties: Vec::new(),
            events: Vec::new(),
            state_property_sets: Vec::new(),
        }
    }

    #[test]
    fn builds_a_two_element_tree_with_style_resolution() {
        let mut app = leaf(ElementKind::App, 1);
        app.header.style_id = 1;
        app.properties.push(Property {
            id: PropertyId::WindowTitle,
            value: PropertyValue::StringRef(0),
        });
        let child = leaf(ElementKind::Button, 0);

        let document = Document {
            header: krb_format::Header {
                version_major: 1,
                version_minor: 0,
                flags: krb_format::HeaderFlags::HAS_APP,
                counts: krb_format::SectionCounts::default(),
                offsets: krb_format::SectionOffsets::default(),
                total_size: 0,
                has_scripts_section: true,
            },
            elements: vec![app, child],
            styles: vec![Style {
                id: 1,
                name_index: 0,
                properties: vec![Property {
                    id: PropertyId::BackgroundColor,
                    value: PropertyValue::Color([1, 2, 3, 255]),
                }],
            }],
            component_definitions: Vec::new(),
            scripts: Vec::new(),
            strings: krb_format::StringTable::from_entries(vec!["title".to_owned()]),
            resources: Vec::new(),
        };

        let output = build(&document).unwrap();
        assert_eq!(output.window.title, "title");
        assert_eq!(output.context.roots().len(), 1);
        let root = output.context.roots()[0];
        assert_eq!(output.context.get(root).unwrap().kind, ModelElementKind::App);
        assert_eq!(
            output.context.get(root).unwrap().background_color,
            Some(krb_types::Color::rgba(1, 2, 3, 255))
        );
    }
}
