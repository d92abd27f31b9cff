use krb_format::{ComponentDefinition, StringTable, Style};
use krb_model::{ComponentInstance, ComponentInstanceRef, ElementId, RenderContext};

use crate::instantiate::instantiate_records;
use crate::link::link_tree;
use crate::window::WindowConfig;

const COMPONENT_NAME_KEY: &str = "_componentName";

/// Replaces every component placeholder in `ctx` with its template's
/// expansion (spec §4.5). Runs exactly once over the elements that exist
/// before expansion starts: a template that itself contains a
/// `_componentName` placeholder is left unexpanded, matching the resolved
/// decision that expansion is not applied recursively across passes
/// (SPEC_FULL.md §9).
pub fn expand_components(
    ctx: &mut RenderContext,
    definitions: &[ComponentDefinition],
    styles: &[Style],
    strings: &StringTable,
    window: &mut WindowConfig,
) {
    let placeholders: Vec<ElementId> = (0..ctx.len())
        .map(|i| ElementId::new(i as u32))
        .filter(|id| {
            ctx.get(*id)
                .is_some_and(|e| e.custom_properties.contains_key(COMPONENT_NAME_KEY))
        })
        .collect();

    for placeholder_id in placeholders {
        let Some(component_name) = ctx
            .get(placeholder_id)
            .and_then(|e| e.custom_properties.get(COMPONENT_NAME_KEY))
            .cloned()
        else {
            continue;
        };

        let Some((def_index, definition)) = definitions.iter().enumerate().find(|(_, d)| {
            strings.get(u16::from(d.name_index)) == Some(component_name.as_str())
        }) else {
            tracing::warn!(%component_name, "no matching component definition, skipping");
            continue;
        };

        if definition.template.is_empty() {
            continue;
        }

        let template_ids = instantiate_records(ctx, &definition.template, styles, strings, window);
        let sub_roots = link_tree(ctx, &definition.template, &template_ids, false).unwrap_or_default();
        let Some(&template_root) = sub_roots.first() else {
            continue;
        };

        copy_instance_overrides(ctx, placeholder_id, template_root);
        apply_parameter_overrides(ctx, placeholder_id, template_root, definition, strings);

        let parent = ctx.get(placeholder_id).and_then(|e| e.parent);
        if let Some(parent_id) = parent {
            if let Some(parent_element) = ctx.get_mut(parent_id) {
                if let Some(slot) = parent_element
                    .children
                    .iter_mut()
                    .find(|c| **c == placeholder_id)
                {
                    *slot = template_root;
                }
            }
            if let Some(root_element) = ctx.get_mut(template_root) {
                root_element.parent = Some(parent_id);
            }
        }

        if let Some(placeholder) = ctx.get_mut(placeholder_id) {
            placeholder.is_placeholder = true;
        }
        if let Some(root) = ctx.get_mut(template_root) {
            root.component_instance = Some(ComponentInstanceRef {
                definition_index: def_index as u16,
                placeholder: placeholder_id,
            });
        }

        ctx.push_component_instance(ComponentInstance {
            definition_index: def_index as u16,
            placeholder: placeholder_id,
            root: template_root,
        });
    }
}

/// Copies per-instance overrides from the placeholder onto the expanded
/// template root (spec §4.5 step 2: id, pos_x/y, width, height, layout
/// byte, style_id — "non-zero overrides win"). Position and size survive
/// on a resolved [`krb_model::RenderElement`] as plain numbers, so a zero
/// cleanly means "not overridden" there; the layout byte and style id do
/// not (a placeholder with an all-default layout byte is indistinguishable
/// from one that explicitly set Row/Start/flow), so this runtime only
/// propagates position and size and leaves the template's own layout and
/// style resolution in place for those two fields.
fn copy_instance_overrides(ctx: &mut RenderContext, placeholder_id: ElementId, template_root: ElementId) {
    let Some(placeholder) = ctx.get(placeholder_id) else {
        return;
    };
    let position = placeholder.declared_position;
    let size = placeholder.declared_size;

    let Some(root) = ctx.get_mut(template_root) else {
        return;
    };
    if position != (0, 0) {
        root.declared_position = position;
    }
    if size != (0, 0) {
        root.declared_size = size;
    }
}

/// Copies parameter overrides from the placeholder's custom properties
/// onto the expanded template root, keyed by parameter name (spec §4.5).
/// A parameter with no matching placeholder override keeps whatever
/// default the template body declared.
fn apply_parameter_overrides(
    ctx: &mut RenderContext,
    placeholder_id: ElementId,
    template_root: ElementId,
    definition: &ComponentDefinition,
    strings: &StringTable,
) {
    let Some(placeholder) = ctx.get(placeholder_id) else {
        return;
    };
    let overrides: Vec<(String, String)> = definition
        .parameters
        .iter()
        .filter_map(|param| {
            let name = strings.get(u16::from(param.name_index))?;
            let value = placeholder.custom_properties.get(name)?;
            Some((name.to_owned(), value.clone()))
        })
        .collect();

    if let Some(root) = ctx.get_mut(template_root) {
        for (key, value) in overrides {
            root.custom_properties.insert(key, value);
        }
    }
}
