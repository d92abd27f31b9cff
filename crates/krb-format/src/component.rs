use crate::element::{decode_value, read_element_record, ElementRecord, PropertyValue};
use crate::error::Result;
use crate::reader::ByteReader;

/// One named parameter a component definition declares (spec §4.2 step 6:
/// `{name index, type hint, default size, default bytes}`). Parameters are
/// looked up by name at expansion time; the default value is only used when
/// the placeholder doesn't override it with a same-named custom property.
#[derive(Debug, Clone)]
pub struct ParameterDef {
    pub name_index: u8,
    pub default_value: PropertyValue,
}

fn read_parameter_def(r: &mut ByteReader<'_>) -> Result<ParameterDef> {
    let name_index = r.read_u8()?;
    let type_hint = r.read_u8()?;
    let size = r.read_u8()? as usize;
    let data = r.read_bytes(size)?;
    Ok(ParameterDef {
        name_index,
        default_value: decode_value(type_hint, data),
    })
}

/// A reusable template: a name, its declared parameters, and a recursively
/// parsed element subtree that gets cloned into the document's element
/// table on every instantiation (spec §4.5, resolved Open Question in
/// SPEC_FULL.md §9: template bodies are parsed fully up front, not skipped
/// and re-parsed lazily).
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    pub name_index: u8,
    pub parameters: Vec<ParameterDef>,
    pub template: Vec<ElementRecord>,
}

/// `name_index (u8) | parameter_count (u8) | parameters[...] | root-template
/// element header...` (spec §4.2 step 6). There is no template element
/// count in the wire format: the template body is parsed exactly like the
/// top-level element array, recursively, with `child_count` on each record
/// driving how many more sibling-and-descendant records follow the root.
pub fn read_component_definition(
    r: &mut ByteReader<'_>,
    has_state_sets: bool,
) -> Result<ComponentDefinition> {
    let name_index = r.read_u8()?;
    let parameter_count = r.read_u8()?;
    let mut parameters = Vec::with_capacity(parameter_count as usize);
    for _ in 0..parameter_count {
        parameters.push(read_parameter_def(r)?);
    }

    let template = read_component_template(r, has_state_sets)?;

    Ok(ComponentDefinition {
        name_index,
        parameters,
        template,
    })
}

/// Reads the root template record plus every descendant implied by its
/// `child_count` chain, in the same flat pre-order the main element array
/// uses (spec §4.2 step 6, §4.6). A parent's expected-child count is
/// tracked on a stack exactly the way tree-linking itself replays the flat
/// array, since the wire format gives no separate subtree length to skip by.
fn read_component_template(
    r: &mut ByteReader<'_>,
    has_state_sets: bool,
) -> Result<Vec<ElementRecord>> {
    let root = read_element_record(r, has_state_sets)?;
    let mut pending_children: Vec<u8> = Vec::new();
    if root.header.child_count > 0 {
        pending_children.push(root.header.child_count);
    }
    let mut records = vec![root];

    while let Some(remaining) = pending_children.last_mut() {
        *remaining -= 1;
        if *remaining == 0 {
            pending_children.pop();
        }

        let record = read_element_record(r, has_state_sets)?;
        if record.header.child_count > 0 {
            pending_children.push(record.header.child_count);
        }
        records.push(record);
    }

    Ok(records)
}

pub fn read_component_definitions(
    r: &mut ByteReader<'_>,
    count: u16,
    has_state_sets: bool,
) -> Result<Vec<ComponentDefinition>> {
    let mut defs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        defs.push(read_component_definition(r, has_state_sets)?);
    }
    Ok(defs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Section;

    #[test]
    fn reads_definition_with_childless_template_root() {
        // name_index=9, 0 parameters, then a single childless Container root.
        let bytes = [
            9, 0, // name_index, parameter_count
            0x01, 0, // kind=Container, id_index
            0, 0, 0, 0, // pos_x, pos_y
            0, 0, 0, 0, // width, height
            0, 0, // layout byte, style_id
            0, 0, 0, 0, 0, // property/custom/event/animation/child counts
        ];
        let mut r = ByteReader::new(&bytes, Section::ComponentDefinitions);
        let def = read_component_definition(&mut r, false).unwrap();
        assert_eq!(def.name_index, 9);
        assert!(def.parameters.is_empty());
        assert_eq!(def.template.len(), 1);
    }
}
